//! Call-site macros over the global registries.

/// Registers a callback: `connect!(Event, Category, id, callback)`.
///
/// Use `()` as the category for free-standing callbacks.
///
/// ```
/// struct Quit;
/// sigvisor::connect!(Quit, (), 1, |_| {});
/// assert_eq!(sigvisor::signal!(Quit, Quit), 1);
/// sigvisor::disconnect!(Quit, (), 1);
/// ```
#[macro_export]
macro_rules! connect {
    ($event:ty, $category:ty, $id:expr, $callback:expr $(,)?) => {
        $crate::connect::<$event, $category>($id, $callback)
    };
}

/// Removes all registrations of an identity: `disconnect!(Event, Category, id)`.
///
/// Must be called if `connect!` was called and the callback captures state
/// that is about to be destroyed.
#[macro_export]
macro_rules! disconnect {
    ($event:ty, $category:ty, $id:expr $(,)?) => {
        $crate::disconnect::<$event, $category>($id)
    };
}

/// Delivers an event: `signal!(Event, value)`.
#[macro_export]
macro_rules! signal {
    ($event:ty, $value:expr $(,)?) => {
        $crate::signal::<$event>(&$value)
    };
}
