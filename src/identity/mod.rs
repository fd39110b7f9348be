//! Subscriber identity: type tags, object ids and the identity pair.
//!
//! ## Contents
//! - [`TypeTag`] a comparable token for a `'static` Rust type (event types and
//!   subscriber categories alike)
//! - [`ObjectId`] caller-assigned numeric id, `0` reserved
//! - [`Identity`] the `(category, object id)` pair used as the removal key
//!
//! ## Quick reference
//! ```text
//! struct Ui;                      // category marker
//! Identity::of::<Ui>(ObjectId::new(5))
//!     └─► (TypeTag(Ui), 5) == removal key for disconnect::<E, Ui>(5)
//! ```

mod key;
mod tag;

pub use key::{Identity, ObjectId};
pub use tag::TypeTag;
