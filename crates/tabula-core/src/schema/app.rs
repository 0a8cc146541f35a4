//! Record metadata as declared on the record type.
//!
//! A [`Model`] is produced by `#[derive(Record)]` (or a hand-written
//! `Record` impl) without any I/O. It says what the record wants; the
//! [`Builder`](super::Builder) reconciles it with what the database has.

mod field;
pub use field::Field;

mod model;
pub use model::{Model, TableAttr};

mod role;
pub use role::{Role, Roles};
