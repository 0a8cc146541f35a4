mod params;
pub use params::Params;

mod primitive;
pub use primitive::Primitive;

mod ty;
pub use ty::Type;

mod ty_chrono;

mod value;
pub use value::Value;
