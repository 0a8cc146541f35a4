mod column;
pub(crate) use column::Column;

mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::{Field, FieldTy};

mod record;
pub(crate) use record::Record;

mod role;
pub(crate) use role::Role;

mod table_attr;
pub(crate) use table_attr::TableAttr;
