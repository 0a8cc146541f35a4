mod clauses;
pub use clauses::Clauses;

mod column_ref;
pub use column_ref::ColumnRef;

mod filter;
pub use filter::Filter;

mod join;
pub use join::{Join, JoinKind};

mod select;
pub use select::{Projection, Select, SelectItem};

mod table_name;
pub use table_name::{TableFactor, TableName};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
