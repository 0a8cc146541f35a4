/// A column qualified by the alias of the table it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> ColumnRef {
        ColumnRef {
            table: table.into(),
            column: column.into(),
        }
    }
}
