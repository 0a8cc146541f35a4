use super::{ColumnRef, TableFactor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

/// `<kind> JOIN <table> ON <lhs> = <rhs>`
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableFactor,
    pub lhs: ColumnRef,
    pub rhs: ColumnRef,
}

impl Join {
    pub fn left(table: TableFactor, lhs: ColumnRef, rhs: ColumnRef) -> Join {
        Join {
            kind: JoinKind::Left,
            table,
            lhs,
            rhs,
        }
    }

    pub fn inner(table: TableFactor, lhs: ColumnRef, rhs: ColumnRef) -> Join {
        Join {
            kind: JoinKind::Inner,
            table,
            lhs,
            rhs,
        }
    }
}
