use super::ColumnRef;

/// Filter built into a statement's shape.
///
/// Caller supplied `WHERE` text is not represented here; it is appended
/// verbatim through [`Clauses`](super::Clauses).
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column IN (:param)`, where the parameter is bound to a list.
    InList { column: ColumnRef, param: String },
}
