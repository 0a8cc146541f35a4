/// Caller supplied SQL text appended after a statement's cached shape.
///
/// The text is passed through untouched. A `WHERE` clause is combined with a
/// filter already present in the shape using `AND`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Clauses<'a> {
    pub where_clause: Option<&'a str>,
    pub order_by: Option<&'a str>,
    pub limit_offset: Option<&'a str>,
}

impl Clauses<'_> {
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_none() && self.order_by.is_none() && self.limit_offset.is_none()
    }
}
