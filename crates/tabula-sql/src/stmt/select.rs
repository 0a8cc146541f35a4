use super::{ColumnRef, Filter, Join, TableFactor};

/// A `SELECT` over one table and any number of joins.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub projection: Projection,
    pub from: TableFactor,
    pub joins: Vec<Join>,
    pub filter: Option<Filter>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Labelled columns
    Columns(Vec<SelectItem>),

    /// `count(*)`
    Count,
}

/// `<table>.<column> AS <label>`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub column: ColumnRef,
    pub label: String,
}

impl Select {
    pub fn new(projection: Projection, from: TableFactor) -> Select {
        Select {
            projection,
            from,
            joins: vec![],
            filter: None,
        }
    }

    pub fn join(mut self, join: Join) -> Select {
        self.joins.push(join);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Select {
        self.filter = Some(filter);
        self
    }
}

impl Projection {
    /// Appends `items` to a column projection. Has no effect on `count(*)`.
    pub fn extend(&mut self, items: impl IntoIterator<Item = SelectItem>) {
        if let Projection::Columns(columns) = self {
            columns.extend(items);
        }
    }
}
