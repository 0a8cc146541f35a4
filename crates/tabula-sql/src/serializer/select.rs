use super::{Comma, Formatter, Period, ToSql};

use crate::stmt::{
    ColumnRef, Filter, Join, JoinKind, Projection, Select, SelectItem, TableFactor, TableName,
};

impl ToSql for &Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let projection = &self.projection;
        let from = &self.from;

        fmt!(f, "SELECT " projection " FROM " from);

        for join in &self.joins {
            fmt!(f, " " join);
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}

impl ToSql for &Projection {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Projection::Columns(items) => fmt!(f, Comma(items)),
            Projection::Count => fmt!(f, "count(*)"),
        }
    }
}

impl ToSql for &SelectItem {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let column = &self.column;
        let label = &self.label;

        fmt!(f, column " AS " label);
    }
}

impl ToSql for &ColumnRef {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let table = &self.table;
        let column = &self.column;

        fmt!(f, table "." column);
    }
}

impl ToSql for &TableName {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Period(self.parts()));
    }
}

impl ToSql for &TableFactor {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = &self.name;
        let alias = &self.alias;

        fmt!(f, name);

        // A bare table aliased by its own name needs no alias
        let is_bare = self.name.catalog.is_none() && self.name.schema.is_none();
        if !(is_bare && self.name.name == self.alias) {
            let keyword = if f.serializer.table_alias_keyword {
                " AS "
            } else {
                " "
            };
            fmt!(f, keyword alias);
        }
    }
}

impl ToSql for &Join {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let kind = match self.kind {
            JoinKind::Inner => "JOIN ",
            JoinKind::Left => "LEFT JOIN ",
        };

        let table = &self.table;
        let lhs = &self.lhs;
        let rhs = &self.rhs;

        fmt!(f, kind table " ON " lhs " = " rhs);
    }
}

impl ToSql for &Filter {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Filter::InList { column, param } => fmt!(f, column " IN (:" param ")"),
        }
    }
}
