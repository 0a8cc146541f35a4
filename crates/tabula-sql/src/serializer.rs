#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Period};

// Fragment serializers
mod select;

use crate::stmt::{Clauses, Statement};

/// Serializes statements to ANSI SQL.
///
/// Identifiers are emitted as given, without quoting. Parameters are named
/// placeholders (`:name`); binding them is the driver's job.
#[derive(Debug, Default)]
pub struct Serializer {
    /// Write `AS` before table aliases
    table_alias_keyword: bool,
}

struct Formatter<'a> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer::default()
    }

    /// Emit `FROM orders AS o` instead of `FROM orders o`.
    pub fn table_alias_keyword(&mut self, enabled: bool) -> &mut Self {
        self.table_alias_keyword = enabled;
        self
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
        };

        stmt.to_sql(&mut fmt);

        ret
    }

    /// Appends caller supplied clauses to serialized `sql`.
    ///
    /// `has_filter` tells whether `sql` already has a `WHERE` clause.
    pub fn append_clauses(&self, sql: &str, has_filter: bool, clauses: &Clauses<'_>) -> String {
        let mut ret = sql.to_string();

        if let Some(where_clause) = clauses.where_clause {
            if has_filter {
                ret.push_str(" AND (");
                ret.push_str(where_clause);
                ret.push(')');
            } else {
                ret.push_str(" WHERE ");
                ret.push_str(where_clause);
            }
        }

        if let Some(order_by) = clauses.order_by {
            ret.push_str(" ORDER BY ");
            ret.push_str(order_by);
        }

        if let Some(limit_offset) = clauses.limit_offset {
            ret.push(' ');
            ret.push_str(limit_offset);
        }

        ret
    }
}

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::Select(stmt) => stmt.to_sql(f),
        }
    }
}
