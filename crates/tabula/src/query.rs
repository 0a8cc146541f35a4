//! Relationship query builders.
//!
//! Builder methods never fail. The first misuse is recorded and returned by
//! `execute` before any SQL runs.

mod count;
pub use count::QueryCount;

mod join;
pub use join::Query;

mod merge;
pub use merge::QueryMerge;

mod state;
use state::State;

mod target;
use target::{Target, To};

use crate::{
    relation::{self, Relationship},
    shape::Shape,
    Mapper,
};

use tabula_core::{schema::mapping::TableMapping, Error, Record, Result};
use tabula_sql::stmt::Select;

use std::sync::Arc;

/// Result label prefix of the owner columns in generated statements
const OWNER_LABELS: &str = "t0";

/// Result label prefix of the related columns in generated statements
const RELATED_LABELS: &str = "t1";

/// Mappings of both ends of a relationship.
struct Ends {
    owner: Arc<TableMapping>,
    related: Arc<TableMapping>,
}

impl Ends {
    fn load<O: Record, R: Record>(mapper: &Mapper) -> Result<Ends> {
        Ok(Ends {
            owner: mapper.table_mapping::<O>()?,
            related: mapper.table_mapping::<R>()?,
        })
    }

    fn owner_alias(&self) -> &str {
        self.owner.table_name()
    }

    /// The related table's name, suffixed with `_2` when it is the owner's
    /// table as well.
    fn related_alias(&self) -> String {
        let related = self.related.table_name();

        if related.eq_ignore_ascii_case(self.owner.table_name()) {
            format!("{related}_2")
        } else {
            related.to_string()
        }
    }

    /// Checks the relationship, failing with every violation found.
    fn verify<O: Record, R: Record>(&self, relationship: &Relationship) -> Result<()> {
        let violations = relation::verify::<O, R>(&self.owner, &self.related, relationship);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::relationship(
                &self.owner.record,
                &self.related.record,
                violations,
            ))
        }
    }
}

fn build_shape(mapper: &Mapper, select: Select) -> Shape {
    let has_filter = select.filter.is_some();

    Shape {
        sql: mapper.serializer.serialize(&select.into()),
        has_filter,
    }
}
