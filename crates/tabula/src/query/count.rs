use super::{build_shape, join::join_property, Ends, State};
use crate::{
    relation::{Kind, Relationship},
    Mapper, SelectMapper,
};

use tabula_core::{
    driver::Executor,
    stmt::{Type, Value},
    Error, Record, Result,
};
use tabula_sql::stmt::{Join, Projection, Select, TableFactor};

/// Counts owner records matching a condition, optionally joined to a
/// one-to-one related record so the condition can reference it.
pub struct QueryCount<'a, O: Record> {
    pub(super) mapper: &'a Mapper,
    pub(super) state: State<O>,
}

impl<'a, O: Record> QueryCount<'a, O> {
    pub fn new(mapper: &'a Mapper) -> QueryCount<'a, O> {
        QueryCount {
            mapper,
            state: State::new(),
        }
    }

    /// Joins the related table through a join column on the owner table.
    pub fn has_one<R: Record>(mut self) -> Self {
        self.state.relate::<R>(Kind::OneToOne);
        self
    }

    pub fn join_column_owning_side(mut self, column: &str) -> Self {
        self.state
            .join_column("join_column_owning_side", Kind::OneToOne, column);
        self
    }

    pub fn populate_property(mut self, property: &str) -> Self {
        self.state.populate_property(property);
        self
    }

    pub fn where_clause(mut self, clause: &str) -> Self {
        self.state.where_clause(clause);
        self
    }

    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.state.param(name, value.into());
        self
    }

    pub fn execute(&self, executor: &dyn Executor) -> Result<i64> {
        match self.state.relationship()? {
            Some(relationship) => match &self.state.target {
                Some(target) => target.count(self, &relationship, executor),
                None => Err(Error::usage("no related record type is declared")),
            },
            None => {
                let owner = self.mapper.table_mapping::<O>()?;

                let shape = self
                    .mapper
                    .count_shapes
                    .get_or_try_insert(self.state.shape_key(None), || {
                        let select = Select::new(
                            Projection::Count,
                            TableFactor::new(&owner.table, owner.table_name()),
                        );
                        Ok::<_, Error>(build_shape(self.mapper, select))
                    })?;

                run(self, &shape.sql, shape.has_filter, &owner.record, executor)
            }
        }
    }
}

pub(super) fn execute<O: Record, R: Record>(
    count: &QueryCount<'_, O>,
    relationship: &Relationship,
    executor: &dyn Executor,
) -> Result<i64> {
    let mapper = count.mapper;
    let ends = Ends::load::<O, R>(mapper)?;

    let shape = mapper
        .count_shapes
        .get_or_try_insert(count.state.shape_key(Some(relationship)), || {
            ends.verify::<O, R>(relationship)?;

            let owner_mapper = SelectMapper::<O>::new(ends.owner.clone(), ends.owner_alias());
            let related_mapper =
                SelectMapper::<R>::new(ends.related.clone(), ends.related_alias());
            let join = join_property(&ends.owner, relationship)?;

            let select = Select::new(
                Projection::Count,
                TableFactor::new(&ends.owner.table, owner_mapper.alias()),
            )
            .join(Join::left(
                TableFactor::new(&ends.related.table, related_mapper.alias()),
                owner_mapper.column_ref(join),
                related_mapper.column_ref(ends.related.id()),
            ));

            Ok::<_, Error>(build_shape(mapper, select))
        })?;

    run(count, &shape.sql, shape.has_filter, &ends.owner.record, executor)
}

fn run<O: Record>(
    count: &QueryCount<'_, O>,
    sql: &str,
    has_filter: bool,
    record: &str,
    executor: &dyn Executor,
) -> Result<i64> {
    let sql = count
        .mapper
        .serializer
        .append_clauses(sql, has_filter, &count.state.clauses());

    tracing::debug!(record = %record, sql = %sql, "executing count query");

    let mut total = None;

    executor.query(&sql, &count.state.params, &mut |row| {
        if total.is_none() && !row.is_empty() {
            let value = row.get(0, &Type::I64)?;
            total = Some(value.as_i64().unwrap_or_default());
        }
        Ok(())
    })?;

    Ok(total.unwrap_or_default())
}
