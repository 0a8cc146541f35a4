use super::{build_shape, Ends, State, OWNER_LABELS, RELATED_LABELS};
use crate::{
    relation::{self, Kind, Relationship},
    Mapper, SelectMapper,
};

use indexmap::{map::Entry, IndexMap};
use tabula_core::{
    driver::Executor,
    schema::mapping::{PropertyMapping, TableMapping},
    stmt::Value,
    Error, Record, RelationshipViolation, Result,
};
use tabula_sql::stmt::{ColumnRef, Join, Projection, Select, TableFactor, TableName};

use std::collections::{hash_map, HashMap};

/// Fetches owner records, optionally together with their related records,
/// in a single joined query.
///
/// Owners are returned in the order they first appear in the result. Owner
/// rows repeated by a to-many join are merged into one owner.
pub struct Query<'a, O: Record> {
    pub(super) mapper: &'a Mapper,
    pub(super) state: State<O>,
}

impl<'a, O: Record> Query<'a, O> {
    pub fn new(mapper: &'a Mapper) -> Query<'a, O> {
        Query {
            mapper,
            state: State::new(),
        }
    }

    /// Populates an `Option<R>` property through a join column on the owner
    /// table.
    pub fn has_one<R: Record>(mut self) -> Self {
        self.state.relate::<R>(Kind::OneToOne);
        self
    }

    /// Populates a `Vec<R>` property through a join column on the related
    /// table.
    pub fn has_many<R: Record>(mut self) -> Self {
        self.state.relate::<R>(Kind::OneToMany);
        self
    }

    /// Populates a `Vec<R>` property through a join table.
    pub fn many_to_many<R: Record>(mut self) -> Self {
        self.state.relate::<R>(Kind::ManyToMany);
        self
    }

    /// The owner-table column referencing the related id.
    pub fn join_column_owning_side(mut self, column: &str) -> Self {
        self.state
            .join_column("join_column_owning_side", Kind::OneToOne, column);
        self
    }

    /// The related-table column referencing the owner id.
    pub fn join_column_many_side(mut self, column: &str) -> Self {
        self.state
            .join_column("join_column_many_side", Kind::OneToMany, column);
        self
    }

    pub fn through_join_table(mut self, table: &str) -> Self {
        self.state.through_table(table);
        self
    }

    /// The join-table columns referencing the owner id and the related id.
    pub fn through_join_columns(mut self, owner_column: &str, related_column: &str) -> Self {
        self.state.through_columns(owner_column, related_column);
        self
    }

    pub fn populate_property(mut self, property: &str) -> Self {
        self.state.populate_property(property);
        self
    }

    /// SQL condition appended as `WHERE`. Tables are referenced by their
    /// aliases: the table names, with `_2` appended to the related table on
    /// a self join.
    pub fn where_clause(mut self, clause: &str) -> Self {
        self.state.where_clause(clause);
        self
    }

    /// Binds a named parameter referenced as `:name`.
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.state.param(name, value.into());
        self
    }

    pub fn order_by(mut self, clause: &str) -> Self {
        self.state.order_by(clause);
        self
    }

    /// Text appended after `ORDER BY`, e.g. `LIMIT 10 OFFSET 20`. Only valid
    /// without a relationship or with a one-to-one relationship.
    pub fn limit_offset_clause(mut self, clause: &str) -> Self {
        self.state.limit_offset(clause);
        self
    }

    pub fn execute(&self, executor: &dyn Executor) -> Result<Vec<O>> {
        match self.state.relationship()? {
            Some(relationship) => match &self.state.target {
                Some(target) => target.query(self, &relationship, executor),
                None => Err(Error::usage("no related record type is declared")),
            },
            None => execute_plain(self, executor),
        }
    }
}

fn execute_plain<O: Record>(query: &Query<'_, O>, executor: &dyn Executor) -> Result<Vec<O>> {
    let mapper = query.mapper;
    let owner = mapper.table_mapping::<O>()?;
    let owner_mapper =
        SelectMapper::<O>::labelled(owner.clone(), owner.table_name(), OWNER_LABELS);

    let shape = mapper
        .query_shapes
        .get_or_try_insert(query.state.shape_key(None), || {
            let select = Select::new(
                Projection::Columns(owner_mapper.select_items()),
                TableFactor::new(&owner.table, owner.table_name()),
            );
            Ok::<_, Error>(build_shape(mapper, select))
        })?;

    let sql = mapper
        .serializer
        .append_clauses(&shape.sql, shape.has_filter, &query.state.clauses());

    tracing::debug!(record = %owner.record, sql = %sql, "executing query");

    let mut owners = vec![];

    executor.query(&sql, &query.state.params, &mut |row| {
        if let Some(record) = owner_mapper.materialize(row)? {
            owners.push(record);
        }
        Ok(())
    })?;

    Ok(owners)
}

pub(super) fn execute<O: Record, R: Record>(
    query: &Query<'_, O>,
    relationship: &Relationship,
    executor: &dyn Executor,
) -> Result<Vec<O>> {
    let mapper = query.mapper;
    let ends = Ends::load::<O, R>(mapper)?;

    if relationship.kind.is_plural() && query.state.limit_offset.is_some() {
        return Err(Error::relationship(
            &ends.owner.record,
            &ends.related.record,
            vec![RelationshipViolation::LimitOnPlural],
        ));
    }

    let owner_mapper =
        SelectMapper::<O>::labelled(ends.owner.clone(), ends.owner_alias(), OWNER_LABELS);
    let related_mapper =
        SelectMapper::<R>::labelled(ends.related.clone(), ends.related_alias(), RELATED_LABELS);

    let shape = mapper
        .query_shapes
        .get_or_try_insert(query.state.shape_key(Some(relationship)), || {
            ends.verify::<O, R>(relationship)?;
            let select = build_select(&ends, &owner_mapper, &related_mapper, relationship)?;
            Ok::<_, Error>(build_shape(mapper, select))
        })?;

    let sql = mapper
        .serializer
        .append_clauses(&shape.sql, shape.has_filter, &query.state.clauses());

    tracing::debug!(
        owner = %ends.owner.record,
        related = %ends.related.record,
        kind = %relationship.kind,
        sql = %sql,
        "executing join query"
    );

    let property = relationship.property.as_str();
    let plural = relationship.kind.is_plural();
    let mut owners: IndexMap<Value, O> = IndexMap::new();
    let mut related: HashMap<Value, R> = HashMap::new();

    executor.query(&sql, &query.state.params, &mut |row| {
        let owner_id = owner_mapper.id_value(row)?;

        if owner_id.is_null() {
            return Ok(());
        }

        let owner = match owners.entry(owner_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let Some(mut owner) = owner_mapper.materialize(row)? else {
                    return Ok(());
                };

                if plural {
                    relation::many_slot::<O, R>(&mut owner, property)?.clear();
                }

                entry.insert(owner)
            }
        };

        let related_id = related_mapper.id_value(row)?;

        let record = if related_id.is_null() {
            None
        } else {
            match related.entry(related_id) {
                hash_map::Entry::Occupied(entry) => Some(entry.get().clone()),
                hash_map::Entry::Vacant(entry) => related_mapper
                    .materialize(row)?
                    .map(|record| entry.insert(record).clone()),
            }
        };

        if plural {
            if let Some(record) = record {
                relation::many_slot::<O, R>(owner, property)?.push(record);
            }
        } else {
            *relation::one_slot::<O, R>(owner, property)? = record;
        }

        Ok(())
    })?;

    Ok(owners.into_values().collect())
}

fn build_select<O: Record, R: Record>(
    ends: &Ends,
    owner_mapper: &SelectMapper<O>,
    related_mapper: &SelectMapper<R>,
    relationship: &Relationship,
) -> Result<Select> {
    let mut projection = Projection::Columns(owner_mapper.select_items());
    projection.extend(related_mapper.select_items());

    let select = Select::new(
        projection,
        TableFactor::new(&ends.owner.table, owner_mapper.alias()),
    );

    let related_table = TableFactor::new(&ends.related.table, related_mapper.alias());
    let owner_id = owner_mapper.column_ref(ends.owner.id());
    let related_id = related_mapper.column_ref(ends.related.id());

    Ok(match relationship.kind {
        Kind::OneToOne => {
            let join = join_property(&ends.owner, relationship)?;
            select.join(Join::left(
                related_table,
                owner_mapper.column_ref(join),
                related_id,
            ))
        }
        Kind::OneToMany => {
            let join = join_property(&ends.related, relationship)?;
            select.join(Join::left(
                related_table,
                owner_id,
                related_mapper.column_ref(join),
            ))
        }
        Kind::ManyToMany => {
            let (through, owner_column, related_column) = through(relationship)?;

            select
                .join(Join::left(
                    TableFactor::new(TableName::new(through), through),
                    owner_id,
                    ColumnRef::new(through, owner_column),
                ))
                .join(Join::left(
                    related_table,
                    ColumnRef::new(through, related_column),
                    related_id,
                ))
        }
    })
}

/// The property mapped to the join column on `holder`.
pub(super) fn join_property<'a>(
    holder: &'a TableMapping,
    relationship: &Relationship,
) -> Result<&'a PropertyMapping> {
    let column = relationship.join_column.as_deref().unwrap_or_default();

    holder.property_by_column(column).ok_or_else(|| {
        Error::usage(format!(
            "join column `{column}` is not mapped on `{}`",
            holder.record
        ))
    })
}

/// The join table and its owner and related columns.
pub(super) fn through(relationship: &Relationship) -> Result<(&str, &str, &str)> {
    match (&relationship.through_table, &relationship.through_columns) {
        (Some(table), Some((owner_column, related_column))) => {
            Ok((table, owner_column, related_column))
        }
        _ => Err(Error::usage("a many-to-many relationship requires a join table")),
    }
}
