use super::{
    build_shape,
    join::{join_property, through},
    Ends, State, RELATED_LABELS,
};
use crate::{
    relation::{self, Kind, Relationship},
    Mapper, SelectMapper,
};

use indexmap::IndexSet;
use tabula_core::{
    driver::{Executor, Row},
    stmt::{Params, Value},
    Error, Record, Result,
};
use tabula_sql::stmt::{
    ColumnRef, Filter, Join, Projection, Select, SelectItem, TableFactor, TableName,
};

use std::collections::HashMap;

/// Name of the list parameter holding a chunk of join keys
const IDS: &str = "ids";

/// Label of the join table's owner column, selected alongside the related
/// columns of a many-to-many merge. Related labels start with `t1_`.
const OWNER_KEY_LABEL: &str = "t0_key";

/// Populates a relationship on owner records that are already loaded.
///
/// The distinct join keys of the owners are bound to `IN (:ids)` in chunks
/// of at most `merge_chunk_size` keys, one query per chunk. The owners slice
/// is never reordered. A one-to-one merge sets the property of every owner,
/// to `None` when no related record matches its key.
pub struct QueryMerge<'a, O: Record> {
    pub(super) mapper: &'a Mapper,
    pub(super) state: State<O>,
}

impl<'a, O: Record> QueryMerge<'a, O> {
    pub fn new(mapper: &'a Mapper) -> QueryMerge<'a, O> {
        QueryMerge {
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

    pub fn join_column_owning_side(mut self, column: &str) -> Self {
        self.state
            .join_column("join_column_owning_side", Kind::OneToOne, column);
        self
    }

    pub fn join_column_many_side(mut self, column: &str) -> Self {
        self.state
            .join_column("join_column_many_side", Kind::OneToMany, column);
        self
    }

    pub fn through_join_table(mut self, table: &str) -> Self {
        self.state.through_table(table);
        self
    }

    pub fn through_join_columns(mut self, owner_column: &str, related_column: &str) -> Self {
        self.state.through_columns(owner_column, related_column);
        self
    }

    pub fn populate_property(mut self, property: &str) -> Self {
        self.state.populate_property(property);
        self
    }

    /// Orders the related records within each owner's collection. Not
    /// available for one-to-one relationships.
    pub fn order_by(mut self, clause: &str) -> Self {
        self.state.order_by(clause);
        self
    }

    /// Binds a named parameter referenced by the order-by clause.
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.state.param(name, value.into());
        self
    }

    pub fn execute(&self, owners: &mut [O], executor: &dyn Executor) -> Result<()> {
        let Some(relationship) = self.state.relationship()? else {
            return Err(Error::usage(
                "a merge requires `has_one`, `has_many` or `many_to_many`",
            ));
        };

        if relationship.kind == Kind::OneToOne && self.state.order_by.is_some() {
            return Err(Error::usage(
                "`order_by` does not apply to a one-to-one merge",
            ));
        }

        match &self.state.target {
            Some(target) => target.merge(self, &relationship, owners, executor),
            None => Err(Error::usage("no related record type is declared")),
        }
    }
}

pub(super) fn execute<O: Record, R: Record>(
    merge: &QueryMerge<'_, O>,
    relationship: &Relationship,
    owners: &mut [O],
    executor: &dyn Executor,
) -> Result<()> {
    let mapper = merge.mapper;
    let ends = Ends::load::<O, R>(mapper)?;
    let related_mapper = SelectMapper::<R>::labelled(
        ends.related.clone(),
        ends.related.table_name(),
        RELATED_LABELS,
    );

    let shape = mapper
        .merge_shapes
        .get_or_try_insert(merge.state.shape_key(Some(relationship)), || {
            ends.verify::<O, R>(relationship)?;
            let select = build_select(&ends, &related_mapper, relationship)?;
            Ok::<_, Error>(build_shape(mapper, select))
        })?;

    let sql = mapper
        .serializer
        .append_clauses(&shape.sql, shape.has_filter, &merge.state.clauses());

    // The owner property holding each owner's join key
    let key_property = match relationship.kind {
        Kind::OneToOne => join_property(&ends.owner, relationship)?,
        Kind::OneToMany | Kind::ManyToMany => ends.owner.id(),
    };

    let keys: Vec<Value> = owners
        .iter()
        .filter_map(|owner| owner.get(&key_property.name))
        .filter(|key| !key.is_null())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();

    if keys.is_empty() {
        tracing::debug!(owner = %ends.owner.record, "no join keys; nothing to merge");
        return Ok(());
    }

    // Reads a related row's join key
    let read_key = |row: &dyn Row| -> Result<Value> {
        match relationship.kind {
            Kind::OneToOne => related_mapper.id_value(row),
            Kind::OneToMany => {
                let join = join_property(&ends.related, relationship)?;
                related_mapper.property_value(row, join)
            }
            Kind::ManyToMany => {
                match row.index_of(OWNER_KEY_LABEL) {
                    Some(index) => row.get(index, &ends.owner.id().ty),
                    None => Ok(Value::Null),
                }
            }
        }
    };

    let chunk_size = mapper.config().merge_chunk_size;
    let mut found: Vec<(Value, R)> = vec![];

    for (i, chunk) in keys.chunks(chunk_size).enumerate() {
        let mut params: Params = merge.state.params.clone();
        params.bind(IDS, Value::List(chunk.to_vec()));

        tracing::debug!(
            owner = %ends.owner.record,
            related = %ends.related.record,
            chunk = i,
            keys = chunk.len(),
            sql = %sql,
            "executing merge query"
        );

        executor.query(&sql, &params, &mut |row| {
            let key = read_key(row)?;

            if let Some(record) = related_mapper.materialize(row)? {
                found.push((key, record));
            }

            Ok(())
        })?;
    }

    let property = relationship.property.as_str();

    if relationship.kind.is_plural() {
        let mut by_key: HashMap<Value, Vec<usize>> = HashMap::new();
        for (i, owner) in owners.iter().enumerate() {
            if let Some(key) = owner.get(&key_property.name) {
                by_key.entry(key).or_default().push(i);
            }
        }

        let mut touched = vec![false; owners.len()];

        for (key, record) in found {
            let Some(indices) = by_key.get(&key) else {
                continue;
            };

            for &i in indices {
                let items = relation::many_slot::<O, R>(&mut owners[i], property)?;

                if !touched[i] {
                    items.clear();
                    touched[i] = true;
                }

                items.push(record.clone());
            }
        }
    } else {
        let by_id: HashMap<Value, R> = found.into_iter().collect();

        // Unmatched owners read `None`, as an unmatched outer join row does
        for owner in owners.iter_mut() {
            let record = owner
                .get(&key_property.name)
                .and_then(|key| by_id.get(&key).cloned());

            *relation::one_slot::<O, R>(owner, property)? = record;
        }
    }

    Ok(())
}

fn build_select<R: Record>(
    ends: &Ends,
    related_mapper: &SelectMapper<R>,
    relationship: &Relationship,
) -> Result<Select> {
    let related_table = TableFactor::new(&ends.related.table, related_mapper.alias());
    let projection = Projection::Columns(related_mapper.select_items());

    Ok(match relationship.kind {
        Kind::OneToOne => Select::new(projection, related_table).filter(Filter::InList {
            column: related_mapper.column_ref(ends.related.id()),
            param: IDS.to_string(),
        }),
        Kind::OneToMany => {
            let join = join_property(&ends.related, relationship)?;

            Select::new(projection, related_table).filter(Filter::InList {
                column: related_mapper.column_ref(join),
                param: IDS.to_string(),
            })
        }
        Kind::ManyToMany => {
            let (through, owner_column, related_column) = through(relationship)?;

            let mut columns = Projection::Columns(vec![SelectItem {
                column: ColumnRef::new(through, owner_column),
                label: OWNER_KEY_LABEL.to_string(),
            }]);
            columns.extend(related_mapper.select_items());

            Select::new(columns, TableFactor::new(TableName::new(through), through))
                .join(Join::inner(
                    related_table,
                    ColumnRef::new(through, related_column),
                    related_mapper.column_ref(ends.related.id()),
                ))
                .filter(Filter::InList {
                    column: ColumnRef::new(through, owner_column),
                    param: IDS.to_string(),
                })
        }
    })
}
