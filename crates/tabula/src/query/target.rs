use super::{count, join, merge, Query, QueryCount, QueryMerge};
use crate::relation::Relationship;

use tabula_core::{driver::Executor, Record, Result};

use std::{any::TypeId, marker::PhantomData};

/// The related record type of a query, with its type erased so a builder
/// only needs to name the owner type.
pub(super) trait Target<O: Record> {
    fn related_type(&self) -> TypeId;

    fn query(
        &self,
        query: &Query<'_, O>,
        relationship: &Relationship,
        executor: &dyn Executor,
    ) -> Result<Vec<O>>;

    fn merge(
        &self,
        merge: &QueryMerge<'_, O>,
        relationship: &Relationship,
        owners: &mut [O],
        executor: &dyn Executor,
    ) -> Result<()>;

    fn count(
        &self,
        count: &QueryCount<'_, O>,
        relationship: &Relationship,
        executor: &dyn Executor,
    ) -> Result<i64>;
}

pub(super) struct To<R>(PhantomData<fn() -> R>);

impl<R> To<R> {
    pub(super) fn new() -> To<R> {
        To(PhantomData)
    }
}

impl<O: Record, R: Record> Target<O> for To<R> {
    fn related_type(&self) -> TypeId {
        TypeId::of::<R>()
    }

    fn query(
        &self,
        query: &Query<'_, O>,
        relationship: &Relationship,
        executor: &dyn Executor,
    ) -> Result<Vec<O>> {
        join::execute::<O, R>(query, relationship, executor)
    }

    fn merge(
        &self,
        merge: &QueryMerge<'_, O>,
        relationship: &Relationship,
        owners: &mut [O],
        executor: &dyn Executor,
    ) -> Result<()> {
        merge::execute::<O, R>(merge, relationship, owners, executor)
    }

    fn count(
        &self,
        count: &QueryCount<'_, O>,
        relationship: &Relationship,
        executor: &dyn Executor,
    ) -> Result<i64> {
        count::execute::<O, R>(count, relationship, executor)
    }
}
