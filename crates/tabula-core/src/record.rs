//! Typed access to record properties.
//!
//! The engine reads and writes records only through the [`Record`] trait,
//! usually implemented by `#[derive(Record)]`.

use crate::{schema::app, stmt::Value, Result};

use std::any::Any;

/// A type whose instances map to rows of one table.
pub trait Record: Any + Default + Clone + Send + 'static {
    /// Declared metadata of the record type. Performs no I/O.
    fn model() -> app::Model;

    /// Reads a mapped property. Returns `None` if the record has no mapped
    /// property named `property`.
    fn get(&self, property: &str) -> Option<Value>;

    /// Assigns a mapped property, converting `value` to the property's type.
    fn set(&mut self, property: &str, value: Value) -> Result<()>;

    /// Mutable access to a relationship property. Returns `None` if the
    /// record has no relationship property named `property`.
    fn relation(&mut self, property: &str) -> Option<RelationMut<'_>>;
}

/// Type-erased access to a relationship property.
pub enum RelationMut<'a> {
    /// A to-one property holding `Option<Related>`.
    One(&'a mut dyn Any),

    /// A to-many property holding `Vec<Related>`. `None` when the property
    /// has no collection instance.
    Many(Option<&'a mut dyn Any>),
}

impl<'a> RelationMut<'a> {
    pub fn is_one(&self) -> bool {
        matches!(self, RelationMut::One(_))
    }

    pub fn is_many(&self) -> bool {
        matches!(self, RelationMut::Many(_))
    }

    /// Returns `true` unless the property is a to-many property without a
    /// collection instance.
    pub fn is_initialized(&self) -> bool {
        !matches!(self, RelationMut::Many(None))
    }

    /// The to-one slot, if this property holds `Option<R>`.
    pub fn one<R: Record>(self) -> Option<&'a mut Option<R>> {
        match self {
            RelationMut::One(slot) => slot.downcast_mut(),
            RelationMut::Many(_) => None,
        }
    }

    /// The collection, if this property holds an initialized `Vec<R>`.
    pub fn many<R: Record>(self) -> Option<&'a mut Vec<R>> {
        match self {
            RelationMut::Many(Some(items)) => items.downcast_mut(),
            _ => None,
        }
    }
}

/// A field type usable as a relationship property.
pub trait RelationField {
    fn relation_mut(&mut self) -> RelationMut<'_>;
}

impl<R: Record> RelationField for Option<R> {
    fn relation_mut(&mut self) -> RelationMut<'_> {
        RelationMut::One(self)
    }
}

impl<R: Record> RelationField for Vec<R> {
    fn relation_mut(&mut self) -> RelationMut<'_> {
        RelationMut::Many(Some(self))
    }
}
