use super::{Target, To};
use crate::{
    relation::{Kind, Relationship},
    shape::ShapeKey,
};

use tabula_core::{
    stmt::{Params, Value},
    Error, Record, Result,
};
use tabula_sql::stmt::Clauses;

use std::any::TypeId;

/// Builder state shared by the query builders.
pub(super) struct State<O: Record> {
    pub(super) target: Option<Box<dyn Target<O>>>,
    pub(super) kind: Option<Kind>,
    pub(super) property: Option<String>,
    pub(super) join_column: Option<String>,
    pub(super) through_table: Option<String>,
    pub(super) through_columns: Option<(String, String)>,
    pub(super) where_clause: Option<String>,
    pub(super) params: Params,
    pub(super) order_by: Option<String>,
    pub(super) limit_offset: Option<String>,

    /// First misuse of the builder
    error: Option<Error>,
}

impl<O: Record> State<O> {
    pub(super) fn new() -> State<O> {
        State {
            target: None,
            kind: None,
            property: None,
            join_column: None,
            through_table: None,
            through_columns: None,
            where_clause: None,
            params: Params::new(),
            order_by: None,
            limit_offset: None,
            error: None,
        }
    }

    pub(super) fn fail(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(Error::usage(message));
        }
    }

    pub(super) fn relate<R: Record>(&mut self, kind: Kind) {
        if let Some(existing) = self.kind {
            self.fail(format!(
                "a {existing} relationship is already declared; cannot also declare {kind}"
            ));
            return;
        }

        self.kind = Some(kind);
        self.target = Some(Box::new(To::<R>::new()));
    }

    /// Returns `value` trimmed, recording a usage error if it is blank.
    pub(super) fn required(&mut self, method: &str, value: &str) -> Option<String> {
        let value = value.trim();

        if value.is_empty() {
            self.fail(format!("`{method}` requires a non-blank argument"));
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Records a usage error unless the declared relationship is `expected`.
    pub(super) fn expect_kind(&mut self, method: &str, expected: Kind) -> bool {
        match self.kind {
            Some(kind) if kind == expected => true,
            Some(kind) => {
                self.fail(format!(
                    "`{method}` applies to a {expected} relationship, not {kind}"
                ));
                false
            }
            None => {
                self.fail(format!(
                    "`{method}` must follow the declaration of a {expected} relationship"
                ));
                false
            }
        }
    }

    pub(super) fn join_column(&mut self, method: &str, expected: Kind, column: &str) {
        if !self.expect_kind(method, expected) {
            return;
        }

        if let Some(column) = self.required(method, column) {
            self.join_column = Some(column);
        }
    }

    pub(super) fn through_table(&mut self, table: &str) {
        if !self.expect_kind("through_join_table", Kind::ManyToMany) {
            return;
        }

        if let Some(table) = self.required("through_join_table", table) {
            self.through_table = Some(table);
        }
    }

    pub(super) fn through_columns(&mut self, owner_column: &str, related_column: &str) {
        if !self.expect_kind("through_join_columns", Kind::ManyToMany) {
            return;
        }

        let owner_column = self.required("through_join_columns", owner_column);
        let related_column = self.required("through_join_columns", related_column);

        if let (Some(owner_column), Some(related_column)) = (owner_column, related_column) {
            self.through_columns = Some((owner_column, related_column));
        }
    }

    pub(super) fn populate_property(&mut self, property: &str) {
        if self.kind.is_none() {
            self.fail(
                "`populate_property` must follow `has_one`, `has_many` or `many_to_many`",
            );
            return;
        }

        if let Some(property) = self.required("populate_property", property) {
            self.property = Some(property);
        }
    }

    pub(super) fn where_clause(&mut self, clause: &str) {
        if let Some(clause) = self.required("where_clause", clause) {
            self.where_clause = Some(clause);
        }
    }

    pub(super) fn param(&mut self, name: &str, value: Value) {
        if let Some(name) = self.required("param", name) {
            self.params.bind(name, value);
        }
    }

    pub(super) fn order_by(&mut self, clause: &str) {
        if let Some(clause) = self.required("order_by", clause) {
            self.order_by = Some(clause);
        }
    }

    pub(super) fn limit_offset(&mut self, clause: &str) {
        if let Some(clause) = self.required("limit_offset_clause", clause) {
            self.limit_offset = Some(clause);
        }
    }

    /// The declared relationship, or the first recorded misuse.
    pub(super) fn relationship(&self) -> Result<Option<Relationship>> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let Some(kind) = self.kind else {
            return Ok(None);
        };

        let Some(property) = &self.property else {
            return Err(Error::usage(format!(
                "`populate_property` is required for a {kind} relationship"
            )));
        };

        Ok(Some(Relationship {
            kind,
            property: property.clone(),
            join_column: self.join_column.clone(),
            through_table: self.through_table.clone(),
            through_columns: self.through_columns.clone(),
        }))
    }

    pub(super) fn shape_key(&self, relationship: Option<&Relationship>) -> ShapeKey {
        ShapeKey {
            owner: TypeId::of::<O>(),
            related: self.target.as_ref().map(|target| target.related_type()),
            kind: relationship.map(|r| r.kind),
            join_column: relationship.and_then(|r| r.join_column.clone()),
            through_table: relationship.and_then(|r| r.through_table.clone()),
            through_columns: relationship.and_then(|r| r.through_columns.clone()),
            property: relationship.map(|r| r.property.clone()),
        }
    }

    pub(super) fn clauses(&self) -> Clauses<'_> {
        Clauses {
            where_clause: self.where_clause.as_deref(),
            order_by: self.order_by.as_deref(),
            limit_offset: self.limit_offset.as_deref(),
        }
    }
}
