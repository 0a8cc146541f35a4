use super::{
    app,
    db::{Column, TableRef},
    mapping::{PropertyMapping, TableMapping},
    verify::Verify,
};
use crate::{driver::ColumnMetadata, Error, MappingViolation, Result};

use heck::ToSnakeCase;
use std::collections::HashMap;

/// Reconciles a record's declared fields with the live columns of its table.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    /// Schema used for records that do not declare one
    default_schema: Option<String>,

    /// Catalog used for records that do not declare one
    default_catalog: Option<String>,
}

/// Used to track state while building one mapping
struct BuildMapping<'a> {
    model: &'a app::Model,

    /// Live columns, keyed by lower-cased name
    columns: HashMap<String, &'a Column>,

    properties: Vec<PropertyMapping>,

    violations: Vec<MappingViolation>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_schema(&mut self, schema: impl Into<String>) -> &mut Self {
        self.default_schema = Some(schema.into());
        self
    }

    pub fn default_catalog(&mut self, catalog: impl Into<String>) -> &mut Self {
        self.default_catalog = Some(catalog.into());
        self
    }

    /// Builds the mapping of `model` using the columns `provider` reports.
    ///
    /// Every violation found is reported in a single mapping error.
    pub fn build(
        &self,
        model: &app::Model,
        provider: &dyn ColumnMetadata,
    ) -> Result<TableMapping> {
        let Some(name) = model
            .table
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        else {
            return Err(Error::mapping(
                &model.name,
                vec![MappingViolation::MissingTableName],
            ));
        };

        let declared = TableRef {
            catalog: model
                .table
                .catalog
                .clone()
                .or_else(|| self.default_catalog.clone()),
            schema: model
                .table
                .schema
                .clone()
                .or_else(|| self.default_schema.clone()),
            name: name.to_string(),
        };

        let (table, columns) = resolve_table(model, &declared, provider)?;

        tracing::debug!(
            record = %model.name,
            table = %table,
            columns = columns.len(),
            "building table mapping"
        );

        let mut build = BuildMapping {
            model,
            columns: columns
                .iter()
                .map(|column| (column.name.to_lowercase(), column))
                .collect(),
            properties: Vec::with_capacity(model.fields.len()),
            violations: vec![],
        };

        for field in &model.fields {
            build.map_field(field);
        }

        let BuildMapping {
            properties,
            mut violations,
            ..
        } = build;

        violations.extend(Verify::new(&properties).verify());

        if !violations.is_empty() {
            return Err(Error::mapping(&model.name, violations));
        }

        let Some(id) = properties.iter().position(PropertyMapping::is_id) else {
            return Err(Error::mapping(&model.name, vec![MappingViolation::MissingId]));
        };

        Ok(TableMapping::new(model.name.clone(), table, properties, id))
    }
}

/// Finds the table's columns, trying the declared name as written, then
/// upper-cased, then lower-cased.
fn resolve_table(
    model: &app::Model,
    declared: &TableRef,
    provider: &dyn ColumnMetadata,
) -> Result<(TableRef, Vec<Column>)> {
    let candidates = [
        declared.name.clone(),
        declared.name.to_uppercase(),
        declared.name.to_lowercase(),
    ];

    for (i, candidate) in candidates.iter().enumerate() {
        if candidates[..i].contains(candidate) {
            continue;
        }

        let table = declared.with_name(candidate);
        let columns = provider.columns(&table)?;

        if !columns.is_empty() {
            return Ok((table, columns));
        }

        tracing::debug!(record = %model.name, table = %table, "no columns found");
    }

    Err(Error::mapping(
        &model.name,
        vec![MappingViolation::TableNotFound {
            table: declared.to_string(),
        }],
    ))
}

impl BuildMapping<'_> {
    fn map_field(&mut self, field: &app::Field) {
        let explicit = field.column.is_some();
        let column_name = match &field.column {
            Some(column) => column.clone(),
            None => field.name.to_snake_case(),
        };

        let Some(column) = self.columns.get(&column_name.to_lowercase()) else {
            // A field carrying a role cannot be dropped without changing what
            // the record means, so it is held to the same rule as an
            // explicit column.
            if explicit || !field.roles.is_empty() {
                self.violations.push(MappingViolation::ColumnNotFound {
                    property: field.name.clone(),
                    column: column_name,
                });
            } else {
                tracing::warn!(
                    record = %self.model.name,
                    property = %field.name,
                    column = %column_name,
                    "no column for field; field is not mapped"
                );
            }
            return;
        };

        self.properties.push(PropertyMapping {
            name: field.name.clone(),
            ty: field.ty.clone(),
            column: column.name.clone(),
            column_ty: column.ty.clone(),
            alias_suffix: column.name.to_lowercase(),
            roles: field.roles,
        });
    }
}
