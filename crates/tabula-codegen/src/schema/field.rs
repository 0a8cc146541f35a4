use super::{Column, ErrorSet, Role};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Property name; the identifier without any `r#` prefix
    pub(crate) name: String,

    /// Field type
    pub(crate) ty: FieldTy,
}

#[derive(Debug)]
pub(crate) enum FieldTy {
    /// A field mapped to a column
    Column {
        ty: syn::Type,
        column: Option<Column>,
        roles: Vec<Role>,
    },

    /// A `#[relation]` field holding `Option<Related>` or `Vec<Related>`
    Relation,

    /// A `#[skip]` field, invisible to the engine
    Skipped,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Field> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut column = None;
        let mut roles = vec![];
        let mut relation: Option<&syn::Attribute> = None;
        let mut skip: Option<&syn::Attribute> = None;

        for attr in &field.attrs {
            if let Some(role) = Role::from_attr(attr) {
                if roles.contains(&role) {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        format!("duplicate #[{}] attribute", role.attr_name()),
                    ));
                } else {
                    roles.push(role);
                }
            } else if attr.path().is_ident("column") {
                if column.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[column] attribute",
                    ));
                } else {
                    column = errs.check(Column::from_ast(attr));
                }
            } else if attr.path().is_ident("relation") {
                if relation.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[relation] attribute",
                    ));
                } else {
                    relation = Some(attr);
                }
            } else if attr.path().is_ident("skip") {
                if skip.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[skip] attribute"));
                } else {
                    skip = Some(attr);
                }
            }
        }

        let has_column_attrs = column.is_some() || !roles.is_empty();

        if let Some(attr) = relation {
            if has_column_attrs {
                errs.push(syn::Error::new_spanned(
                    attr,
                    "#[relation] fields cannot have #[column] or role attributes",
                ));
            }
        }

        if let Some(attr) = skip {
            if has_column_attrs || relation.is_some() {
                errs.push(syn::Error::new_spanned(
                    attr,
                    "#[skip] cannot be combined with other field attributes",
                ));
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let ty = if skip.is_some() {
            FieldTy::Skipped
        } else if relation.is_some() {
            FieldTy::Relation
        } else {
            FieldTy::Column {
                ty: field.ty.clone(),
                column,
                roles,
            }
        };

        Ok(Field {
            ident: ident.clone(),
            name: ident.unraw().to_string(),
            ty,
        })
    }
}
