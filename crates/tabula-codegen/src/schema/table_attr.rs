use super::ErrorSet;

/// The `#[table = ".."]` or `#[table(name = "..", schema = "..", catalog = "..")]`
/// attribute on a record struct.
#[derive(Debug, Default)]
pub(crate) struct TableAttr {
    pub(crate) name: Option<syn::LitStr>,
    pub(crate) schema: Option<syn::LitStr>,
    pub(crate) catalog: Option<syn::LitStr>,
}

impl TableAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<TableAttr> {
        match &attr.meta {
            syn::Meta::NameValue(meta) => {
                let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit),
                    ..
                }) = &meta.value
                else {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "expected `table = \"table_name\"`",
                    ));
                };

                Ok(TableAttr {
                    name: Some(lit.clone()),
                    ..TableAttr::default()
                })
            }
            syn::Meta::List(_) => {
                let mut table = TableAttr::default();
                let mut errs = ErrorSet::new();

                attr.parse_nested_meta(|meta| {
                    let slot = if meta.path.is_ident("name") {
                        &mut table.name
                    } else if meta.path.is_ident("schema") {
                        &mut table.schema
                    } else if meta.path.is_ident("catalog") {
                        &mut table.catalog
                    } else {
                        return Err(meta.error("expected `name`, `schema` or `catalog`"));
                    };

                    let lit: syn::LitStr = meta.value()?.parse()?;

                    if slot.is_some() {
                        errs.push(syn::Error::new_spanned(&lit, "duplicate table argument"));
                    } else {
                        *slot = Some(lit);
                    }

                    Ok(())
                })?;

                if let Some(err) = errs.collect() {
                    return Err(err);
                }

                if table.name.is_none() {
                    return Err(syn::Error::new_spanned(
                        attr,
                        "expected `table(name = \"table_name\", ..)`",
                    ));
                }

                Ok(table)
            }
            syn::Meta::Path(_) => Err(syn::Error::new_spanned(
                attr,
                "expected `table = \"table_name\"`",
            )),
        }
    }
}
