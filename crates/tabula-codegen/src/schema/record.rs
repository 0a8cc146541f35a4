use super::{ErrorSet, Field, TableAttr};

#[derive(Debug)]
pub(crate) struct Record {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Record fields, in declaration order
    pub(crate) fields: Vec<Field>,

    /// Table the record maps to. A missing table is reported when the
    /// mapping is built, not at compile time.
    pub(crate) table: TableAttr,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Record> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "record generics are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut table = None;

        for attr in &ast.attrs {
            if !attr.path().is_ident("table") {
                continue;
            }

            if table.is_some() {
                errs.push(syn::Error::new_spanned(attr, "duplicate #[table] attribute"));
            } else {
                table = errs.check(TableAttr::from_ast(attr));
            }
        }

        let fields: Vec<_> = node
            .named
            .iter()
            .filter_map(|field| errs.check(Field::from_ast(field)))
            .collect();

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Record {
            ident: ast.ident.clone(),
            fields,
            table: table.unwrap_or_default(),
        })
    }
}
