#[derive(Debug)]
pub(crate) struct Column {
    pub(crate) name: syn::LitStr,
}

impl Column {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<Column> {
        attr.parse_args()
    }
}

impl syn::parse::Parse for Column {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        // Allowed syntax:
        //
        // #[column("name")]
        let name: syn::LitStr = input.parse()?;

        if name.value().trim().is_empty() {
            return Err(syn::Error::new_spanned(&name, "column name must not be blank"));
        }

        if !input.is_empty() {
            return Err(syn::Error::new(
                input.span(),
                "expected `#[column(\"column_name\")]`",
            ));
        }

        Ok(Column { name })
    }
}
