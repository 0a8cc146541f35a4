extern crate proc_macro;

use proc_macro::TokenStream;

#[proc_macro_derive(
    Record,
    attributes(
        key, version, created_on, created_by, updated_on, updated_by, column, relation, skip,
        table
    )
)]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match tabula_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
