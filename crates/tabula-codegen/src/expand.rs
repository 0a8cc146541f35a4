mod record;

use crate::schema::Record;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The record being expanded
    record: &'a Record,

    /// Path prefix for tabula types
    tabula: TokenStream,
}

pub(super) fn record(record: &Record) -> TokenStream {
    let tabula = quote!(_tabula::codegen_support);

    let expand = Expand { record, tabula };
    wrap_in_const(expand.expand_record_impl())
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use tabula as _tabula;
            #code
        };
    }
}
