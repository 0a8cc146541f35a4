use proc_macro2::TokenStream;
use quote::quote;

/// A role marker attribute on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Id,
    Version,
    CreatedOn,
    CreatedBy,
    UpdatedOn,
    UpdatedBy,
}

impl Role {
    pub(crate) const ALL: [Role; 6] = [
        Role::Id,
        Role::Version,
        Role::CreatedOn,
        Role::CreatedBy,
        Role::UpdatedOn,
        Role::UpdatedBy,
    ];

    pub(crate) fn from_attr(attr: &syn::Attribute) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| attr.path().is_ident(role.attr_name()))
    }

    pub(crate) fn attr_name(self) -> &'static str {
        match self {
            Role::Id => "key",
            Role::Version => "version",
            Role::CreatedOn => "created_on",
            Role::CreatedBy => "created_by",
            Role::UpdatedOn => "updated_on",
            Role::UpdatedBy => "updated_by",
        }
    }

    /// Name of the flag on `app::Roles`
    pub(crate) fn flag(self) -> syn::Ident {
        let name = match self {
            Role::Id => "id",
            role => role.attr_name(),
        };
        syn::Ident::new(name, proc_macro2::Span::call_site())
    }

    pub(crate) fn expand_roles(roles: &[Role], tabula: &TokenStream) -> TokenStream {
        let flags = Role::ALL.into_iter().map(|role| {
            let flag = role.flag();
            let set = roles.contains(&role);
            quote!(#flag: #set)
        });

        quote!(#tabula::app::Roles { #( #flags, )* })
    }
}
