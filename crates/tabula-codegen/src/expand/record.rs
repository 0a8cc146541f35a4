use super::Expand;
use crate::schema::{FieldTy, Role};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_record_impl(&self) -> TokenStream {
        let tabula = &self.tabula;
        let record_ident = &self.record.ident;
        let model = self.expand_model();
        let get_arms = self.expand_get_arms();
        let set_arms = self.expand_set_arms();
        let relation_arms = self.expand_relation_arms();
        let record_name = record_ident.to_string();

        quote! {
            impl #tabula::Record for #record_ident {
                fn model() -> #tabula::app::Model {
                    #model
                }

                fn get(&self, property: &str) -> Option<#tabula::Value> {
                    match property {
                        #( #get_arms )*
                        _ => None,
                    }
                }

                fn set(&mut self, property: &str, value: #tabula::Value) -> #tabula::Result<()> {
                    match property {
                        #( #set_arms )*
                        _ => Err(#tabula::unknown_property(#record_name, property)),
                    }
                }

                fn relation(&mut self, property: &str) -> Option<#tabula::RelationMut<'_>> {
                    match property {
                        #( #relation_arms )*
                        _ => None,
                    }
                }
            }
        }
    }

    fn expand_model(&self) -> TokenStream {
        let tabula = &self.tabula;
        let name = self.record.ident.to_string();
        let table = &self.record.table;
        let table_name = option_lit(table.name.as_ref());
        let table_schema = option_lit(table.schema.as_ref());
        let table_catalog = option_lit(table.catalog.as_ref());

        let fields = self.record.fields.iter().filter_map(|field| {
            let FieldTy::Column { ty, column, roles } = &field.ty else {
                return None;
            };

            let name = &field.name;
            let column = option_lit(column.as_ref().map(|column| &column.name));
            let roles = Role::expand_roles(roles, tabula);

            Some(quote! {
                #tabula::app::Field {
                    name: #name.to_string(),
                    ty: <#ty as #tabula::Primitive>::TYPE,
                    nullable: <#ty as #tabula::Primitive>::NULLABLE,
                    column: #column,
                    roles: #roles,
                }
            })
        });

        quote! {
            #tabula::app::Model {
                name: #name.to_string(),
                table: #tabula::app::TableAttr {
                    name: #table_name,
                    schema: #table_schema,
                    catalog: #table_catalog,
                },
                fields: vec![ #( #fields, )* ],
            }
        }
    }

    fn expand_get_arms(&self) -> Vec<TokenStream> {
        let tabula = &self.tabula;

        self.record
            .fields
            .iter()
            .filter(|field| matches!(field.ty, FieldTy::Column { .. }))
            .map(|field| {
                let ident = &field.ident;
                let name = &field.name;

                quote! {
                    #name => Some(#tabula::Primitive::to_value(&self.#ident)),
                }
            })
            .collect()
    }

    fn expand_set_arms(&self) -> Vec<TokenStream> {
        let tabula = &self.tabula;
        let record_name = self.record.ident.to_string();

        self.record
            .fields
            .iter()
            .filter_map(|field| {
                let FieldTy::Column { ty, .. } = &field.ty else {
                    return None;
                };

                let ident = &field.ident;
                let name = &field.name;

                Some(quote! {
                    #name => {
                        self.#ident = <#ty as #tabula::Primitive>::load(value)
                            .map_err(|err| #tabula::property_error(err, #record_name, #name))?;
                        Ok(())
                    }
                })
            })
            .collect()
    }

    fn expand_relation_arms(&self) -> Vec<TokenStream> {
        let tabula = &self.tabula;

        self.record
            .fields
            .iter()
            .filter(|field| matches!(field.ty, FieldTy::Relation))
            .map(|field| {
                let ident = &field.ident;
                let name = &field.name;

                quote! {
                    #name => Some(#tabula::RelationField::relation_mut(&mut self.#ident)),
                }
            })
            .collect()
    }
}

fn option_lit(lit: Option<&syn::LitStr>) -> TokenStream {
    match lit {
        Some(lit) => quote!(Some(#lit.to_string())),
        None => quote!(None),
    }
}
