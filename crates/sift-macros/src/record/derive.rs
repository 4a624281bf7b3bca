//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `Record` trait and
//! field name constants for building predicates.

use std::collections::HashMap;

use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result, Visibility};

use super::attrs::parse_sift_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_defs: Vec<TokenStream> = Vec::new();
    let mut value_arms: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    // lower-cased external name -> declared name, and constant -> external name
    let mut seen_names: HashMap<String, String> = HashMap::new();
    let mut seen_constants: HashMap<String, String> = HashMap::new();

    for (position, field) in fields.iter().enumerate() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
        let declared = field_name.to_string();
        let ty = &field.ty;

        let sift_attrs = parse_sift_attrs(&field.attrs)?;

        // Only `pub` fields without #[sift(skip)] take part in filtering
        let visible = matches!(field.vis, Visibility::Public(_)) && !sift_attrs.skip;

        if !visible {
            let type_name = ty.to_token_stream().to_string().replace(' ', "");
            field_defs.push(quote! {
                ::sift::FieldDef::hidden(#declared, #type_name)
            });
            continue;
        }

        let external = sift_attrs.rename.clone().unwrap_or_else(|| declared.clone());

        if let Some(other) = seen_names.insert(external.to_lowercase(), external.clone()) {
            return Err(Error::new(
                field_name.span(),
                format!(
                    "field name '{}' collides with '{}' (record field names are case-insensitive)",
                    external, other
                ),
            ));
        }

        let const_name = to_screaming_snake_case(&external);
        if let Some(other) = seen_constants.insert(const_name.clone(), external.clone()) {
            return Err(Error::new(
                field_name.span(),
                format!(
                    "field names '{}' and '{}' both map to the constant {}",
                    other, external, const_name
                ),
            ));
        }
        // Names that cannot form an identifier get no constant
        if syn::parse_str::<syn::Ident>(&const_name).is_ok() {
            let const_ident = format_ident!("{}", const_name);
            field_constants.push(quote! {
                /// Field name constant for building predicates.
                pub const #const_ident: &'static str = #external;
            });
        }

        let def = match &sift_attrs.rename {
            Some(rename) => quote! {
                ::sift::FieldDef::new(#declared, <#ty as ::sift::FieldValue>::field_type())
                    .rename(#rename)
            },
            None => quote! {
                ::sift::FieldDef::new(#declared, <#ty as ::sift::FieldValue>::field_type())
            },
        };
        field_defs.push(def);

        value_arms.push(quote! {
            #position => ::core::option::Option::Some(
                ::sift::FieldValue::to_value(&self.#field_name)
            ),
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::sift::Record for #struct_name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::sift::FieldDef> {
                ::std::vec![#(#field_defs),*]
            }

            fn field_value(&self, position: usize) -> ::core::option::Option<::sift::Value<'_>> {
                match position {
                    #(#value_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}
