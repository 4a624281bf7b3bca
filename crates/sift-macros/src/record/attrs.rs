//! Attribute parsing for the Record derive macro.
//!
//! This module provides the parser for the `#[sift(...)]` field attributes.

use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Field-level attributes from `#[sift(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SiftAttr {
    /// Hide this field from predicates.
    pub skip: bool,
    /// External field name (default: the Rust field name).
    pub rename: Option<String>,
}

impl Parse for SiftAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = SiftAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,

                // rename = "external_name"
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        if s.value().is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown sift attribute. Expected: skip or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Extract `#[sift(...)]` attributes from a field's attributes.
pub fn parse_sift_attrs(attrs: &[Attribute]) -> Result<SiftAttr> {
    for attr in attrs {
        if attr.path().is_ident("sift") {
            return attr.parse_args::<SiftAttr>();
        }
    }
    Ok(SiftAttr::default())
}
