//! Implementation of the `#[derive(Filterable)]` macro.
//!
//! This macro generates an implementation of the `Filterable` trait and
//! dimension name constants for building queries without string typos.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_filter_attrs, FilterKind};

/// Main implementation of the Filterable derive macro.
pub fn filterable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Filterable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Filterable can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut dimension_entries: Vec<TokenStream> = Vec::new();
    let mut search_pushes: Vec<TokenStream> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_filter_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let optional = is_option(&field.ty);

        if attrs.search {
            search_pushes.push(search_push(field_name, attrs.kind, optional));
        }

        let kind = match attrs.kind {
            Some(kind) => kind,
            None => continue,
        };

        let dimension = attrs.rename.unwrap_or_else(|| field_name.to_string());
        if seen.contains(&dimension) {
            return Err(Error::new(
                field.span(),
                format!("dimension '{}' is declared more than once", dimension),
            ));
        }
        seen.push(dimension.clone());

        let const_name = format_ident!("{}", to_screaming_snake_case(&dimension));
        field_constants.push(quote! {
            /// Dimension name constant for building queries.
            pub const #const_name: &'static str = #dimension;
        });

        let kind_tokens = match kind {
            FilterKind::Category | FilterKind::Tags => {
                quote! { ::deskview_query::DimensionKind::Category }
            }
            FilterKind::Date => quote! { ::deskview_query::DimensionKind::Date },
            FilterKind::Number => quote! { ::deskview_query::DimensionKind::Number },
        };
        dimension_entries.push(quote! {
            ::deskview_query::Dimension { name: #dimension, kind: #kind_tokens },
        });

        let value = value_expr(kind, quote! { value });
        let arm = if optional {
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(value) => #value,
                    ::core::option::Option::None => ::deskview_query::FieldValue::None,
                }
            }
        } else {
            quote! {
                {
                    let value = &self.#field_name;
                    #value
                }
            }
        };
        field_matches.push(quote! {
            #dimension => #arm,
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::deskview_query::Filterable for #struct_name #ty_generics #where_clause {
            fn facet_value(&self, dimension: &str) -> ::deskview_query::FieldValue<'_> {
                match dimension {
                    #(#field_matches)*
                    _ => ::deskview_query::FieldValue::None,
                }
            }

            fn search_terms(&self) -> ::std::vec::Vec<::std::borrow::Cow<'_, str>> {
                #[allow(unused_mut)]
                let mut terms = ::std::vec::Vec::new();
                #(#search_pushes)*
                terms
            }

            fn dimensions() -> &'static [::deskview_query::Dimension] {
                &[#(#dimension_entries)*]
            }
        }
    };

    Ok(expanded)
}

/// The `FieldValue` for a reference `value` to the field's (inner) type.
fn value_expr(kind: FilterKind, value: TokenStream) -> TokenStream {
    match kind {
        FilterKind::Category => quote! {
            ::deskview_query::FieldValue::Text(::deskview_query::FacetText::facet_text(#value))
        },
        FilterKind::Tags => quote! {
            ::deskview_query::FieldValue::List(
                #value
                    .iter()
                    .map(|item| ::deskview_query::FacetText::facet_text(item))
                    .collect(),
            )
        },
        FilterKind::Date => quote! {
            ::deskview_query::FieldValue::Date(::deskview_query::FacetDate::facet_date(#value))
        },
        FilterKind::Number => quote! {
            ::deskview_query::FieldValue::Number(::deskview_query::Number::from(*#value))
        },
    }
}

fn search_push(field_name: &syn::Ident, kind: Option<FilterKind>, optional: bool) -> TokenStream {
    let push = match kind {
        Some(FilterKind::Tags) => quote! {
            terms.extend(value.iter().map(|item| ::deskview_query::FacetText::facet_text(item)));
        },
        _ => quote! {
            terms.push(::deskview_query::FacetText::facet_text(value));
        },
    };
    if optional {
        quote! {
            if let ::core::option::Option::Some(value) = &self.#field_name {
                #push
            }
        }
    } else {
        quote! {
            {
                let value = &self.#field_name;
                #push
            }
        }
    }
}

/// Returns `true` for `Option<T>` (also spelled with a path prefix).
fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(segment) = path.path.segments.last() else {
        return false;
    };
    if segment.ident != "Option" {
        return false;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) => {
            args.args.len() == 1 && matches!(args.args.first(), Some(GenericArgument::Type(_)))
        }
        _ => false,
    }
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
