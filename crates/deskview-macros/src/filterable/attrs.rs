//! Attribute parsing for the Filterable derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// How a field takes part in filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Single categorical value: `#[filter(category)]`
    Category,
    /// List of categorical values: `#[filter(tags)]`
    Tags,
    /// Calendar date: `#[filter(date)]`
    Date,
    /// Number: `#[filter(number)]`
    Number,
}

impl FilterKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "category" => Some(FilterKind::Category),
            "tags" => Some(FilterKind::Tags),
            "date" => Some(FilterKind::Date),
            "number" => Some(FilterKind::Number),
            _ => None,
        }
    }
}

/// Field-level attributes from `#[filter(...)]`.
#[derive(Debug, Clone)]
pub struct FilterAttr {
    /// The dimension kind, if the field is a dimension.
    pub kind: Option<FilterKind>,
    /// Include the field in free-text search.
    pub search: bool,
    /// Exclude the field entirely.
    pub skip: bool,
    /// Custom dimension name (default: field name).
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for FilterAttr {
    fn default() -> Self {
        FilterAttr {
            kind: None,
            search: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for FilterAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FilterAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    let ident = p.get_ident().ok_or_else(|| {
                        Error::new(
                            p.span(),
                            "expected one of: category, tags, date, number, search, skip",
                        )
                    })?;
                    let name = ident.to_string();
                    if name == "skip" {
                        attr.skip = true;
                    } else if name == "search" {
                        attr.search = true;
                    } else if let Some(kind) = FilterKind::from_name(&name) {
                        if attr.kind.is_some() {
                            return Err(Error::new(
                                ident.span(),
                                "a field can only have one dimension kind",
                            ));
                        }
                        attr.kind = Some(kind);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            ident.span(),
                            format!(
                                "unknown filter attribute: '{}'. Expected one of: category, tags, date, number, search, skip",
                                name
                            ),
                        ));
                    }
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
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
                        "unknown filter attribute. Expected: category, tags, date, number, search, skip, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && (attr.kind.is_some() || attr.search) {
            return Err(Error::new(
                attr.span,
                "skip cannot be combined with other filter attributes",
            ));
        }
        if attr.search && matches!(attr.kind, Some(FilterKind::Date | FilterKind::Number)) {
            return Err(Error::new(
                attr.span,
                "search only applies to text fields",
            ));
        }
        if attr.rename.is_some() && attr.kind.is_none() {
            return Err(Error::new(
                attr.span,
                "rename requires a dimension kind",
            ));
        }

        Ok(attr)
    }
}

/// Extract `#[filter(...)]` attributes from a field's attributes.
pub fn parse_filter_attrs(attrs: &[Attribute]) -> Result<FilterAttr> {
    for attr in attrs {
        if attr.path().is_ident("filter") {
            return attr.parse_args::<FilterAttr>();
        }
    }
    Ok(FilterAttr::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_filter(tokens: &str) -> Result<FilterAttr> {
        syn::parse_str::<FilterAttr>(tokens)
    }

    #[test]
    fn test_filter_category() {
        let attr = parse_filter("category").unwrap();
        assert_eq!(attr.kind, Some(FilterKind::Category));
        assert!(!attr.search);
        assert!(!attr.skip);
    }

    #[test]
    fn test_filter_each_kind() {
        assert_eq!(parse_filter("tags").unwrap().kind, Some(FilterKind::Tags));
        assert_eq!(parse_filter("date").unwrap().kind, Some(FilterKind::Date));
        assert_eq!(parse_filter("number").unwrap().kind, Some(FilterKind::Number));
    }

    #[test]
    fn test_filter_search_only() {
        let attr = parse_filter("search").unwrap();
        assert!(attr.search);
        assert_eq!(attr.kind, None);
    }

    #[test]
    fn test_filter_category_and_search() {
        let attr = parse_filter("category, search").unwrap();
        assert_eq!(attr.kind, Some(FilterKind::Category));
        assert!(attr.search);
    }

    #[test]
    fn test_filter_rename() {
        let attr = parse_filter(r#"category, rename = "state""#).unwrap();
        assert_eq!(attr.rename, Some("state".to_string()));
    }

    #[test]
    fn test_filter_skip() {
        let attr = parse_filter("skip").unwrap();
        assert!(attr.skip);
    }

    #[test]
    fn test_filter_rejects_two_kinds() {
        let err = parse_filter("category, date").unwrap_err();
        assert!(err.to_string().contains("one dimension kind"));
    }

    #[test]
    fn test_filter_rejects_search_on_number() {
        assert!(parse_filter("number, search").is_err());
    }

    #[test]
    fn test_filter_rejects_skip_with_kind() {
        assert!(parse_filter("skip, category").is_err());
    }

    #[test]
    fn test_filter_rejects_rename_without_kind() {
        assert!(parse_filter(r#"search, rename = "x""#).is_err());
    }

    #[test]
    fn test_filter_invalid() {
        let err = parse_filter("bogus").unwrap_err();
        assert!(err.to_string().contains("unknown filter attribute"));
    }
}
