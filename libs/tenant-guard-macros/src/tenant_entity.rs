use heck::ToUpperCamelCase;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Data, DeriveInput, spanned::Spanned};

/// Tenant decision parsed from `#[tenant(...)]`
#[derive(Debug, PartialEq, Eq)]
pub enum TenantDecision {
    Column(String),
    Global,
}

#[derive(Default)]
struct TenantConfig {
    col: Option<(String, Span)>,
    global: Option<Span>,
}

pub fn expand_derive_tenant_entity(input: &DeriveInput) -> syn::Result<TokenStream> {
    let decision = parse_tenant_decision(input)?;
    let entity_ident = syn::Ident::new("Entity", input.ident.span());

    let tokens = match decision {
        TenantDecision::Global => quote! {
            impl ::tenant_guard::TenantEntity for #entity_ident {
                const IS_GLOBAL: bool = true;

                fn tenant_col() -> ::core::option::Option<Self::Column> {
                    ::core::option::Option::None
                }
            }
        },
        TenantDecision::Column(col_name) => {
            let col_ident = syn::Ident::new(&snake_to_upper_camel(&col_name), input.ident.span());
            quote! {
                impl ::tenant_guard::TenantEntity for #entity_ident {
                    const IS_GLOBAL: bool = false;

                    fn tenant_col() -> ::core::option::Option<Self::Column> {
                        ::core::option::Option::Some(Self::Column::#col_ident)
                    }
                }
            }
        }
    };
    Ok(tokens)
}

/// Parse and validate the `#[tenant(...)]` attributes of a struct.
pub fn parse_tenant_decision(input: &DeriveInput) -> syn::Result<TenantDecision> {
    if !matches!(&input.data, Data::Struct(_)) {
        return Err(syn::Error::new(
            input.span(),
            "#[derive(TenantEntity)] can only be applied to structs",
        ));
    }

    let config = parse_tenant_attrs(input)?;

    match (config.col, config.global) {
        (Some((col, _)), None) => Ok(TenantDecision::Column(col)),
        (None, Some(_)) => Ok(TenantDecision::Global),
        (Some((_, col_span)), Some(_)) => Err(syn::Error::new(
            col_span,
            "tenant: specify either `col` or `global`, not both",
        )),
        (None, None) => Err(syn::Error::new(
            input.ident.span(),
            "tenant: missing explicit decision:\n  use `#[tenant(col = \"column_name\")]` or `#[tenant(global)]`",
        )),
    }
}

fn parse_tenant_attrs(input: &DeriveInput) -> syn::Result<TenantConfig> {
    let mut config = TenantConfig::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("tenant") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let span = meta.path.span();

            if meta.path.is_ident("global") {
                if config.global.is_some() {
                    return Err(syn::Error::new(span, "duplicate attribute 'global'"));
                }
                config.global = Some(span);
                return Ok(());
            }

            if meta.path.is_ident("col") {
                if config.col.is_some() {
                    return Err(syn::Error::new(span, "duplicate attribute 'col'"));
                }
                let lit: syn::LitStr = meta
                    .value()
                    .and_then(|v| v.parse())
                    .map_err(|_| syn::Error::new(span, "expected `col = \"column_name\"`"))?;
                let value = lit.value();
                if value.is_empty() {
                    return Err(syn::Error::new(lit.span(), "tenant column name is empty"));
                }
                config.col = Some((value, span));
                return Ok(());
            }

            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();
            Err(syn::Error::new(
                span,
                format!("Unknown attribute '{key}'. Valid attributes: col, global"),
            ))
        })?;
    }

    Ok(config)
}

/// Convert `snake_case` to `UpperCamelCase` for enum variant names
fn snake_to_upper_camel(s: &str) -> String {
    s.to_upper_camel_case()
}
