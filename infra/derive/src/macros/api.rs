use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{Attribute, ItemFn, ItemStruct, Lit, LitStr, Meta};

/// Expands the `#[api_model]` attribute macro.
///
/// Injects common derives (`Debug`, `Serialize`, `Deserialize`, `ToSchema`)
/// and the platform serde policy: camelCase field names, unknown fields
/// rejected.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let (rename_all, deny_unknown) = match parse_args(args) {
        Ok(parsed) => parsed,
        Err(err) => return err,
    };

    let existing = declared_serde_policy(&input.attrs);
    let derives = missing_derives(&input.attrs, &input.fields);

    let rename_attr = match &existing.rename_all {
        Some(lit) if lit.value() != rename_all.value() => {
            return syn::Error::new_spanned(
                lit,
                "Conflicting serde rename_all; remove it or set api_model(rename_all = \"...\") to match",
            )
            .to_compile_error();
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #rename_all)] },
    };

    let deny_attr = if existing.deny_unknown_fields {
        if !deny_unknown {
            return syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            )
            .to_compile_error();
        }
        quote! {}
    } else if deny_unknown {
        quote! { #[serde(deny_unknown_fields)] }
    } else {
        quote! {}
    };

    quote! {
        #derives
        #rename_attr
        #deny_attr
        #input
    }
}

/// Expands the `#[api_handler]` attribute macro.
///
/// Forwards the arguments to `utoipa::path` behind the consuming crate's
/// `server` feature while keeping the handler signature untouched.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let body = &input.block;
    let sig = &input.sig;
    let vis = &input.vis;
    let attrs = &input.attrs;

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #vis #sig {
            #body
        }
    }
}

fn parse_args(args: TokenStream) -> Result<(LitStr, bool), TokenStream> {
    let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
    let metas = parser.parse2(args).map_err(|err| err.to_compile_error())?;

    let mut rename_all: Option<LitStr> = None;
    let mut deny_unknown: Option<bool> = None;

    for meta in metas {
        let Meta::NameValue(nv) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "Expected name-value arguments like `rename_all = \"...\"`",
            )
            .to_compile_error());
        };

        if nv.path.is_ident("rename_all") {
            if rename_all.is_some() {
                return Err(duplicate(&nv));
            }
            rename_all = Some(string_literal(&nv, "rename_all")?);
        } else if nv.path.is_ident("deny_unknown_fields") {
            if deny_unknown.is_some() {
                return Err(duplicate(&nv));
            }
            deny_unknown = Some(bool_literal(&nv, "deny_unknown_fields")?);
        } else {
            return Err(syn::Error::new_spanned(
                nv.path,
                "Unsupported argument; expected rename_all or deny_unknown_fields",
            )
            .to_compile_error());
        }
    }

    let rename_all = rename_all
        .unwrap_or_else(|| LitStr::new("camelCase", proc_macro2::Span::call_site()));
    Ok((rename_all, deny_unknown.unwrap_or(true)))
}

fn duplicate(nv: &syn::MetaNameValue) -> TokenStream {
    syn::Error::new_spanned(nv, "Duplicate argument").to_compile_error()
}

fn string_literal(nv: &syn::MetaNameValue, label: &str) -> Result<LitStr, TokenStream> {
    if let syn::Expr::Lit(expr) = &nv.value
        && let Lit::Str(lit) = &expr.lit
    {
        return Ok(lit.clone());
    }
    Err(syn::Error::new_spanned(&nv.value, format!("{label} must be a string literal"))
        .to_compile_error())
}

fn bool_literal(nv: &syn::MetaNameValue, label: &str) -> Result<bool, TokenStream> {
    if let syn::Expr::Lit(expr) = &nv.value
        && let Lit::Bool(lit) = &expr.lit
    {
        return Ok(lit.value);
    }
    Err(syn::Error::new_spanned(&nv.value, format!("{label} must be a boolean literal"))
        .to_compile_error())
}

struct SerdePolicy {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

fn declared_serde_policy(attrs: &[Attribute]) -> SerdePolicy {
    let mut policy = SerdePolicy { rename_all: None, deny_unknown_fields: false };

    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value = meta.value()?;
                policy.rename_all = Some(value.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                policy.deny_unknown_fields = true;
            }
            Ok(())
        });
    }

    policy
}

fn missing_derives(attrs: &[Attribute], fields: &syn::Fields) -> TokenStream {
    let mut existing = fxhash::FxHashSet::default();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            continue;
        }
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(seg) = meta.path.segments.last() {
                existing.insert(seg.ident.to_string());
            }
            Ok(())
        });
    }

    let mut tokens = Vec::new();
    if !existing.contains("Debug") {
        tokens.push(quote! { Debug });
    }
    if !existing.contains("Serialize") {
        tokens.push(quote! { ::serde::Serialize });
    }
    // Borrowed fields make a blanket Deserialize impl unsatisfiable.
    let borrows = fields.iter().any(|field| matches!(field.ty, syn::Type::Reference(_)));
    if !existing.contains("Deserialize") && !borrows {
        tokens.push(quote! { ::serde::Deserialize });
    }

    let derive_attr =
        if tokens.is_empty() { quote! {} } else { quote! { #[derive(#(#tokens),*)] } };

    let schema_attr = if existing.contains("ToSchema") {
        quote! {}
    } else {
        quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] }
    };

    quote! {
        #derive_attr
        #schema_attr
    }
}
