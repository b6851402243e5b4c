//! `#[timed]`: log how long a function takes to run.
//!
//! The signature is inspected once, at expansion:
//!
//! - `async fn` bodies are timed across every `.await` until they resolve,
//!   plain bodies around the call;
//! - a return type spelled `Result<..>` reports `Err` values as an error line
//!   instead of a timing line, rendered with `error_text!` so any error type
//!   works;
//! - methods with a `self` receiver record the receiver type as owner.
//!
//! The generated code calls into the `time_executioner` crate, which
//! re-exports this macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::format_ident;
use quote::quote;
use syn::Expr;
use syn::ExprLit;
use syn::GenericArgument;
use syn::ItemFn;
use syn::Lit;
use syn::MetaNameValue;
use syn::PathArguments;
use syn::ReturnType;
use syn::Token;
use syn::Type;
use syn::parse::Parse;
use syn::parse::ParseStream;
use syn::parse_macro_input;
use syn::punctuated::Punctuated;

/// Time every call of the annotated function and log it.
///
/// ```ignore
/// #[timed]
/// fn sync_method(&self, x: i32) -> i32 { x * 2 }
///
/// #[timed(log_level = "debug")]
/// async fn refresh(&self) -> Result<(), Error> { ... }
/// ```
///
/// `log_level` accepts debug, info (default), warning/warn, error and
/// critical/fatal in any case. Anything else fails to compile.
#[proc_macro_attribute]
pub fn timed(attr: TokenStream, item: TokenStream) -> TokenStream {
    let options = parse_macro_input!(attr as Options);
    let function = parse_macro_input!(item as ItemFn);
    match expand(&options, function) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    /// `Level` variant to emit at.
    level: &'static str,
}

impl Parse for Options {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;
        let mut level = None;
        for pair in pairs {
            if !pair.path.is_ident("log_level") {
                return Err(syn::Error::new_spanned(
                    &pair.path,
                    "unknown option, expected `log_level`",
                ));
            }
            if level.is_some() {
                return Err(syn::Error::new_spanned(
                    &pair.path,
                    "`log_level` given more than once",
                ));
            }
            let Expr::Lit(ExprLit {
                lit: Lit::Str(value),
                ..
            }) = &pair.value
            else {
                return Err(syn::Error::new_spanned(
                    &pair.value,
                    "`log_level` expects a string literal",
                ));
            };
            let name = value.value();
            let variant = level_variant(&name).ok_or_else(|| {
                syn::Error::new_spanned(
                    value,
                    format!(
                        "unknown log level {name:?}, expected debug, info, warning, error or critical"
                    ),
                )
            })?;
            level = Some(variant);
        }
        Ok(Self {
            level: level.unwrap_or("Info"),
        })
    }
}

/// Mirrors `Level::from_str` in `time_executioner`.
fn level_variant(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_lowercase().as_str() {
        "debug" => Some("Debug"),
        "info" => Some("Info"),
        "warning" | "warn" => Some("Warning"),
        "error" => Some("Error"),
        "critical" | "fatal" => Some("Critical"),
        _ => None,
    }
}

fn expand(options: &Options, function: ItemFn) -> syn::Result<TokenStream2> {
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = function;

    if let Some(constness) = &sig.constness {
        return Err(syn::Error::new_spanned(
            constness,
            "`#[timed]` cannot be used on a const fn",
        ));
    }

    let name = sig.ident.to_string();
    let level = format_ident!("{}", options.level);
    let owner = if sig.receiver().is_some() {
        quote! { .owner(::std::any::type_name::<Self>()) }
    } else {
        quote! {}
    };
    let timing = quote! {
        ::time_executioner::Timing::new(#name)
            .level(::time_executioner::Level::#level)
            #owner
    };

    let fallible = returns_result(&sig.output);
    let annotation = nameable_return_type(&sig.output);
    let render = quote! { |__timed_err| ::time_executioner::error_text!(__timed_err) };

    let body = if sig.asyncness.is_some() {
        let future = match annotation {
            Some(ty) => quote! {
                async move {
                    let __timed_ret: #ty = #block;
                    __timed_ret
                }
            },
            None => quote! { async move #block },
        };
        if fallible {
            quote! { #timing.try_call_async_with(#future, #render).await }
        } else {
            quote! { #timing.call_async(#future).await }
        }
    } else {
        let closure = match annotation {
            Some(ty) => quote! { move || -> #ty #block },
            None => quote! { move || #block },
        };
        if fallible {
            quote! { #timing.try_call_with(#closure, #render) }
        } else {
            quote! { #timing.call(#closure) }
        }
    };

    Ok(quote! {
        #(#attrs)*
        #vis #sig {
            #body
        }
    })
}

fn returns_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Path(path) => path
                .path
                .segments
                .last()
                .is_some_and(|segment| segment.ident == "Result"),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

/// The declared return type, if it can be written on a closure or `let`.
fn nameable_return_type(output: &ReturnType) -> Option<Type> {
    match output {
        ReturnType::Default => Some(syn::parse_quote!(())),
        ReturnType::Type(_, ty) if !contains_impl_trait(ty) => Some(ty.as_ref().clone()),
        ReturnType::Type(..) => None,
    }
}

fn contains_impl_trait(ty: &Type) -> bool {
    match ty {
        Type::ImplTrait(_) => true,
        Type::Array(array) => contains_impl_trait(&array.elem),
        Type::Group(group) => contains_impl_trait(&group.elem),
        Type::Paren(paren) => contains_impl_trait(&paren.elem),
        Type::Ptr(ptr) => contains_impl_trait(&ptr.elem),
        Type::Reference(reference) => contains_impl_trait(&reference.elem),
        Type::Slice(slice) => contains_impl_trait(&slice.elem),
        Type::Tuple(tuple) => tuple.elems.iter().any(contains_impl_trait),
        Type::Path(path) => path.path.segments.iter().any(|segment| {
            let PathArguments::AngleBracketed(args) = &segment.arguments else {
                return false;
            };
            args.args.iter().any(|arg| match arg {
                GenericArgument::Type(ty) => contains_impl_trait(ty),
                _ => false,
            })
        }),
        _ => false,
    }
}
