//! The `#[object]` attribute.
//!
//! Expands an inherent impl block into itself plus an `Object` impl whose
//! member table lists the block's event methods.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Attribute, FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Token, Type,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

/// Arguments for the `#[object]` attribute.
pub(crate) struct ObjectArgs {
    /// Whether the type also has the subscriber capability.
    pub subscriber: bool,
}

impl Parse for ObjectArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut subscriber = false;

        let flags = Punctuated::<Ident, Token![,]>::parse_terminated(input)?;
        for flag in flags {
            match flag.to_string().as_str() {
                "subscriber" => subscriber = true,
                other => {
                    return Err(syn::Error::new(
                        flag.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }
        }

        Ok(ObjectArgs { subscriber })
    }
}

/// How the event payload reaches the method.
enum Payload<'a> {
    /// `&dyn EventArgs`, passed through unchanged.
    Erased,
    /// `&T`, downcast from the payload.
    Typed(&'a Type),
}

struct Member<'a> {
    ident: &'a Ident,
    payload: Payload<'a>,
}

/// Returns `true` and removes the attribute if `#[object(skip)]` is present.
fn take_skip(attrs: &mut Vec<Attribute>) -> syn::Result<bool> {
    let mut skip = false;
    let mut error = None;
    attrs.retain(|attr| {
        if !attr.path().is_ident("object") {
            return true;
        }
        match attr.parse_args::<Ident>() {
            Ok(ident) if ident == "skip" => skip = true,
            Ok(ident) => {
                error = Some(syn::Error::new(
                    ident.span(),
                    format!("unknown method attribute: {}", ident),
                ))
            }
            Err(e) => error = Some(e),
        }
        false
    });
    match error {
        Some(e) => Err(e),
        None => Ok(skip),
    }
}

/// Classifies a method as an event member, or `None` if it is not one.
fn member(method: &ImplItemFn) -> Option<Member<'_>> {
    let sig = &method.sig;
    if sig.asyncness.is_some() || !sig.generics.params.is_empty() || sig.inputs.len() != 2 {
        return None;
    }

    let receiver = sig.receiver()?;
    if receiver.reference.is_none() || receiver.mutability.is_some() {
        return None;
    }

    let FnArg::Typed(arg) = sig.inputs.iter().nth(1)? else {
        return None;
    };
    let Type::Reference(reference) = &*arg.ty else {
        return None;
    };
    if reference.mutability.is_some() {
        return None;
    }

    let payload = match &*reference.elem {
        Type::TraitObject(_) => Payload::Erased,
        elem => Payload::Typed(elem),
    };

    Some(Member {
        ident: &sig.ident,
        payload,
    })
}

pub(crate) fn expand(args: ObjectArgs, mut input: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[object] must be placed on an inherent impl block",
        ));
    }

    let mut skipped = Vec::new();
    for item in &mut input.items {
        if let ImplItem::Fn(method) = item {
            if take_skip(&mut method.attrs)? {
                skipped.push(method.sig.ident.clone());
            }
        }
    }

    let members: Vec<Member<'_>> = input
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(method) if !skipped.contains(&method.sig.ident) => member(method),
            _ => None,
        })
        .collect();

    let names: Vec<LitStr> = members
        .iter()
        .map(|m| LitStr::new(&m.ident.to_string(), m.ident.span()))
        .collect();

    let responds_to = if names.is_empty() {
        quote! { false }
    } else {
        quote! { ::core::matches!(method, #(#names)|*) }
    };

    let arms = members.iter().zip(&names).map(|(member, name)| {
        let ident = member.ident;
        match member.payload {
            Payload::Erased => quote! {
                #name => ::ormevents::IntoDispatchOutcome::into_outcome(self.#ident(args)),
            },
            Payload::Typed(ty) => quote! {
                #name => {
                    let args = args.downcast_ref::<#ty>().ok_or_else(|| {
                        ::ormevents::DispatchError::ArgsMismatch {
                            method: ::std::string::String::from(#name),
                            expected: ::core::any::type_name::<#ty>(),
                        }
                    })?;
                    ::ormevents::IntoDispatchOutcome::into_outcome(self.#ident(args))
                }
            },
        }
    });

    let as_subscriber = args.subscriber.then(|| {
        quote! {
            fn as_subscriber(
                self: ::std::sync::Arc<Self>,
            ) -> ::core::option::Option<::std::sync::Arc<dyn ::ormevents::EventSubscriber>> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #input

        impl #impl_generics ::ormevents::Object for #self_ty #where_clause {
            #[allow(unused_variables)]
            fn responds_to(&self, method: &str) -> bool {
                #responds_to
            }

            #[allow(unused_variables)]
            fn invoke(
                &self,
                method: &str,
                args: &dyn ::ormevents::EventArgs,
            ) -> ::core::result::Result<(), ::ormevents::BoxError> {
                match method {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::std::boxed::Box::new(
                        ::ormevents::DispatchError::UnknownMethod {
                            type_name: ::ormevents::Object::type_name(self),
                            method: ::std::borrow::ToOwned::to_owned(method),
                        },
                    )),
                }
            }

            #as_subscriber
        }
    };

    Ok(expanded)
}
