use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

mod object;

/// Implements `Object` for the type of an inherent impl block.
///
/// Every method taking `&self` and exactly one more argument becomes an
/// invocable member named after the method. The argument may be
/// `&dyn EventArgs` or a reference to a concrete payload type, which is
/// downcast on invocation.
///
/// - `#[object(subscriber)]` also grants the subscriber capability; the type
///   must implement `EventSubscriber`.
/// - `#[object(skip)]` on a method keeps it out of the member table.
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Timestamps;
///
/// #[ormevents::object]
/// impl Timestamps {
///     fn prePersist(&self, args: &LifecycleArgs) { ... }
/// }
/// ```
#[proc_macro_attribute]
pub fn object(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as object::ObjectArgs);
    let input = parse_macro_input!(item as ItemImpl);

    object::expand(args, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro registering a type in the global type registry.
///
/// The type must implement `Default` and `Object`. It can then be named in
/// configuration by its fully-qualified type name.
#[proc_macro_derive(Instantiable)]
pub fn derive_instantiable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &input.generics,
            "Instantiable types cannot be generic: a type name must identify one type",
        )
        .to_compile_error()
        .into();
    }

    let expanded = quote! {
        ::ormevents::register_type!(#name);
    };

    TokenStream::from(expanded)
}
