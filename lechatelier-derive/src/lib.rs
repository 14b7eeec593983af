//! Derive macros for the lechatelier reaction engine.
//!
//! This crate provides one derive macro:
//!
//! - [`ParticleType`] - Turns a unit enum into a compact, enumerable tag
//!
//! # Usage
//!
//! The macro is re-exported from the main `lechatelier` crate. You don't need
//! to add this crate directly:
//!
//! ```ignore
//! use lechatelier::prelude::*;
//!
//! #[derive(ParticleType, Clone, Copy, PartialEq, Eq, Debug)]
//! enum Species {
//!     A,
//!     B,
//!     C,
//! }
//! ```
//!
//! # The ParticleType Macro
//!
//! `#[derive(ParticleType)]` is used for species tags and reaction modes.
//!
//! It generates:
//! - `From<EnumName> for u32` - Convert enum to a compact integer tag
//! - `From<u32> for EnumName` - Convert back (defaults to first variant)
//! - `EnumName::count() -> u32` - Number of variants
//! - `EnumName::ALL` - Every variant in declaration order
//! - `EnumName::name(&self) -> &'static str` - The variant identifier

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derive macro for tag enums.
///
/// Variants are assigned sequential IDs starting from 0, in declaration order.
///
/// # Generated Items
///
/// For an enum `Species`:
///
/// - `impl From<Species> for u32` - Convert variant to integer
/// - `impl From<u32> for Species` - Convert integer to variant (invalid values default to first variant)
/// - `Species::count() -> u32` - Returns number of variants
/// - `Species::ALL: [Species; N]` - All variants, in declaration order
/// - `Species::name(&self) -> &'static str` - Variant identifier as text
///
/// # Requirements
///
/// - Must be an enum (not a struct)
/// - All variants must be unit variants (no fields)
/// - Enum must also derive `Clone` and `Copy` (`ALL` is a const array)
///
/// # Example
///
/// ```ignore
/// #[derive(ParticleType, Clone, Copy, PartialEq, Debug)]
/// enum Mode {
///     Concentration, // = 0
///     Temperature,   // = 1
/// }
///
/// let tag: u32 = Mode::Temperature.into(); // 1
/// assert_eq!(Mode::ALL.len(), 2);
/// assert_eq!(Mode::Temperature.name(), "Temperature");
/// ```
///
/// # Errors
///
/// Emits a compile error if:
/// - Applied to a struct or union instead of an enum
/// - Any variant has fields (tuple or struct variants)
/// - Enum has zero variants
#[proc_macro_derive(ParticleType)]
pub fn derive_particle_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_particle_type(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand_particle_type(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "ParticleType derive only supports enums",
            ))
        }
    };

    for variant in variants.iter() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                format!(
                    "ParticleType enum variants must be unit variants (no fields). \
                     Found fields on variant '{}'",
                    variant.ident
                ),
            ));
        }
    }

    let first_variant = match variants.first() {
        Some(v) => &v.ident,
        None => {
            return Err(syn::Error::new_spanned(
                name,
                "ParticleType enum must have at least one variant",
            ))
        }
    };

    let idents: Vec<_> = variants.iter().map(|v| &v.ident).collect();
    let indices: Vec<u32> = (0..idents.len() as u32).collect();
    let labels: Vec<String> = idents.iter().map(|id| id.to_string()).collect();
    let variant_count = idents.len() as u32;
    let array_len = idents.len();

    Ok(quote! {
        impl From<#name> for u32 {
            fn from(value: #name) -> u32 {
                match value {
                    #(#name::#idents => #indices),*
                }
            }
        }

        impl From<u32> for #name {
            fn from(value: u32) -> #name {
                match value {
                    #(#indices => #name::#idents,)*
                    _ => #name::#first_variant,
                }
            }
        }

        impl #name {
            /// Every variant, in declaration order.
            pub const ALL: [#name; #array_len] = [#(#name::#idents),*];

            /// Returns the number of variants in this enum.
            pub const fn count() -> u32 {
                #variant_count
            }

            /// Variant identifier as written in the enum declaration.
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name::#idents => #labels),*
                }
            }
        }
    })
}
