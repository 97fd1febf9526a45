//! Derive macros for the Tether host adapter.
//!
//! This crate provides the `#[derive(Parameters)]` macro, which turns a
//! declarative struct into a static parameter descriptor table plus typed
//! keys for reading values.
//!
//! # Example
//!
//! ```ignore
//! use tether::prelude::*;
//!
//! #[derive(Parameters)]
//! pub struct SlicerParameters {
//!     #[parameter(name = "FFTSize", default = 1024, min = 4, power_of_two, fixed)]
//!     pub fft_size: Long,
//!
//!     #[parameter(default = 0.5, min = 0.0, max = 1.0)]
//!     pub threshold: Float,
//!
//!     #[parameter(default = [0, 10], ascending)]
//!     pub range: [Long; 2],
//!
//!     #[parameter(name = "Source")]
//!     pub source: Buffer,
//! }
//!
//! // In a client:
//! let threshold = params.get(SlicerParameters::THRESHOLD);
//! ```

use proc_macro::TokenStream;

mod codegen;
mod ir;
mod literal;
mod parse;
mod validate;

/// Derive macro for implementing the `Parameters` trait.
///
/// Fields typed `Long`, `Float` or `Buffer` (or arrays `[T; N]` of the
/// numeric kinds) become parameters in declaration order. Other fields are
/// ignored.
///
/// This macro generates:
/// - One `ParamKey` constant per field, named after the field in upper case
/// - A `Parameters` implementation returning a static descriptor table
///
/// # Attributes
///
/// - `name = "..."` - Parameter name; the host selector is its lower-cased form.
///   Defaults to the field name.
/// - `default = ...` - Default value; a scalar is used for every element.
/// - `min = ...`, `max = ...` - Numeric bounds.
/// - `fixed` - Creation-only (set from positional arguments).
/// - `power_of_two`, `odd` - Integer rounding rules.
/// - `ascending` - Array elements must be non-decreasing.
/// - `lower_limit = "field"`, `upper_limit = "field"` - Bound by another parameter.
#[proc_macro_derive(Parameters, attributes(parameter))]
pub fn derive_parameters(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    match derive_parameters_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_parameters_impl(input: syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ir = parse::parse(input)?;
    validate::validate(&ir)?;
    Ok(codegen::generate(&ir))
}
