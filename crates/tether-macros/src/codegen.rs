//! Code generation for the derive macro.
//!
//! This module generates the typed key constants and the `Parameters` trait
//! implementation from the validated IR.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::ir::{ParameterFieldIR, ParameterKind, ParametersIR};

/// Generate all code for the derive macro.
pub fn generate(ir: &ParametersIR) -> TokenStream {
    let const_keys = generate_const_keys(ir);
    let parameters_impl = generate_parameters_impl(ir);

    quote! {
        #const_keys
        #parameters_impl
    }
}

/// Generate a typed `ParamKey` constant for each parameter.
fn generate_const_keys(ir: &ParametersIR) -> TokenStream {
    let struct_name = &ir.struct_name;

    let const_defs = ir.fields.iter().enumerate().map(|(index, field)| {
        let const_name = field.const_name();
        let ty = kind_type(field.kind);
        let doc = format!("Key for the `{}` parameter.", field.name());
        quote! {
            #[doc = #doc]
            pub const #const_name: ::tether::core::ParamKey<#ty> = ::tether::core::ParamKey::new(#index);
        }
    });

    quote! {
        impl #struct_name {
            #(#const_defs)*
        }
    }
}

/// Generate the `Parameters` trait implementation with a static descriptor table.
fn generate_parameters_impl(ir: &ParametersIR) -> TokenStream {
    let struct_name = &ir.struct_name;
    let count = ir.fields.len();

    let constraint_consts = ir.fields.iter().enumerate().map(|(index, field)| {
        let const_name = format_ident!("CONSTRAINTS_{}", index);
        let constraints = generate_constraints(ir, field);
        quote! {
            const #const_name: &[::tether::core::Constraint] = &[#(#constraints),*];
        }
    });

    let descriptors = ir.fields.iter().enumerate().map(|(index, field)| {
        let constraints = format_ident!("CONSTRAINTS_{}", index);
        let base = generate_descriptor(field);
        let fixed = if field.attributes.fixed {
            quote! { .fixed() }
        } else {
            quote! {}
        };
        quote! {
            #base #fixed .with_constraints(#constraints)
        }
    });

    quote! {
        impl ::tether::core::Parameters for #struct_name {
            fn descriptors() -> &'static [::tether::core::ParameterDescriptor] {
                #(#constraint_consts)*
                static DESCRIPTORS: [::tether::core::ParameterDescriptor; #count] = [
                    #(#descriptors),*
                ];
                &DESCRIPTORS
            }
        }
    }
}

/// Generate the descriptor constructor call for one parameter.
fn generate_descriptor(field: &ParameterFieldIR) -> TokenStream {
    let name = field.name();
    match field.kind {
        ParameterKind::Long => {
            let defaults = (0..field.arity).map(|i| {
                let value = field.default_at(i).map_or(0, |v| v.as_f64() as i64);
                quote! { #value }
            });
            quote! { ::tether::core::ParameterDescriptor::longs(#name, [#(#defaults),*]) }
        }
        ParameterKind::Float => {
            let defaults = (0..field.arity).map(|i| {
                let value = field.default_at(i).map_or(0.0, |v| v.as_f64());
                quote! { #value }
            });
            quote! { ::tether::core::ParameterDescriptor::floats(#name, [#(#defaults),*]) }
        }
        ParameterKind::Buffer => {
            quote! { ::tether::core::ParameterDescriptor::buffer(#name) }
        }
    }
}

/// Constraint rules in application order.
fn generate_constraints(ir: &ParametersIR, field: &ParameterFieldIR) -> Vec<TokenStream> {
    let attrs = &field.attributes;
    let mut out = Vec::new();

    if let Some(min) = attrs.min {
        let value = min.value;
        out.push(quote! { ::tether::core::Constraint::Min(#value) });
    }
    if let Some(max) = attrs.max {
        let value = max.value;
        out.push(quote! { ::tether::core::Constraint::Max(#value) });
    }
    if attrs.power_of_two {
        out.push(quote! { ::tether::core::Constraint::PowerOfTwo });
    }
    if attrs.odd {
        out.push(quote! { ::tether::core::Constraint::Odd });
    }
    // Targets were checked during validation
    if let Some(index) = attrs.lower_limit.as_ref().and_then(|l| ir.index_of(&l.field)) {
        out.push(quote! { ::tether::core::Constraint::LowerLimit(#index) });
    }
    if let Some(index) = attrs.upper_limit.as_ref().and_then(|l| ir.index_of(&l.field)) {
        out.push(quote! { ::tether::core::Constraint::UpperLimit(#index) });
    }
    if attrs.ascending {
        out.push(quote! { ::tether::core::Constraint::Ascending });
    }

    out
}

fn kind_type(kind: ParameterKind) -> TokenStream {
    match kind {
        ParameterKind::Long => quote! { ::tether::core::Long },
        ParameterKind::Float => quote! { ::tether::core::Float },
        ParameterKind::Buffer => quote! { ::tether::core::Buffer },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn test_generates_keys_and_constraints() {
        let ir = parse(syn::parse_quote! {
            struct Params {
                #[parameter(default = 1, min = 1)]
                low: Long,
                #[parameter(default = 4, lower_limit = "low", odd)]
                high: Long,
            }
        })
        .unwrap();
        let tokens = generate(&ir).to_string();
        assert!(tokens.contains("pub const LOW"));
        assert!(tokens.contains("1usize"));

        let odd = tokens.find("Odd").unwrap();
        let limit = tokens.find("LowerLimit").unwrap();
        assert!(odd < limit);
    }
}
