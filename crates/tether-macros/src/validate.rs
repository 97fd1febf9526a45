//! Semantic validation for the derive macro.
//!
//! This module validates the parsed IR for semantic correctness.

use std::collections::HashMap;

use tether_utils::RESERVED_SELECTORS;

use crate::ir::{DefaultSpec, LimitRef, ParameterFieldIR, ParameterKind, ParametersIR};
use crate::literal::LiteralValue;

/// Largest number of elements a parameter value may hold.
const MAX_ARITY: usize = 8;

/// Validate the IR for semantic correctness.
pub fn validate(ir: &ParametersIR) -> syn::Result<()> {
    check_no_generics(ir)?;
    check_unique_selectors(ir)?;
    for (index, field) in ir.fields.iter().enumerate() {
        validate_field(ir, index, field)?;
    }
    Ok(())
}

fn check_no_generics(ir: &ParametersIR) -> syn::Result<()> {
    if ir.generics.params.is_empty() {
        Ok(())
    } else {
        Err(syn::Error::new_spanned(
            &ir.generics,
            "#[derive(Parameters)] does not support generic structs",
        ))
    }
}

/// Check that selectors are unique and don't shadow adapter commands.
fn check_unique_selectors(ir: &ParametersIR) -> syn::Result<()> {
    let mut seen: HashMap<String, &syn::Ident> = HashMap::new();

    for field in &ir.fields {
        let selector = field.selector();
        if RESERVED_SELECTORS.contains(&selector.as_str()) {
            return Err(syn::Error::new(
                field.span,
                format!("parameter name \"{}\" is reserved for an adapter message", field.name()),
            ));
        }
        if let Some(first_field) = seen.get(&selector) {
            return Err(syn::Error::new(
                field.span,
                format!(
                    "Duplicate parameter selector \"{}\": already used by field `{}`",
                    selector, first_field
                ),
            ));
        }
        seen.insert(selector, &field.field_name);
    }

    Ok(())
}

fn validate_field(ir: &ParametersIR, index: usize, field: &ParameterFieldIR) -> syn::Result<()> {
    let attrs = &field.attributes;

    if field.arity == 0 || field.arity > MAX_ARITY {
        return Err(syn::Error::new(
            field.span,
            format!("parameter arity must be between 1 and {}, got {}", MAX_ARITY, field.arity),
        ));
    }

    if field.kind == ParameterKind::Buffer {
        let constrained = attrs.min.is_some()
            || attrs.max.is_some()
            || attrs.power_of_two
            || attrs.odd
            || attrs.ascending
            || attrs.lower_limit.is_some()
            || attrs.upper_limit.is_some();
        if field.arity != 1 {
            return Err(syn::Error::new(field.span, "Buffer parameters hold a single reference"));
        }
        if let Some((_, span)) = &attrs.default {
            return Err(syn::Error::new(*span, "Buffer parameters have no default"));
        }
        if constrained {
            return Err(syn::Error::new(field.span, "Buffer parameters cannot have constraints"));
        }
        return Ok(());
    }

    if let Some((default, span)) = &attrs.default {
        if let DefaultSpec::Array(values) = default {
            if values.len() != field.arity {
                return Err(syn::Error::new(
                    *span,
                    format!(
                        "default has {} elements but the parameter has {}",
                        values.len(),
                        field.arity
                    ),
                ));
            }
        }
        if field.kind == ParameterKind::Long {
            let has_float = (0..field.arity)
                .filter_map(|i| field.default_at(i))
                .any(|v| matches!(v, LiteralValue::Float(_)));
            if has_float {
                return Err(syn::Error::new(*span, "Long parameter default must be an integer"));
            }
        }
    }

    if let (Some(min), Some(max)) = (attrs.min, attrs.max) {
        if min.value > max.value {
            return Err(syn::Error::new(
                max.span,
                format!("min ({}) must not exceed max ({})", min.value, max.value),
            ));
        }
    }

    if (attrs.power_of_two || attrs.odd) && field.kind != ParameterKind::Long {
        return Err(syn::Error::new(
            field.span,
            "power_of_two and odd only apply to Long parameters",
        ));
    }

    if attrs.ascending && field.arity < 2 {
        return Err(syn::Error::new(
            field.span,
            "ascending requires an array parameter",
        ));
    }

    for limit in [&attrs.lower_limit, &attrs.upper_limit].into_iter().flatten() {
        check_limit_target(ir, index, limit)?;
    }

    Ok(())
}

/// A limit must name another numeric parameter of the same struct.
fn check_limit_target(ir: &ParametersIR, index: usize, limit: &LimitRef) -> syn::Result<()> {
    let target = ir.index_of(&limit.field).ok_or_else(|| {
        syn::Error::new(limit.span, format!("unknown field `{}`", limit.field))
    })?;
    if target == index {
        return Err(syn::Error::new(limit.span, "a parameter cannot limit itself"));
    }
    if ir.fields[target].kind == ParameterKind::Buffer {
        return Err(syn::Error::new(
            limit.span,
            format!("`{}` is a Buffer and cannot be used as a limit", limit.field),
        ));
    }
    Ok(())
}
