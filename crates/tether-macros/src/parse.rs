//! AST parsing for the derive macro.
//!
//! This module transforms `syn::DeriveInput` into our intermediate representation.

use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields};

use crate::ir::{Bound, LimitRef, ParameterAttributes, ParameterFieldIR, ParameterKind, ParametersIR};
use crate::literal;

/// Parse a `DeriveInput` into our intermediate representation.
pub fn parse(input: DeriveInput) -> syn::Result<ParametersIR> {
    // Ensure it's a struct with named fields
    let data_struct = match &input.data {
        Data::Struct(s) => s,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] only supports structs, not enums",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] only supports structs, not unions",
            ))
        }
    };

    let fields = match &data_struct.fields {
        Fields::Named(named) => &named.named,
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] only supports structs with named fields",
            ))
        }
        Fields::Unit => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] requires at least one field",
            ))
        }
    };

    let mut parsed_fields = Vec::new();
    for field in fields {
        if let Some(field_ir) = parse_field(field)? {
            parsed_fields.push(field_ir);
        }
        // Fields without #[parameter] are silently ignored
    }

    if parsed_fields.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "#[derive(Parameters)] requires at least one #[parameter] field",
        ));
    }

    Ok(ParametersIR {
        struct_name: input.ident.clone(),
        generics: input.generics.clone(),
        fields: parsed_fields,
    })
}

/// Parse a single field, returning None if it has no `#[parameter]` attribute.
fn parse_field(field: &Field) -> syn::Result<Option<ParameterFieldIR>> {
    if let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("parameter")) {
        return parse_parameter_field(field, attr).map(Some);
    }

    // A field that LOOKS like a parameter but lacks the attribute is a mistake
    if let Some((kind, _)) = extract_parameter_type(&field.ty)? {
        return Err(syn::Error::new_spanned(
            field,
            format!("{} field is missing #[parameter] attribute", kind.type_name()),
        ));
    }

    Ok(None)
}

/// Parse a field with a `#[parameter]` or `#[parameter(...)]` attribute.
fn parse_parameter_field(field: &Field, attr: &syn::Attribute) -> syn::Result<ParameterFieldIR> {
    let field_name = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Field must have a name"))?;

    let (kind, arity) = extract_parameter_type(&field.ty)?.ok_or_else(|| {
        syn::Error::new_spanned(
            &field.ty,
            "#[parameter] can only be used on Long, Float or Buffer fields, or arrays of them",
        )
    })?;

    let mut attributes = ParameterAttributes::default();

    // Bare `#[parameter]` takes every default
    if !matches!(attr.meta, syn::Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: syn::LitStr = meta.value()?.parse()?;
                attributes.name = Some(value.value());
            } else if meta.path.is_ident("default") {
                let expr: syn::Expr = meta.value()?.parse()?;
                attributes.default = Some((literal::eval_default_expr(&expr)?, expr.span()));
            } else if meta.path.is_ident("min") {
                attributes.min = Some(parse_bound(&meta)?);
            } else if meta.path.is_ident("max") {
                attributes.max = Some(parse_bound(&meta)?);
            } else if meta.path.is_ident("fixed") {
                attributes.fixed = parse_flag(&meta)?;
            } else if meta.path.is_ident("power_of_two") {
                attributes.power_of_two = parse_flag(&meta)?;
            } else if meta.path.is_ident("odd") {
                attributes.odd = parse_flag(&meta)?;
            } else if meta.path.is_ident("ascending") {
                attributes.ascending = parse_flag(&meta)?;
            } else if meta.path.is_ident("lower_limit") {
                attributes.lower_limit = Some(parse_limit(&meta)?);
            } else if meta.path.is_ident("upper_limit") {
                attributes.upper_limit = Some(parse_limit(&meta)?);
            } else {
                return Err(meta.error(
                    "unknown attribute. Expected: name, default, min, max, fixed, power_of_two, odd, ascending, lower_limit, upper_limit",
                ));
            }
            Ok(())
        })?;
    }

    Ok(ParameterFieldIR {
        field_name,
        kind,
        arity,
        attributes,
        span: field.span(),
    })
}

/// Parse a flag: `fixed` or `fixed = true`.
fn parse_flag(meta: &syn::meta::ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(syn::Token![=]) {
        let value: syn::LitBool = meta.value()?.parse()?;
        Ok(value.value())
    } else {
        Ok(true)
    }
}

/// Parse a numeric bound from `min = <literal>`.
fn parse_bound(meta: &syn::meta::ParseNestedMeta) -> syn::Result<Bound> {
    let expr: syn::Expr = meta.value()?.parse()?;
    let value = literal::eval_literal_expr(&expr)?.as_f64();
    Ok(Bound {
        value,
        span: expr.span(),
    })
}

/// Parse a field reference from `lower_limit = "field"`.
fn parse_limit(meta: &syn::meta::ParseNestedMeta) -> syn::Result<LimitRef> {
    let value: syn::LitStr = meta.value()?.parse()?;
    Ok(LimitRef {
        field: value.value(),
        span: value.span(),
    })
}

/// Extract kind and arity from `Long`, `Float`, `Buffer` or `[T; N]`.
///
/// Returns `Ok(None)` for types that are not parameter types.
fn extract_parameter_type(ty: &syn::Type) -> syn::Result<Option<(ParameterKind, usize)>> {
    match ty {
        syn::Type::Array(array) => {
            let Some(kind) = scalar_kind(&array.elem) else {
                return Ok(None);
            };
            let arity = match literal::eval_literal_expr(&array.len)? {
                literal::LiteralValue::Int(n) if n >= 0 => n as usize,
                _ => {
                    return Err(syn::Error::new_spanned(
                        &array.len,
                        "array length must be a non-negative integer literal",
                    ))
                }
            };
            Ok(Some((kind, arity)))
        }
        _ => Ok(scalar_kind(ty).map(|kind| (kind, 1))),
    }
}

/// Match the last path segment against the parameter marker types.
fn scalar_kind(ty: &syn::Type) -> Option<ParameterKind> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    match segment.ident.to_string().as_str() {
        "Long" => Some(ParameterKind::Long),
        "Float" => Some(ParameterKind::Float),
        "Buffer" => Some(ParameterKind::Buffer),
        _ => None,
    }
}
