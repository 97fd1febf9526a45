//! Compile-time evaluation of numeric literals in parameter attributes.
//!
//! This module extracts numeric values from `syn::Expr` nodes used for
//! defaults and bounds (e.g., `-60.0`, `1024`, `[0.0, 1.0]`).

use syn::spanned::Spanned;

use crate::ir::DefaultSpec;

/// A numeric literal value extracted from a syn expression.
#[derive(Debug, Clone, Copy)]
pub enum LiteralValue {
    Float(f64),
    Int(i64),
}

impl LiteralValue {
    /// Convert to f64, casting integers if needed.
    pub fn as_f64(self) -> f64 {
        match self {
            LiteralValue::Float(f) => f,
            LiteralValue::Int(i) => i as f64,
        }
    }
}

/// Evaluate a literal expression to extract its numeric value.
///
/// Handles:
/// - Float literals: `60.0`, `0.5`
/// - Integer literals: `60`, `127`
/// - Negative expressions: `-60.0`, `-24`
///
/// # Errors
///
/// Returns an error if the expression is not a numeric literal or negated literal.
pub fn eval_literal_expr(expr: &syn::Expr) -> syn::Result<LiteralValue> {
    match expr {
        // Direct literal: 60.0, 127
        syn::Expr::Lit(lit) => eval_lit(&lit.lit),

        // Negation: -60.0, -24
        syn::Expr::Unary(unary) if matches!(unary.op, syn::UnOp::Neg(_)) => {
            let inner = eval_literal_expr(&unary.expr)?;
            Ok(match inner {
                LiteralValue::Float(f) => LiteralValue::Float(-f),
                LiteralValue::Int(i) => LiteralValue::Int(-i),
            })
        }

        // Group expression: (60.0)
        syn::Expr::Paren(paren) => eval_literal_expr(&paren.expr),

        _ => Err(syn::Error::new(
            expr.span(),
            "expected numeric literal (e.g., `60.0`, `-24`)",
        )),
    }
}

/// Evaluate a syn::Lit to a LiteralValue.
fn eval_lit(lit: &syn::Lit) -> syn::Result<LiteralValue> {
    match lit {
        syn::Lit::Float(f) => {
            let value: f64 = f.base10_parse().map_err(|e| {
                syn::Error::new(f.span(), format!("invalid float literal: {}", e))
            })?;
            Ok(LiteralValue::Float(value))
        }
        syn::Lit::Int(i) => {
            let value: i64 = i.base10_parse().map_err(|e| {
                syn::Error::new(i.span(), format!("invalid integer literal: {}", e))
            })?;
            Ok(LiteralValue::Int(value))
        }
        _ => Err(syn::Error::new(
            lit.span(),
            "expected float or integer literal",
        )),
    }
}

/// Evaluate a default: a single literal or an array of literals.
pub fn eval_default_expr(expr: &syn::Expr) -> syn::Result<DefaultSpec> {
    match expr {
        syn::Expr::Array(array) => {
            let values = array
                .elems
                .iter()
                .map(eval_literal_expr)
                .collect::<syn::Result<Vec<_>>>()?;
            if values.is_empty() {
                return Err(syn::Error::new(array.span(), "default array is empty"));
            }
            Ok(DefaultSpec::Array(values))
        }
        _ => eval_literal_expr(expr).map(DefaultSpec::Scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negated_and_grouped_literals() {
        let expr: syn::Expr = syn::parse_quote!(-(24));
        assert!(matches!(eval_literal_expr(&expr).unwrap(), LiteralValue::Int(-24)));

        let expr: syn::Expr = syn::parse_quote!(-60.5);
        assert_eq!(eval_literal_expr(&expr).unwrap().as_f64(), -60.5);
    }

    #[test]
    fn test_rejects_non_literals() {
        let expr: syn::Expr = syn::parse_quote!(SOME_CONST);
        assert!(eval_literal_expr(&expr).is_err());
    }

    #[test]
    fn test_default_array() {
        let expr: syn::Expr = syn::parse_quote!([1, 2, -3]);
        match eval_default_expr(&expr).unwrap() {
            DefaultSpec::Array(values) => assert_eq!(values.len(), 3),
            DefaultSpec::Scalar(_) => panic!("expected array"),
        }
    }
}
