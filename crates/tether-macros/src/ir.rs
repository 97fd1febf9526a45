//! Intermediate representation for the derive macro.
//!
//! This module defines the data structures that represent a parsed
//! parameter schema, after AST parsing but before code generation.

use proc_macro2::Span;

use tether_utils::selector_name;

use crate::literal::LiteralValue;

/// Intermediate representation of a parameter schema struct.
pub struct ParametersIR {
    /// The struct name (e.g., `GainParameters`)
    pub struct_name: syn::Ident,
    /// Generic parameters, if any (rejected by validation)
    pub generics: syn::Generics,
    /// Parameter fields in declaration order
    pub fields: Vec<ParameterFieldIR>,
}

/// Value kind of a parameter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Long,
    Float,
    Buffer,
}

impl ParameterKind {
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Buffer => "Buffer",
        }
    }
}

/// Default value from `default = ...`.
pub enum DefaultSpec {
    /// One value, broadcast to every element.
    Scalar(LiteralValue),
    /// One value per element.
    Array(Vec<LiteralValue>),
}

/// A numeric bound from `min = ...` or `max = ...`.
#[derive(Debug, Clone, Copy)]
pub struct Bound {
    pub value: f64,
    pub span: Span,
}

/// A reference to another field from `lower_limit`/`upper_limit`.
pub struct LimitRef {
    pub field: String,
    pub span: Span,
}

/// Declarative attributes from `#[parameter(...)]`.
#[derive(Default)]
pub struct ParameterAttributes {
    pub name: Option<String>,
    pub default: Option<(DefaultSpec, Span)>,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    pub fixed: bool,
    pub power_of_two: bool,
    pub odd: bool,
    pub ascending: bool,
    pub lower_limit: Option<LimitRef>,
    pub upper_limit: Option<LimitRef>,
}

/// A parameter field.
pub struct ParameterFieldIR {
    /// Field name (e.g., `window_size`)
    pub field_name: syn::Ident,
    /// Value kind from the field type
    pub kind: ParameterKind,
    /// Element count: 1 for `Float`, N for `[Float; N]`
    pub arity: usize,
    /// Parsed attributes
    pub attributes: ParameterAttributes,
    /// Span for error reporting
    pub span: Span,
}

impl ParametersIR {
    /// Position of the field with this name.
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.field_name == field)
    }
}

impl ParameterFieldIR {
    /// Parameter name: explicit `name = "..."`, or the field name.
    pub fn name(&self) -> String {
        self.attributes
            .name
            .clone()
            .unwrap_or_else(|| self.field_name.to_string())
    }

    /// Host message selector for this parameter.
    pub fn selector(&self) -> String {
        selector_name(&self.name())
    }

    /// Key constant name, e.g. `window_size` -> `WINDOW_SIZE`.
    pub fn const_name(&self) -> syn::Ident {
        let name = self.field_name.to_string().to_uppercase();
        syn::Ident::new(&name, self.span)
    }

    /// Default for element `i`, if one was declared.
    pub fn default_at(&self, i: usize) -> Option<LiteralValue> {
        match &self.attributes.default {
            Some((DefaultSpec::Scalar(v), _)) => Some(*v),
            Some((DefaultSpec::Array(values), _)) => values.get(i).copied(),
            None => None,
        }
    }
}
