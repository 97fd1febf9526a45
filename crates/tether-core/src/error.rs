//! Error types for the Tether adapter.

use std::fmt;

use crate::parameter_types::ParamKind;

/// Errors raised by the adapter.
///
/// Only [`AdapterError::Configuration`] is fatal to an instance; everything
/// else reports host misuse of a message or API and leaves the instance usable.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterError {
    /// A client violated a configuration invariant (e.g. both audio and control outputs).
    Configuration(String),
    /// The host sent a message the class does not respond to.
    UnknownSelector(String),
    /// No parameter with this name or index.
    UnknownParameter(String),
    /// A value of the wrong kind was written to a parameter.
    KindMismatch {
        parameter: &'static str,
        expected: ParamKind,
    },
    /// A value with the wrong number of elements was written to a parameter.
    ArityMismatch {
        parameter: &'static str,
        expected: usize,
        got: usize,
    },
    /// Operation called in the wrong lifecycle state.
    InvalidState(String),
    /// Operation not offered by the selected processing strategy.
    Unsupported(String),
    /// No class registered under this name.
    UnknownClass(String),
    /// A class with this name is already registered.
    DuplicateClass(String),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            Self::UnknownSelector(sel) => write!(f, "Unknown message: {}", sel),
            Self::UnknownParameter(name) => write!(f, "Unknown parameter: {}", name),
            Self::KindMismatch {
                parameter,
                expected,
            } => write!(f, "Parameter {} expects {} values", parameter, expected),
            Self::ArityMismatch {
                parameter,
                expected,
                got,
            } => write!(
                f,
                "Parameter {} expects {} elements, got {}",
                parameter, expected, got
            ),
            Self::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Self::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            Self::UnknownClass(name) => write!(f, "Unknown class: {}", name),
            Self::DuplicateClass(name) => write!(f, "Class already registered: {}", name),
        }
    }
}

impl std::error::Error for AdapterError {}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
