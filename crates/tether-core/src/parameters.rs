//! Parameter schema trait.
//!
//! A client declares its parameters as a type implementing [`Parameters`].
//! The type itself is never instantiated; it only carries the static
//! descriptor table and the typed [`ParamKey`](crate::ParamKey) constants.
//!
//! # Example
//!
//! ```ignore
//! use tether::prelude::*;
//!
//! #[derive(Parameters)]
//! pub struct GainParameters {
//!     #[parameter(name = "Gain", default = 1.0, min = 0.0, max = 4.0)]
//!     gain: Float,
//! }
//!
//! // Generated:
//! // impl GainParameters { pub const GAIN: ParamKey<Float> = ParamKey::new(0); }
//! // impl Parameters for GainParameters { fn descriptors() -> &'static [ParameterDescriptor] { .. } }
//! ```

use crate::parameter_info::ParameterDescriptor;

/// Static parameter schema of a client.
pub trait Parameters: 'static {
    /// The descriptor table, in positional order.
    fn descriptors() -> &'static [ParameterDescriptor];

    /// Number of parameters.
    fn count() -> usize {
        Self::descriptors().len()
    }

    /// Number of fixed (creation-only) parameters.
    fn fixed_count() -> usize {
        Self::descriptors().iter().filter(|d| d.is_fixed()).count()
    }

    /// Total arity of the fixed parameters.
    ///
    /// This is the maximum number of positional creation arguments a class accepts.
    fn fixed_arity() -> usize {
        Self::descriptors()
            .iter()
            .filter(|d| d.is_fixed())
            .map(|d| d.arity)
            .sum()
    }
}

/// Empty schema for clients with no parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParameters;

impl Parameters for NoParameters {
    fn descriptors() -> &'static [ParameterDescriptor] {
        &[]
    }
}
