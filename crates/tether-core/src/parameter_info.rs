//! Parameter metadata.
//!
//! A [`ParameterDescriptor`] is immutable, const-constructible metadata for
//! one parameter: its name, kind, fixed arity, default elements and
//! constraint rules. Descriptor tables are defined once per client type
//! (usually by `#[derive(Parameters)]`) and shared read-only by every
//! instance.

use tether_utils::selector_name;

use crate::parameter_constraints::Constraint;
use crate::parameter_types::{Element, ParamKind, Scalar};
use crate::types::MAX_ARITY;

/// Whether a parameter can change after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// Set only from positional creation arguments.
    Fixed,
    /// Settable through its named message and `@name` creation tags.
    Mutable,
}

/// Metadata describing a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Parameter name. The host message selector is its lower-cased form.
    pub name: &'static str,
    /// Value kind.
    pub kind: ParamKind,
    /// Number of elements in a value.
    pub arity: usize,
    /// Default elements; only the first `arity` are meaningful.
    defaults: [Scalar; MAX_ARITY],
    /// Rules applied whenever the value is written.
    pub constraints: &'static [Constraint],
    /// Fixed (creation-only) or mutable.
    pub mutability: Mutability,
}

impl ParameterDescriptor {
    const fn with_defaults(name: &'static str, kind: ParamKind, arity: usize, defaults: [Scalar; MAX_ARITY]) -> Self {
        Self {
            name,
            kind,
            arity,
            defaults,
            constraints: &[],
            mutability: Mutability::Mutable,
        }
    }

    /// Single integer parameter.
    pub const fn long(name: &'static str, default: i64) -> Self {
        Self::longs(name, [default])
    }

    /// Single float parameter.
    pub const fn float(name: &'static str, default: f64) -> Self {
        Self::floats(name, [default])
    }

    /// Single buffer reference, unset by default.
    pub const fn buffer(name: &'static str) -> Self {
        Self::with_defaults(name, ParamKind::Buffer, 1, [Scalar::Null; MAX_ARITY])
    }

    /// Integer parameter with `N` elements.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a static) if `N` is zero or
    /// exceeds [`MAX_ARITY`].
    pub const fn longs<const N: usize>(name: &'static str, defaults: [i64; N]) -> Self {
        assert!(N > 0 && N <= MAX_ARITY, "parameter arity out of range");
        let mut scalars = [Scalar::Null; MAX_ARITY];
        let mut i = 0;
        while i < N {
            scalars[i] = Scalar::Long(defaults[i]);
            i += 1;
        }
        Self::with_defaults(name, ParamKind::Long, N, scalars)
    }

    /// Float parameter with `N` elements.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a static) if `N` is zero or
    /// exceeds [`MAX_ARITY`].
    pub const fn floats<const N: usize>(name: &'static str, defaults: [f64; N]) -> Self {
        assert!(N > 0 && N <= MAX_ARITY, "parameter arity out of range");
        let mut scalars = [Scalar::Null; MAX_ARITY];
        let mut i = 0;
        while i < N {
            scalars[i] = Scalar::Float(defaults[i]);
            i += 1;
        }
        Self::with_defaults(name, ParamKind::Float, N, scalars)
    }

    /// Mark the parameter as fixed (creation arguments only).
    pub const fn fixed(mut self) -> Self {
        self.mutability = Mutability::Fixed;
        self
    }

    /// Attach constraint rules.
    pub const fn with_constraints(mut self, constraints: &'static [Constraint]) -> Self {
        self.constraints = constraints;
        self
    }

    /// Default elements.
    #[inline]
    pub fn defaults(&self) -> &[Scalar] {
        &self.defaults[..self.arity]
    }

    /// Default value as elements.
    pub fn default_value(&self) -> Vec<Element> {
        self.defaults().iter().map(|s| Element::from_scalar(*s)).collect()
    }

    /// Default for element `i`, falling back to the first default.
    pub fn default_element(&self, i: usize) -> Element {
        let index = if i < self.arity { i } else { 0 };
        Element::from_scalar(self.defaults[index])
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.mutability == Mutability::Fixed
    }

    /// Host message selector for this parameter.
    pub fn selector(&self) -> String {
        selector_name(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_constructors() {
        const GAIN: ParameterDescriptor = ParameterDescriptor::float("Gain", 0.5);
        assert_eq!(GAIN.arity, 1);
        assert_eq!(GAIN.kind, ParamKind::Float);
        assert_eq!(GAIN.default_value(), vec![Element::Float(0.5)]);
        assert_eq!(GAIN.mutability, Mutability::Mutable);
    }

    #[test]
    fn test_array_defaults() {
        const RANGE: ParameterDescriptor = ParameterDescriptor::longs("Range", [10, 20, 30]);
        assert_eq!(RANGE.arity, 3);
        assert_eq!(
            RANGE.defaults(),
            &[Scalar::Long(10), Scalar::Long(20), Scalar::Long(30)]
        );
    }

    #[test]
    fn test_buffer_default_is_unset() {
        const SOURCE: ParameterDescriptor = ParameterDescriptor::buffer("Source");
        assert_eq!(SOURCE.default_value(), vec![Element::Buffer(None)]);
    }

    #[test]
    fn test_fixed_and_selector() {
        const FFT: ParameterDescriptor = ParameterDescriptor::long("MaxFFTSize", 16384).fixed();
        assert!(FFT.is_fixed());
        assert_eq!(FFT.selector(), "maxfftsize");
    }
}
