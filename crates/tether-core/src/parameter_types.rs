//! Parameter value kinds, elements and typed keys.
//!
//! Every parameter has a kind ([`Long`], [`Float`] or [`Buffer`]) and a fixed
//! arity. Its current value is a list of [`Element`]s of that kind, exactly
//! `arity` long. Typed access goes through [`ParamKey`] constants generated by
//! `#[derive(Parameters)]`, so a client reads `params.get(Self::GAIN)` and
//! gets an `f64` back without matching on elements.

use std::fmt;
use std::marker::PhantomData;

use crate::buffer::BufferRef;

/// The value kind of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Integer parameter. Host numbers are truncated toward zero.
    Long,
    /// Floating point parameter. Host numbers pass through unchanged.
    Float,
    /// Reference to a named buffer in host storage.
    Buffer,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Buffer => write!(f, "buffer"),
        }
    }
}

/// Const-constructible default for one parameter element.
///
/// Descriptors live in statics, so their defaults cannot hold a
/// [`BufferRef`]; buffer parameters default to [`Scalar::Null`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Long(i64),
    Float(f64),
    Null,
}

/// One element of a parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Long(i64),
    Float(f64),
    Buffer(Option<BufferRef>),
}

impl Element {
    /// Kind of this element.
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Long(_) => ParamKind::Long,
            Self::Float(_) => ParamKind::Float,
            Self::Buffer(_) => ParamKind::Buffer,
        }
    }

    /// Build an element from a descriptor default.
    pub fn from_scalar(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Long(v) => Self::Long(v),
            Scalar::Float(v) => Self::Float(v),
            Scalar::Null => Self::Buffer(None),
        }
    }

    /// Numeric view of the element, `None` for buffer references.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Long(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Buffer(_) => None,
        }
    }
}

/// Type-level parameter kind, used to give [`ParamKey`] a typed value.
pub trait ParamType: 'static {
    /// Runtime kind for this type.
    const KIND: ParamKind;

    /// Value handed to client code.
    type Value: Clone;

    /// Extract a typed value from an element of the matching kind.
    fn from_element(element: &Element) -> Option<Self::Value>;

    /// Wrap a typed value into an element.
    fn into_element(value: Self::Value) -> Element;
}

/// Integer parameter marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Long;

/// Floating point parameter marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

/// Buffer reference parameter marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Buffer;

impl ParamType for Long {
    const KIND: ParamKind = ParamKind::Long;
    type Value = i64;

    fn from_element(element: &Element) -> Option<i64> {
        match element {
            Element::Long(v) => Some(*v),
            _ => None,
        }
    }

    fn into_element(value: i64) -> Element {
        Element::Long(value)
    }
}

impl ParamType for Float {
    const KIND: ParamKind = ParamKind::Float;
    type Value = f64;

    fn from_element(element: &Element) -> Option<f64> {
        match element {
            Element::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn into_element(value: f64) -> Element {
        Element::Float(value)
    }
}

impl ParamType for Buffer {
    const KIND: ParamKind = ParamKind::Buffer;
    type Value = Option<BufferRef>;

    fn from_element(element: &Element) -> Option<Option<BufferRef>> {
        match element {
            Element::Buffer(b) => Some(b.clone()),
            _ => None,
        }
    }

    fn into_element(value: Option<BufferRef>) -> Element {
        Element::Buffer(value)
    }
}

/// Typed position of a parameter within its [`ParameterSet`](crate::ParameterSet).
///
/// Keys are plain indices tagged with the parameter's type. They are
/// generated as associated constants by `#[derive(Parameters)]`:
///
/// ```ignore
/// let gain: f64 = params.get(GainParameters::GAIN);
/// ```
pub struct ParamKey<T: ParamType> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ParamType> ParamKey<T> {
    /// Create a key for the parameter at `index`.
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Position of the parameter in its set.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl<T: ParamType> Clone for ParamKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ParamType> Copy for ParamKey<T> {}

impl<T: ParamType> fmt::Debug for ParamKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParamKey<{}>({})", T::KIND, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_to_element() {
        assert_eq!(Element::from_scalar(Scalar::Long(3)), Element::Long(3));
        assert_eq!(Element::from_scalar(Scalar::Float(0.5)), Element::Float(0.5));
        assert_eq!(Element::from_scalar(Scalar::Null), Element::Buffer(None));
    }

    #[test]
    fn test_typed_extraction_checks_kind() {
        assert_eq!(Float::from_element(&Element::Float(0.25)), Some(0.25));
        assert_eq!(Float::from_element(&Element::Long(1)), None);
        assert_eq!(Long::from_element(&Element::Long(7)), Some(7));
        assert_eq!(Buffer::from_element(&Element::Buffer(None)), Some(None));
    }

    #[test]
    fn test_key_is_const() {
        const KEY: ParamKey<Float> = ParamKey::new(2);
        assert_eq!(KEY.index(), 2);
    }
}
