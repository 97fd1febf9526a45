//! Constraint rules attached to parameter descriptors.
//!
//! Constraints are applied every time a value is written to the working
//! [`ParameterSet`](crate::ParameterSet), and once over the whole set after
//! construction. An adjusted value produces a warning [`Outcome`]; a value
//! that cannot be represented at all (NaN) is rejected with an error and the
//! previous value is kept.

use crate::outcome::Outcome;
use crate::parameter_info::ParameterDescriptor;
use crate::parameter_types::Element;

/// A rule a numeric parameter value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Every element is at least this value.
    Min(f64),
    /// Every element is at most this value.
    Max(f64),
    /// Every element is rounded up to the next power of two (minimum 1).
    PowerOfTwo,
    /// Every element is an odd integer; even values are raised by one.
    Odd,
    /// Every element is at least the first element of the parameter at this index.
    LowerLimit(usize),
    /// Every element is at most the first element of the parameter at this index.
    UpperLimit(usize),
    /// Elements are non-decreasing; each is raised to at least its predecessor.
    Ascending,
}

impl Constraint {
    /// Returns the index of another parameter this constraint reads, if any.
    pub fn dependency(&self) -> Option<usize> {
        match *self {
            Self::LowerLimit(index) | Self::UpperLimit(index) => Some(index),
            _ => None,
        }
    }

    fn apply(&self, value: f64, lookup: &dyn Fn(usize) -> Option<f64>) -> f64 {
        match *self {
            Self::Min(min) => value.max(min),
            Self::Max(max) => value.min(max),
            Self::PowerOfTwo => {
                if value <= 1.0 {
                    1.0
                } else {
                    (value.ceil() as u64).next_power_of_two() as f64
                }
            }
            Self::Odd => {
                let rounded = value.round();
                if rounded % 2.0 == 0.0 {
                    rounded + 1.0
                } else {
                    rounded
                }
            }
            Self::LowerLimit(index) => lookup(index).map_or(value, |limit| value.max(limit)),
            Self::UpperLimit(index) => lookup(index).map_or(value, |limit| value.min(limit)),
            Self::Ascending => value,
        }
    }
}

/// Apply a descriptor's constraints to `elements` in place.
///
/// `lookup` returns the first element of another parameter by index, for
/// relational constraints. Returns a warning if any element changed.
pub(crate) fn constrain(
    descriptor: &ParameterDescriptor,
    elements: &mut [Element],
    lookup: &dyn Fn(usize) -> Option<f64>,
) -> Outcome {
    if descriptor.constraints.is_empty() {
        return Outcome::ok();
    }

    let mut adjusted: Vec<(f64, f64)> = Vec::new();

    for element in elements.iter_mut() {
        let original = match element.as_f64() {
            Some(v) => v,
            None => continue,
        };
        let mut value = original;
        for constraint in descriptor.constraints {
            value = constraint.apply(value, lookup);
        }
        if value != original {
            store(element, value);
            adjusted.push((original, value));
        }
    }

    if descriptor.constraints.contains(&Constraint::Ascending) {
        for i in 1..elements.len() {
            let (prev, current) = match (elements[i - 1].as_f64(), elements[i].as_f64()) {
                (Some(p), Some(c)) => (p, c),
                _ => continue,
            };
            if current < prev {
                store(&mut elements[i], prev);
                adjusted.push((current, prev));
            }
        }
    }

    if adjusted.is_empty() {
        return Outcome::ok();
    }

    let detail: Vec<String> = adjusted
        .iter()
        .map(|(from, to)| format!("{} adjusted to {}", from, to))
        .collect();
    Outcome::warning(format!("{}: {}", descriptor.name, detail.join(", ")))
}

/// Reject values that can never satisfy a constraint (NaN).
pub(crate) fn validate(descriptor: &ParameterDescriptor, elements: &[Element]) -> Outcome {
    if elements
        .iter()
        .any(|e| matches!(e, Element::Float(v) if v.is_nan()))
    {
        return Outcome::error(format!("{}: value is not a number", descriptor.name));
    }
    Outcome::ok()
}

fn store(element: &mut Element, value: f64) {
    match element {
        Element::Long(v) => *v = value.round() as i64,
        Element::Float(v) => *v = value,
        Element::Buffer(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_info::ParameterDescriptor;

    fn no_lookup(_: usize) -> Option<f64> {
        None
    }

    #[test]
    fn test_min_max_clamp() {
        static DESC: ParameterDescriptor = ParameterDescriptor::float("Gain", 1.0)
            .with_constraints(&[Constraint::Min(0.0), Constraint::Max(4.0)]);
        let mut value = vec![Element::Float(5.0)];
        let outcome = constrain(&DESC, &mut value, &no_lookup);
        assert_eq!(value, vec![Element::Float(4.0)]);
        assert_eq!(outcome.message(), "Gain: 5 adjusted to 4");

        let mut value = vec![Element::Float(2.0)];
        assert!(constrain(&DESC, &mut value, &no_lookup).is_ok());
        assert_eq!(value, vec![Element::Float(2.0)]);
    }

    #[test]
    fn test_power_of_two_and_odd() {
        static FFT: ParameterDescriptor =
            ParameterDescriptor::long("FFTSize", 1024).with_constraints(&[Constraint::PowerOfTwo]);
        let mut value = vec![Element::Long(1000)];
        constrain(&FFT, &mut value, &no_lookup);
        assert_eq!(value, vec![Element::Long(1024)]);

        static KERNEL: ParameterDescriptor =
            ParameterDescriptor::long("Kernel", 3).with_constraints(&[Constraint::Odd]);
        let mut value = vec![Element::Long(4)];
        constrain(&KERNEL, &mut value, &no_lookup);
        assert_eq!(value, vec![Element::Long(5)]);
    }

    #[test]
    fn test_relational_limit() {
        static HOP: ParameterDescriptor =
            ParameterDescriptor::long("Hop", 512).with_constraints(&[Constraint::UpperLimit(0)]);
        let mut value = vec![Element::Long(4096)];
        constrain(&HOP, &mut value, &|index| (index == 0).then_some(1024.0));
        assert_eq!(value, vec![Element::Long(1024)]);
    }

    #[test]
    fn test_ascending_pair() {
        static RANGE: ParameterDescriptor =
            ParameterDescriptor::floats("Range", [0.0, 1.0]).with_constraints(&[Constraint::Ascending]);
        let mut value = vec![Element::Float(0.8), Element::Float(0.2)];
        let outcome = constrain(&RANGE, &mut value, &no_lookup);
        assert_eq!(value, vec![Element::Float(0.8), Element::Float(0.8)]);
        assert!(!outcome.is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        static DESC: ParameterDescriptor = ParameterDescriptor::float("Gain", 1.0);
        let outcome = validate(&DESC, &[Element::Float(f64::NAN)]);
        assert_eq!(outcome.status(), crate::Status::Error);
    }
}
