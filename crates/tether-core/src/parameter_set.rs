//! Current parameter values of one instance.
//!
//! A [`ParameterSet`] holds one value per descriptor, in positional order.
//! Every write goes through the descriptor's constraints, so after any
//! successful [`ParameterSet::set`] each value satisfies its rules. The
//! adapter keeps two sets per instance: the working set that setters mutate,
//! and a snapshot captured after construction that `reset` restores.

use tether_utils::selector_eq;

use crate::error::{AdapterError, AdapterResult};
use crate::outcome::Outcome;
use crate::parameter_constraints::{constrain, validate};
use crate::parameter_info::ParameterDescriptor;
use crate::parameter_types::{Element, ParamKey, ParamType};

/// Ordered collection of current parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    descriptors: &'static [ParameterDescriptor],
    values: Vec<Vec<Element>>,
}

impl ParameterSet {
    /// Create a set holding every descriptor's default value.
    pub fn new(descriptors: &'static [ParameterDescriptor]) -> Self {
        Self {
            descriptors,
            values: descriptors.iter().map(|d| d.default_value()).collect(),
        }
    }

    /// Descriptor table backing this set.
    #[inline]
    pub fn descriptors(&self) -> &'static [ParameterDescriptor] {
        self.descriptors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Descriptor at `index`.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParameterDescriptor> {
        self.descriptors.get(index)
    }

    /// Position of the parameter addressed by a host message selector.
    pub fn index_of(&self, selector: &str) -> Option<usize> {
        self.descriptors
            .iter()
            .position(|d| selector_eq(d.name, selector))
    }

    /// Current elements of the parameter at `index`.
    pub fn value(&self, index: usize) -> Option<&[Element]> {
        self.values.get(index).map(|v| v.as_slice())
    }

    /// First element of a parameter, typed.
    ///
    /// # Panics
    ///
    /// Panics if `key` does not belong to this set's schema (out of range or
    /// of a different kind).
    #[inline]
    pub fn get<T: ParamType>(&self, key: ParamKey<T>) -> T::Value {
        self.values
            .get(key.index())
            .and_then(|v| v.first())
            .and_then(T::from_element)
            .expect("parameter key does not match this parameter set")
    }

    /// All elements of a parameter, typed.
    pub fn get_all<T: ParamType>(&self, key: ParamKey<T>) -> impl Iterator<Item = T::Value> + '_ {
        self.values
            .get(key.index())
            .into_iter()
            .flatten()
            .filter_map(T::from_element)
    }

    /// Write a value, applying constraints.
    ///
    /// Constraint adjustments and rejections are folded into `report` when
    /// given; they do not make this call fail. Parameters whose relational
    /// constraints depend on this one are re-constrained afterwards.
    ///
    /// # Errors
    ///
    /// Fails without modifying the set if `index` is out of range or the
    /// value has the wrong arity or kind.
    pub fn set(
        &mut self,
        index: usize,
        mut value: Vec<Element>,
        report: Option<&mut Outcome>,
    ) -> AdapterResult<()> {
        let descriptor = self
            .descriptors
            .get(index)
            .ok_or_else(|| AdapterError::UnknownParameter(format!("#{}", index)))?;

        if value.len() != descriptor.arity {
            return Err(AdapterError::ArityMismatch {
                parameter: descriptor.name,
                expected: descriptor.arity,
                got: value.len(),
            });
        }
        if value.iter().any(|e| e.kind() != descriptor.kind) {
            return Err(AdapterError::KindMismatch {
                parameter: descriptor.name,
                expected: descriptor.kind,
            });
        }

        let mut outcome = validate(descriptor, &value);
        if outcome.is_ok() {
            let values = &self.values;
            outcome = constrain(descriptor, &mut value, &|i| first_numeric(values, i));
            self.values[index] = value;
            outcome.merge(self.constrain_dependents(index));
        }

        if let Some(report) = report {
            report.merge(outcome);
        }
        Ok(())
    }

    /// Write the single-element value of a typed parameter.
    pub fn set_value<T: ParamType>(
        &mut self,
        key: ParamKey<T>,
        value: T::Value,
        report: Option<&mut Outcome>,
    ) -> AdapterResult<()> {
        self.set(key.index(), vec![T::into_element(value)], report)
    }

    /// Apply every descriptor's constraints across the whole set, in order.
    ///
    /// Returns the outcomes of parameters that had to be adjusted.
    pub fn keep_constrained(&mut self) -> Vec<Outcome> {
        (0..self.values.len())
            .map(|index| self.constrain_at(index))
            .filter(|outcome| !outcome.is_ok())
            .collect()
    }

    fn constrain_dependents(&mut self, changed: usize) -> Outcome {
        let mut outcome = Outcome::ok();
        for index in 0..self.values.len() {
            let depends = self.descriptors[index]
                .constraints
                .iter()
                .any(|c| c.dependency() == Some(changed));
            if depends && index != changed {
                outcome.merge(self.constrain_at(index));
            }
        }
        outcome
    }

    fn constrain_at(&mut self, index: usize) -> Outcome {
        let descriptors = self.descriptors;
        let descriptor = &descriptors[index];
        let mut value = std::mem::take(&mut self.values[index]);
        let values = &self.values;
        let outcome = constrain(descriptor, &mut value, &|i| first_numeric(values, i));
        self.values[index] = value;
        outcome
    }
}

fn first_numeric(values: &[Vec<Element>], index: usize) -> Option<f64> {
    values.get(index)?.first()?.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter_constraints::Constraint;
    use crate::parameter_types::{Float, Long};
    use crate::Status;

    static DESCRIPTORS: [ParameterDescriptor; 3] = [
        ParameterDescriptor::long("WindowSize", 1024).with_constraints(&[Constraint::PowerOfTwo]),
        ParameterDescriptor::long("HopSize", 512).with_constraints(&[Constraint::UpperLimit(0)]),
        ParameterDescriptor::float("Gain", 1.0).with_constraints(&[Constraint::Min(0.0), Constraint::Max(4.0)]),
    ];

    const WINDOW: ParamKey<Long> = ParamKey::new(0);
    const HOP: ParamKey<Long> = ParamKey::new(1);
    const GAIN: ParamKey<Float> = ParamKey::new(2);

    #[test]
    fn test_defaults() {
        let params = ParameterSet::new(&DESCRIPTORS);
        assert_eq!(params.len(), 3);
        assert_eq!(params.get(WINDOW), 1024);
        assert_eq!(params.get(HOP), 512);
        assert_eq!(params.get(GAIN), 1.0);
    }

    #[test]
    fn test_in_range_value_round_trips() {
        let mut params = ParameterSet::new(&DESCRIPTORS);
        let mut report = Outcome::ok();
        params.set_value(GAIN, 2.5, Some(&mut report)).unwrap();
        assert_eq!(params.get(GAIN), 2.5);
        assert!(report.is_ok());
    }

    #[test]
    fn test_out_of_range_value_is_constrained() {
        let mut params = ParameterSet::new(&DESCRIPTORS);
        let mut report = Outcome::ok();
        params.set_value(GAIN, 10.0, Some(&mut report)).unwrap();
        assert_eq!(params.get(GAIN), 4.0);
        assert_eq!(report.status(), Status::Warning);
    }

    #[test]
    fn test_dependent_parameter_is_reconstrained() {
        let mut params = ParameterSet::new(&DESCRIPTORS);
        params.set_value(WINDOW, 256, None).unwrap();
        assert_eq!(params.get(HOP), 256);
    }

    #[test]
    fn test_nan_rejected_keeps_previous_value() {
        let mut params = ParameterSet::new(&DESCRIPTORS);
        let mut report = Outcome::ok();
        params.set_value(GAIN, f64::NAN, Some(&mut report)).unwrap();
        assert_eq!(params.get(GAIN), 1.0);
        assert_eq!(report.status(), Status::Error);
    }

    #[test]
    fn test_kind_and_arity_errors() {
        let mut params = ParameterSet::new(&DESCRIPTORS);
        assert!(matches!(
            params.set(2, vec![Element::Long(1)], None),
            Err(AdapterError::KindMismatch { .. })
        ));
        assert!(matches!(
            params.set(2, vec![], None),
            Err(AdapterError::ArityMismatch { .. })
        ));
        assert!(matches!(
            params.set(9, vec![], None),
            Err(AdapterError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_keep_constrained_reports_adjustments() {
        let mut params = ParameterSet::new(&DESCRIPTORS);
        params.values[0] = vec![Element::Long(1000)];
        params.values[1] = vec![Element::Long(2048)];
        let outcomes = params.keep_constrained();
        assert_eq!(params.get(WINDOW), 1024);
        assert_eq!(params.get(HOP), 1024);
        assert_eq!(outcomes.len(), 2);
    }

    #[test]
    fn test_index_of_selector() {
        let params = ParameterSet::new(&DESCRIPTORS);
        assert_eq!(params.index_of("hopsize"), Some(1));
        assert_eq!(params.index_of("HopSize"), None);
        assert_eq!(params.index_of("missing"), None);
    }
}
