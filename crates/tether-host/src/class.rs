//! Class method tables.
//!
//! Before any instance exists, the host builds a class for each adapted
//! client type. [`ClassSpec`] is the host-agnostic description of that
//! class: its name, help symbol and the messages it accepts with their
//! argument conventions. A host bridge walks the method table and registers
//! each entry with its own class primitive.

use tether_core::ClassConfig;

/// Argument convention of a class method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// No arguments.
    None,
    /// Exactly one number.
    Float,
    /// Any list of atoms.
    Gimme,
    /// Host-internal method, not callable by users.
    Cant,
}

/// A single method entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub selector: String,
    pub args: ArgKind,
}

/// Host-agnostic class description.
#[derive(Debug, Clone)]
pub struct ClassSpec {
    name: &'static str,
    help: &'static str,
    methods: Vec<MethodSpec>,
}

impl ClassSpec {
    /// Empty class description for a configuration.
    pub fn new(config: &ClassConfig) -> Self {
        Self {
            name: config.name,
            help: config.help_symbol(),
            methods: Vec::new(),
        }
    }

    /// Add a method. Re-adding a selector replaces its argument kind.
    pub fn add_method(&mut self, selector: impl Into<String>, args: ArgKind) {
        let selector = selector.into();
        match self.methods.iter_mut().find(|m| m.selector == selector) {
            Some(existing) => existing.args = args,
            None => self.methods.push(MethodSpec { selector, args }),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn help(&self) -> &'static str {
        self.help
    }

    #[inline]
    pub fn methods(&self) -> &[MethodSpec] {
        &self.methods
    }

    pub fn method(&self, selector: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.selector == selector)
    }

    pub fn has_method(&self, selector: &str) -> bool {
        self.method(selector).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_in_insertion_order() {
        let mut spec = ClassSpec::new(&ClassConfig::new("gain~"));
        spec.add_method("reset", ArgKind::None);
        spec.add_method("gain", ArgKind::Gimme);
        let selectors: Vec<_> = spec.methods().iter().map(|m| m.selector.as_str()).collect();
        assert_eq!(selectors, ["reset", "gain"]);
        assert_eq!(spec.help(), "gain~");
    }

    #[test]
    fn test_readding_replaces() {
        let mut spec = ClassSpec::new(&ClassConfig::new("x"));
        spec.add_method("bang", ArgKind::None);
        spec.add_method("bang", ArgKind::Gimme);
        assert_eq!(spec.methods().len(), 1);
        assert_eq!(spec.method("bang").map(|m| m.args), Some(ArgKind::Gimme));
    }
}
