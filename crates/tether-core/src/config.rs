//! Shared class configuration.
//!
//! A [`ClassConfig`] carries the host-facing metadata of one adapted class:
//! the name under which it is registered, the help symbol shown by the host,
//! and the initial verbosity of constraint warnings.
//!
//! # Example
//!
//! ```ignore
//! use tether_core::ClassConfig;
//!
//! pub static CONFIG: ClassConfig = ClassConfig::new("gain~")
//!     .with_help("gain~-help")
//!     .with_warnings(false);
//! ```

/// Host-facing class configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassConfig {
    /// Class name as registered with the host. Prefixes every diagnostic.
    pub name: &'static str,

    /// Help symbol. Empty means "use the class name".
    pub help: &'static str,

    /// Whether constraint adjustments are reported for new instances.
    pub warnings: bool,
}

impl ClassConfig {
    /// Create a configuration with default values.
    ///
    /// Warnings are on by default.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            help: "",
            warnings: true,
        }
    }

    /// Set the help symbol.
    pub const fn with_help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Set the initial warning verbosity.
    pub const fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    /// Help symbol, falling back to the class name.
    pub fn help_symbol(&self) -> &'static str {
        if self.help.is_empty() {
            self.name
        } else {
            self.help
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        const CONFIG: ClassConfig = ClassConfig::new("gain~");
        assert_eq!(CONFIG.name, "gain~");
        assert!(CONFIG.warnings);
        assert_eq!(CONFIG.help_symbol(), "gain~");
    }

    #[test]
    fn test_builder() {
        const CONFIG: ClassConfig = ClassConfig::new("stft~")
            .with_help("spectral-help")
            .with_warnings(false);
        assert!(!CONFIG.warnings);
        assert_eq!(CONFIG.help_symbol(), "spectral-help");
    }
}
