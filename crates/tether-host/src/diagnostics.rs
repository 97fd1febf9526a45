//! Diagnostics gateway.
//!
//! Every user-facing [`Outcome`] ends here. Warnings map to the host's
//! non-fatal console post, errors to its error post; an ok outcome is a
//! silent no-op. Messages are prefixed with the class name.

use tether_core::{Outcome, Status};

use crate::host::HostObject;

/// Maps outcomes to host diagnostics, with a verbosity gate.
#[derive(Debug, Clone, Copy)]
pub struct Diagnostics {
    class_name: &'static str,
    verbose: bool,
}

impl Diagnostics {
    pub fn new(class_name: &'static str, verbose: bool) -> Self {
        Self {
            class_name,
            verbose,
        }
    }

    #[inline]
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    #[inline]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    #[inline]
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Report an outcome regardless of verbosity.
    pub fn report<H: HostObject>(&self, host: &mut H, outcome: &Outcome) {
        match outcome.status() {
            Status::Ok => {}
            Status::Warning => self.warn(host, outcome.message()),
            Status::Error => self.error(host, outcome.message()),
        }
    }

    /// Report an outcome only when verbose.
    pub fn report_gated<H: HostObject>(&self, host: &mut H, outcome: &Outcome) {
        if self.verbose {
            self.report(host, outcome);
        }
    }

    pub fn warn<H: HostObject>(&self, host: &mut H, message: &str) {
        host.post_warning(&format!("{}: {}", self.class_name, message));
    }

    pub fn error<H: HostObject>(&self, host: &mut H, message: &str) {
        host.post_error(&format!("{}: {}", self.class_name, message));
    }
}
