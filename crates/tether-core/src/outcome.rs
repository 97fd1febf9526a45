//! Status reports produced by constraint checks and client processing.
//!
//! An [`Outcome`] is user-facing: it carries a severity and a message meant
//! for the host console. Outcomes are never silently dropped; the adapter
//! routes every one of them through its diagnostics gateway or returns it to
//! the caller. Programming errors and host misuse use
//! [`AdapterError`](crate::AdapterError) instead.

use std::fmt;

/// Severity of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Status {
    #[default]
    Ok,
    Warning,
    Error,
}

/// Status plus human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    status: Status,
    message: String,
}

impl Outcome {
    /// A successful outcome with no message.
    pub const fn ok() -> Self {
        Self {
            status: Status::Ok,
            message: String::new(),
        }
    }

    /// A warning with the given message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            status: Status::Warning,
            message: message.into(),
        }
    }

    /// An error with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
        }
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Clear back to `Ok` with no message, keeping the allocation.
    pub fn reset(&mut self) {
        self.status = Status::Ok;
        self.message.clear();
    }

    /// Fold another outcome into this one.
    ///
    /// The status escalates to the more severe of the two; messages are
    /// joined with `"; "`.
    pub fn merge(&mut self, other: Outcome) {
        if other.message.is_empty() && other.status == Status::Ok {
            return;
        }
        self.status = self.status.max(other.status);
        if !other.message.is_empty() {
            if !self.message.is_empty() {
                self.message.push_str("; ");
            }
            self.message.push_str(&other.message);
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Status::Ok => write!(f, "ok"),
            Status::Warning => write!(f, "warning: {}", self.message),
            Status::Error => write!(f, "error: {}", self.message),
        }
    }
}
