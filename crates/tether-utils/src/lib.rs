//! Internal utilities for the Tether host adapter.
//!
//! This crate provides low-level helpers shared between `tether-core`,
//! `tether-host` and `tether-macros`. The macro crate uses them at compile
//! time to reject parameter names that would collide once turned into host
//! message selectors; the runtime uses the same rules to route messages.
//!
//! # Contents
//!
//! - [`selector_name`] - Host message selector for a parameter name
//! - [`selector_eq`] - Allocation-free selector comparison
//! - [`is_tag_text`] - Tag recognition (`@name`) on raw symbol text
//! - [`RESERVED_SELECTORS`] - Selectors owned by the adapter itself

pub mod selector;

pub use selector::{is_tag_text, selector_eq, selector_name, tag_name, RESERVED_SELECTORS};
