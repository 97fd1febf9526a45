//! # tether-core
//!
//! Core abstractions for adapting parameterised signal-processing clients
//! to a host environment.
//!
//! This crate is host-agnostic: it defines what a client is, how its
//! parameters are described, stored and constrained, and the values that
//! travel between host and client. The host side lives in `tether-host`.
//!
//! ## Main Traits
//!
//! - [`Client`] - Parameterised client with a type-level capability
//! - [`RealTimeClient`] - Block processing
//! - [`OfflineClient`] - Trigger-driven offline processing
//! - [`Parameters`] - Parameter schema
//! - [`BufferStore`] - Host-owned named sample buffers
//!
//! ## Types
//!
//! - [`Atom`] - Host message value
//! - [`Block`] - Per-block audio views
//! - [`ParameterDescriptor`] - Parameter metadata
//! - [`ParameterSet`] - Current parameter values
//! - [`Outcome`] - Status plus message from an operation
//! - [`AdapterError`] - Error types
//! - [`ClassConfig`] - Host-facing class metadata

pub mod atom;
pub mod block;
pub mod buffer;
pub mod client;
pub mod config;
pub mod error;
pub mod outcome;
pub mod parameter_constraints;
pub mod parameter_info;
pub mod parameter_set;
pub mod parameter_types;
pub mod parameters;
pub mod types;

// Re-exports for convenience
pub use atom::{Atom, Symbol};
pub use block::Block;
pub use buffer::{BufferRef, BufferStore};
pub use client::{
    Capabilities, Capability, Client, NonRealTimeOnly, OfflineClient, RealTimeAndNonRealTime,
    RealTimeClient, RealTimeOnly, StrategyKind,
};
pub use config::ClassConfig;
pub use error::{AdapterError, AdapterResult};
pub use outcome::{Outcome, Status};
pub use parameter_constraints::Constraint;
pub use parameter_info::{Mutability, ParameterDescriptor};
pub use parameter_set::ParameterSet;
pub use parameter_types::{Buffer, Element, Float, Long, ParamKey, ParamKind, ParamType, Scalar};
pub use parameters::{NoParameters, Parameters};
pub use types::{Sample, MAX_ARITY, MAX_CHANNELS};
