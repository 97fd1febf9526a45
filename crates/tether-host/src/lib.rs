//! # tether-host
//!
//! Host adapter for tether clients.
//!
//! This crate attaches a [`Client`](tether_core::Client) to a host object
//! model that delivers audio in fixed-size blocks and control messages
//! asynchronously. It selects the execution strategy from the client's
//! declared capability at compile time, marshals host argument lists into
//! typed parameters and back, and relays everything the audio path produces
//! to the message context through a scheduler.
//!
//! ## Architecture
//!
//! ```text
//! Host bridge (implements HostObject + Scheduler)
//!        │
//!        ▼
//! ClassRegistry ──create──► Box<dyn Instance>
//!                                 │
//!                                 ▼
//!                    Adapter<C, H> (params, snapshot, client)
//!                                 │
//!                    StrategyOf<C>: RealTime | NonRealTime | Combined
//! ```
//!
//! ## Contexts
//!
//! - **Audio context**: [`Adapter::perform`] only. Never calls the host
//!   object, never allocates.
//! - **Message context**: everything else, including the deferred tasks
//!   handed back through [`Adapter::run_deferred`].

pub mod adapter;
pub mod class;
pub mod combined;
pub mod diagnostics;
pub mod dispatch;
pub mod host;
pub mod instance;
pub mod mailbox;
pub mod marshal;
pub mod offline;
pub mod realtime;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::Adapter;
pub use class::{ArgKind, ClassSpec, MethodSpec};
pub use combined::Combined;
pub use diagnostics::Diagnostics;
pub use dispatch::{AudioContext, Dispatch, MessageContext, Strategy, StrategyOf};
pub use host::{Deferred, HostObject, OutletId, OutletKind, Scheduler};
pub use instance::Instance;
pub use mailbox::ControlMailbox;
pub use marshal::{split_tags, SplitArgs, TagRun};
pub use offline::NonRealTime;
pub use realtime::RealTime;
pub use registry::{ClassRegistry, InstanceFactory};
