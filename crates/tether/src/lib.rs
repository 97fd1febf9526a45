//! # Tether
//!
//! Attach parameterised signal-processing clients to a host that speaks in
//! message selectors, argument lists and fixed-size audio blocks.
//!
//! A client declares its parameters, its channel counts and whether it runs
//! in real time, offline, or both. Tether builds the host-facing class from
//! that declaration: creation-argument parsing, one setter message per
//! mutable parameter, constraint enforcement, `reset` to the creation-time
//! values, and the execution strategy matching the client's capability.
//!
//! ## Architecture
//!
//! ```text
//! Your client (implements Client + RealTimeClient and/or OfflineClient)
//!        ↓
//! Adapter<C, H> (parameters, snapshot, strategy)
//!        ↓
//! Host bridge (implements HostObject + Scheduler)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tether::prelude::*;
//!
//! #[derive(Parameters)]
//! pub struct GainParameters {
//!     #[parameter(name = "Channels", default = 1, min = 1, max = 8, fixed)]
//!     pub channels: Long,
//!     #[parameter(name = "Gain", default = 1.0, min = 0.0)]
//!     pub gain: Float,
//! }
//!
//! struct Gain { channels: usize }
//!
//! impl Client for Gain {
//!     type Parameters = GainParameters;
//!     type Capability = RealTimeOnly;
//!
//!     fn new(params: &ParameterSet) -> Self {
//!         Self { channels: params.get(GainParameters::CHANNELS) as usize }
//!     }
//!     fn audio_channels_in(&self) -> usize { self.channels }
//!     fn audio_channels_out(&self) -> usize { self.channels }
//! }
//!
//! impl RealTimeClient for Gain {
//!     fn process(&mut self, params: &ParameterSet, block: &mut Block) {
//!         let gain = params.get(GainParameters::GAIN) as Sample;
//!         for (input, output) in block.zip_channels() {
//!             for (i, o) in input.iter().zip(output.iter_mut()) {
//!                 *o = *i * gain;
//!             }
//!         }
//!     }
//! }
//!
//! // Host bridge initialisation
//! static GAIN: ClassConfig = ClassConfig::new("gain~");
//! let mut registry = ClassRegistry::<MyHostObject>::new();
//! registry.register::<Gain>(&GAIN)?;
//! ```

// Re-export sub-crates
pub use tether_core as core;
pub use tether_host as host;

// Re-export derive macro when feature is enabled
#[cfg(feature = "derive")]
pub use tether_macros::Parameters;

/// Prelude module for convenient imports.
///
/// Import everything you need to write a client or a host bridge:
/// ```rust,ignore
/// use tether::prelude::*;
/// ```
pub mod prelude {
    // Core traits and types
    pub use tether_core::{
        // Client traits and capability markers
        Client, NonRealTimeOnly, OfflineClient, RealTimeAndNonRealTime, RealTimeClient,
        RealTimeOnly, StrategyKind,
        // Parameters
        Buffer, Constraint, Float, Long, NoParameters, ParamKey, ParameterDescriptor, ParameterSet,
        Parameters,
        // Values
        Atom, Block, BufferRef, BufferStore, Sample, Symbol,
        // Results
        AdapterError, AdapterResult, Outcome, Status,
        // Class metadata
        ClassConfig,
    };

    // Host side
    pub use tether_host::{
        Adapter, ClassRegistry, ClassSpec, Deferred, HostObject, Instance, OutletId, OutletKind,
        Scheduler,
    };

    // Derive macro for parameter schemas (when feature enabled)
    #[cfg(feature = "derive")]
    pub use tether_macros::Parameters;
}
