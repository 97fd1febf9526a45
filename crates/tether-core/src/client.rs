//! Client traits and capability declarations.
//!
//! A **client** is the component that implements the actual signal
//! processing. The adapter never looks inside it; it only needs to know
//! which execution strategies the client supports:
//!
//! - **Real-time**: processes fixed-size audio blocks ([`RealTimeClient`])
//! - **Non-real-time**: runs once per trigger, offline ([`OfflineClient`])
//! - **Both**: a real-time client that also exposes an offline operation
//!
//! The capability is declared once, at the type level, through
//! [`Client::Capability`]. The adapter selects its strategy from that
//! associated type, so no runtime flag is ever consulted and a client that
//! declares a capability without implementing the matching trait fails to
//! build.
//!
//! # Example
//!
//! ```ignore
//! impl Client for Gain {
//!     type Parameters = GainParameters;
//!     type Capability = RealTimeOnly;
//!
//!     fn new(_params: &ParameterSet) -> Self {
//!         Gain
//!     }
//!
//!     fn audio_channels_in(&self) -> usize { 1 }
//!     fn audio_channels_out(&self) -> usize { 1 }
//! }
//!
//! impl RealTimeClient for Gain {
//!     fn process(&mut self, params: &ParameterSet, block: &mut Block) {
//!         let gain = params.get(GainParameters::GAIN) as f32;
//!         for (i, o) in block.zip_channels() {
//!             for (x, y) in i.iter().zip(o.iter_mut()) {
//!                 *y = *x * gain;
//!             }
//!         }
//!     }
//! }
//! ```

use crate::block::Block;
use crate::outcome::Outcome;
use crate::parameter_set::ParameterSet;
use crate::parameters::Parameters;

// =============================================================================
// Capabilities
// =============================================================================

/// Capability flags of a client type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub real_time: bool,
    pub non_real_time: bool,
}

/// The execution strategy selected for a capability set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    RealTime,
    NonRealTime,
    Combined,
}

impl Capabilities {
    pub const REAL_TIME: Self = Self {
        real_time: true,
        non_real_time: false,
    };

    pub const NON_REAL_TIME: Self = Self {
        real_time: false,
        non_real_time: true,
    };

    pub const BOTH: Self = Self {
        real_time: true,
        non_real_time: true,
    };

    /// Select the strategy for this capability set.
    ///
    /// # Panics
    ///
    /// Panics if neither capability is set. Evaluated in a const context
    /// (as [`Capability::STRATEGY`] is), this is a build error.
    pub const fn strategy(self) -> StrategyKind {
        match (self.real_time, self.non_real_time) {
            (true, false) => StrategyKind::RealTime,
            (false, true) => StrategyKind::NonRealTime,
            (true, true) => StrategyKind::Combined,
            (false, false) => panic!(
                "client is neither real-time nor non-real-time; declare RealTimeOnly, \
                 NonRealTimeOnly or RealTimeAndNonRealTime"
            ),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Type-level capability declaration.
///
/// Sealed: the three markers below are the only capability sets, so a
/// client cannot declare "neither".
///
/// ```compile_fail
/// use tether_core::{Capabilities, Capability};
///
/// struct Neither;
///
/// impl Capability for Neither {
///     const CAPABILITIES: Capabilities = Capabilities {
///         real_time: false,
///         non_real_time: false,
///     };
/// }
/// ```
pub trait Capability: sealed::Sealed + Send + 'static {
    /// Flags for this capability set.
    const CAPABILITIES: Capabilities;

    /// Strategy selected for this capability set, resolved at compile time.
    const STRATEGY: StrategyKind = Self::CAPABILITIES.strategy();
}

/// Client processes audio blocks in real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeOnly;

/// Client processes offline, once per trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonRealTimeOnly;

/// Client processes audio blocks and also offers an offline trigger.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeAndNonRealTime;

impl sealed::Sealed for RealTimeOnly {}
impl sealed::Sealed for NonRealTimeOnly {}
impl sealed::Sealed for RealTimeAndNonRealTime {}

impl Capability for RealTimeOnly {
    const CAPABILITIES: Capabilities = Capabilities::REAL_TIME;
}

impl Capability for NonRealTimeOnly {
    const CAPABILITIES: Capabilities = Capabilities::NON_REAL_TIME;
}

impl Capability for RealTimeAndNonRealTime {
    const CAPABILITIES: Capabilities = Capabilities::BOTH;
}

// =============================================================================
// Client Traits
// =============================================================================

/// A parameterised signal-processing client.
///
/// The adapter owns the client and its [`ParameterSet`]; the set is passed
/// to every processing call rather than stored in the client.
///
/// # Thread Safety
///
/// Clients must be `Send`: the host may create an instance on its message
/// thread and process it on its audio thread.
pub trait Client: Send + Sized + 'static {
    /// Parameter schema.
    type Parameters: Parameters;

    /// Declared capability set ([`RealTimeOnly`], [`NonRealTimeOnly`] or
    /// [`RealTimeAndNonRealTime`]).
    type Capability: Capability;

    /// Construct a client from the current parameter values.
    ///
    /// Called at instance creation and again on every real-time
    /// reconfiguration, which replaces the client wholesale.
    fn new(params: &ParameterSet) -> Self;

    /// Number of audio input channels.
    fn audio_channels_in(&self) -> usize {
        0
    }

    /// Number of audio output channels.
    fn audio_channels_out(&self) -> usize {
        0
    }

    /// Number of control-rate output values produced per block.
    ///
    /// A real-time client has either audio outputs or control outputs,
    /// never both.
    fn control_channels_out(&self) -> usize {
        0
    }
}

/// Block-processing capability.
pub trait RealTimeClient: Client {
    /// Receive the host sample rate after (re)construction.
    fn set_sample_rate(&mut self, _sample_rate: f64) {}

    /// Process one block.
    ///
    /// For control-output clients each output channel is a one-sample view;
    /// the value written there is delivered to the host after the block.
    ///
    /// # Real-Time Safety
    ///
    /// Called on the audio thread. Do not allocate, lock, or block.
    fn process(&mut self, params: &ParameterSet, block: &mut Block<'_>);
}

/// Offline capability.
pub trait OfflineClient: Client {
    /// Run the offline operation once, to completion.
    ///
    /// Called in the host's message context, never on the audio thread.
    fn process_offline(&mut self, params: &ParameterSet) -> Outcome;
}
