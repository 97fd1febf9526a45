//! Capability dispatcher.
//!
//! Each capability marker maps to exactly one execution strategy through
//! the [`Dispatch`] trait:
//!
//! | Capability                 | Strategy                                   |
//! |----------------------------|--------------------------------------------|
//! | `RealTimeOnly`             | [`RealTime`](crate::RealTime)              |
//! | `NonRealTimeOnly`          | [`NonRealTime`](crate::NonRealTime)        |
//! | `RealTimeAndNonRealTime`   | [`Combined`](crate::Combined)              |
//!
//! The mapping is an associated type, so the adapter holds the strategy by
//! value and every call is statically dispatched. The impls also carry the
//! trait bound the strategy needs: a client that declares `RealTimeOnly`
//! without implementing `RealTimeClient` does not build.
//!
//! Strategies never reach back into the adapter. They receive what they
//! need through an explicit context: [`MessageContext`] in the message
//! context, and the narrower [`AudioContext`] on the audio path, which has
//! no access to the host object at all.

use tether_core::{
    AdapterError, AdapterResult, Capability, Client, NonRealTimeOnly, OfflineClient, ParameterSet,
    RealTimeAndNonRealTime, RealTimeClient, RealTimeOnly, Sample, StrategyKind,
};

use crate::class::ClassSpec;
use crate::combined::Combined;
use crate::diagnostics::Diagnostics;
use crate::host::{Deferred, HostObject, Scheduler};
use crate::offline::NonRealTime;
use crate::realtime::RealTime;

// =============================================================================
// Contexts
// =============================================================================

/// Adapter state lent to a strategy in the message context.
pub struct MessageContext<'a, C, H> {
    pub client: &'a mut C,
    pub params: &'a ParameterSet,
    pub host: &'a mut H,
    pub scheduler: &'a dyn Scheduler,
    pub diagnostics: &'a Diagnostics,
}

impl<C, H> MessageContext<'_, C, H> {
    /// Shorter-lived copy, for handing the context on more than once.
    pub fn reborrow(&mut self) -> MessageContext<'_, C, H> {
        MessageContext {
            client: self.client,
            params: self.params,
            host: self.host,
            scheduler: self.scheduler,
            diagnostics: self.diagnostics,
        }
    }
}

/// Adapter state lent to a strategy on the audio path.
pub struct AudioContext<'a, C> {
    pub client: &'a mut C,
    pub params: &'a ParameterSet,
    pub scheduler: &'a dyn Scheduler,
}

// =============================================================================
// Strategy
// =============================================================================

fn unsupported(kind: StrategyKind, operation: &str) -> AdapterError {
    AdapterError::Unsupported(format!("{} is not available for {:?} clients", operation, kind))
}

/// An execution strategy for clients of type `C`.
///
/// Operations a strategy does not offer keep their default and return
/// [`AdapterError::Unsupported`].
pub trait Strategy<C: Client>: Send + Sized + 'static {
    /// Which strategy this is.
    const KIND: StrategyKind;

    /// Fresh, unconfigured strategy state.
    fn new() -> Self;

    /// Add the strategy's methods to the class description.
    fn setup(spec: &mut ClassSpec);

    /// Create the outlets this strategy notifies through.
    fn create_outlets<H: HostObject>(&mut self, host: &mut H, client: &C);

    /// Register signal inlets and outlets with the host object.
    fn setup_audio<H: HostObject>(&mut self, host: &mut H, num_ins: usize, num_outs: usize);

    /// Handle a sample-rate or block-size change.
    fn configure<H: HostObject>(
        &mut self,
        _ctx: MessageContext<'_, C, H>,
        _sample_rate: f64,
        _block_size: usize,
    ) -> AdapterResult<()> {
        Err(unsupported(Self::KIND, "configure"))
    }

    /// Process one block of host audio.
    fn perform(
        &mut self,
        _ctx: AudioContext<'_, C>,
        _inputs: &[&[Sample]],
        _outputs: &mut [&mut [Sample]],
        _num_samples: usize,
    ) -> AdapterResult<()> {
        Err(unsupported(Self::KIND, "perform"))
    }

    /// Handle the offline trigger message.
    fn trigger<H: HostObject>(&mut self, _ctx: MessageContext<'_, C, H>) -> AdapterResult<()> {
        Err(unsupported(Self::KIND, "trigger"))
    }

    /// Run a task previously handed to the scheduler.
    fn run_deferred<H: HostObject>(
        &mut self,
        _ctx: MessageContext<'_, C, H>,
        task: Deferred,
    ) -> AdapterResult<()> {
        Err(unsupported(Self::KIND, &format!("{:?}", task)))
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Type-level mapping from a capability marker to its strategy.
///
/// A client whose declared capability lacks the matching processing trait
/// has no strategy, so adapting it does not build:
///
/// ```compile_fail
/// use tether_core::{Client, NoParameters, ParameterSet, RealTimeOnly};
/// use tether_host::Dispatch;
///
/// struct Silent;
///
/// impl Client for Silent {
///     type Parameters = NoParameters;
///     type Capability = RealTimeOnly;
///
///     fn new(_params: &ParameterSet) -> Self {
///         Silent
///     }
/// }
///
/// fn adaptable<C: Client>()
/// where
///     C::Capability: Dispatch<C>,
/// {
/// }
///
/// adaptable::<Silent>();
/// ```
pub trait Dispatch<C: Client>: Capability {
    type Strategy: Strategy<C>;
}

impl<C: RealTimeClient> Dispatch<C> for RealTimeOnly {
    type Strategy = RealTime<C>;
}

impl<C: OfflineClient> Dispatch<C> for NonRealTimeOnly {
    type Strategy = NonRealTime<C>;
}

impl<C: RealTimeClient + OfflineClient> Dispatch<C> for RealTimeAndNonRealTime {
    type Strategy = Combined<C>;
}

/// The strategy selected for client type `C`.
pub type StrategyOf<C> = <<C as Client>::Capability as Dispatch<C>>::Strategy;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Gain, Meter, Normalize, Recorder};

    fn kind_of<C>() -> StrategyKind
    where
        C: Client,
        C::Capability: Dispatch<C>,
    {
        <StrategyOf<C> as Strategy<C>>::KIND
    }

    #[test]
    fn test_capability_selects_strategy() {
        assert_eq!(kind_of::<Gain>(), StrategyKind::RealTime);
        assert_eq!(kind_of::<Meter>(), StrategyKind::RealTime);
        assert_eq!(kind_of::<Normalize>(), StrategyKind::NonRealTime);
        assert_eq!(kind_of::<Recorder>(), StrategyKind::Combined);
    }

    #[test]
    fn test_selection_matches_capability_flags() {
        fn check<C>()
        where
            C: Client,
            C::Capability: Dispatch<C>,
        {
            assert_eq!(kind_of::<C>(), <C::Capability as Capability>::STRATEGY);
        }
        check::<Gain>();
        check::<Normalize>();
        check::<Recorder>();
    }
}
