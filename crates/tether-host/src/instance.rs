//! Type-erased adapter instances.
//!
//! A host bridge is written once and drives every registered class. It
//! cannot name `Adapter<C, H>` for each client type, so it works with
//! `Box<dyn Instance>` instead. [`Instance`] is implemented for every
//! adapter; client authors never implement it.

use tether_core::{AdapterResult, Atom, Client, Sample, StrategyKind};

use crate::adapter::Adapter;
use crate::dispatch::{Dispatch, Strategy, StrategyOf};
use crate::host::{Deferred, HostObject};

/// Type-erased interface for adapter instances.
pub trait Instance: Send + 'static {
    /// Name of the class this instance belongs to.
    fn class_name(&self) -> &'static str;

    /// Strategy selected for the instance's client.
    fn strategy_kind(&self) -> StrategyKind;

    /// Dispatch a host message (control command, trigger, or setter).
    fn message(&mut self, selector: &str, args: &[Atom]) -> AdapterResult<()>;

    /// Current value of a parameter as host atoms.
    fn parameter(&self, name: &str) -> AdapterResult<Vec<Atom>>;

    /// Handle a sample-rate or block-size change.
    fn configure(&mut self, sample_rate: f64, block_size: usize) -> AdapterResult<()>;

    /// Process one block. Audio context only.
    fn perform(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        num_samples: usize,
    ) -> AdapterResult<()>;

    /// Run a deferred task. Message context only.
    fn run_deferred(&mut self, task: Deferred) -> AdapterResult<()>;
}

impl<C, H> Instance for Adapter<C, H>
where
    C: Client,
    C::Capability: Dispatch<C>,
    H: HostObject,
{
    fn class_name(&self) -> &'static str {
        Adapter::class_name(self)
    }

    fn strategy_kind(&self) -> StrategyKind {
        <StrategyOf<C> as Strategy<C>>::KIND
    }

    fn message(&mut self, selector: &str, args: &[Atom]) -> AdapterResult<()> {
        Adapter::message(self, selector, args)
    }

    fn parameter(&self, name: &str) -> AdapterResult<Vec<Atom>> {
        Adapter::parameter(self, name)
    }

    fn configure(&mut self, sample_rate: f64, block_size: usize) -> AdapterResult<()> {
        Adapter::configure(self, sample_rate, block_size)
    }

    fn perform(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        num_samples: usize,
    ) -> AdapterResult<()> {
        Adapter::perform(self, inputs, outputs, num_samples)
    }

    fn run_deferred(&mut self, task: Deferred) -> AdapterResult<()> {
        Adapter::run_deferred(self, task)
    }
}
