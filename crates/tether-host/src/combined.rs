//! Combined strategy for clients that are both real-time and offline.
//!
//! Pure composition: class setup, outlets and audio setup run through both
//! halves in sequence, and each operation goes to the half that owns it.

use tether_core::{AdapterResult, OfflineClient, RealTimeClient, Sample, StrategyKind};

use crate::class::ClassSpec;
use crate::dispatch::{AudioContext, MessageContext, Strategy};
use crate::host::{Deferred, HostObject};
use crate::offline::NonRealTime;
use crate::realtime::RealTime;

/// Real-time and non-real-time strategies side by side.
pub struct Combined<C> {
    real_time: RealTime<C>,
    offline: NonRealTime<C>,
}

impl<C> Combined<C> {
    #[inline]
    pub fn real_time(&self) -> &RealTime<C> {
        &self.real_time
    }

    #[inline]
    pub fn offline(&self) -> &NonRealTime<C> {
        &self.offline
    }
}

impl<C: RealTimeClient + OfflineClient> Strategy<C> for Combined<C> {
    const KIND: StrategyKind = StrategyKind::Combined;

    fn new() -> Self {
        Self {
            real_time: <RealTime<C> as Strategy<C>>::new(),
            offline: <NonRealTime<C> as Strategy<C>>::new(),
        }
    }

    fn setup(spec: &mut ClassSpec) {
        <RealTime<C> as Strategy<C>>::setup(spec);
        <NonRealTime<C> as Strategy<C>>::setup(spec);
    }

    fn create_outlets<H: HostObject>(&mut self, host: &mut H, client: &C) {
        // Completion outlet comes before the control list outlet
        self.offline.create_outlets(host, client);
        self.real_time.create_outlets(host, client);
    }

    fn setup_audio<H: HostObject>(&mut self, host: &mut H, num_ins: usize, num_outs: usize) {
        self.real_time.setup_audio(host, num_ins, num_outs);
        self.offline.setup_audio(host, num_ins, num_outs);
    }

    fn configure<H: HostObject>(
        &mut self,
        ctx: MessageContext<'_, C, H>,
        sample_rate: f64,
        block_size: usize,
    ) -> AdapterResult<()> {
        self.real_time.configure(ctx, sample_rate, block_size)
    }

    fn perform(
        &mut self,
        ctx: AudioContext<'_, C>,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        num_samples: usize,
    ) -> AdapterResult<()> {
        self.real_time.perform(ctx, inputs, outputs, num_samples)
    }

    fn trigger<H: HostObject>(&mut self, ctx: MessageContext<'_, C, H>) -> AdapterResult<()> {
        self.offline.trigger(ctx)
    }

    fn run_deferred<H: HostObject>(
        &mut self,
        ctx: MessageContext<'_, C, H>,
        task: Deferred,
    ) -> AdapterResult<()> {
        match task {
            Deferred::ControlOut => self.real_time.run_deferred(ctx, task),
            Deferred::Process => self.offline.run_deferred(ctx, task),
        }
    }
}
