//! Real-time strategy: block processing on the host's audio context.
//!
//! # Lifecycle
//!
//! ```text
//! new --[configure]--> configured --[perform]*--> ...
//!          ^                |
//!          +--[configure]---+   (client replaced wholesale)
//! ```
//!
//! Every configure rebuilds the client from the current parameters and
//! reallocates the control slots. `perform` rebinds channel views to the
//! host's storage for the current block length; control-rate values are
//! posted to a [`ControlMailbox`] and delivered later, in the message
//! context, as a single list.

use std::marker::PhantomData;

use tether_core::{AdapterError, AdapterResult, Block, RealTimeClient, Sample, StrategyKind, MAX_CHANNELS};

use crate::class::{ArgKind, ClassSpec};
use crate::dispatch::{AudioContext, MessageContext, Strategy};
use crate::host::{Deferred, HostObject, OutletId, OutletKind};
use crate::mailbox::ControlMailbox;

/// Real-time strategy state.
pub struct RealTime<C> {
    /// List outlet for control-rate output, if the client has any.
    list_outlet: Option<OutletId>,
    /// Signal inputs registered with the host.
    num_inputs: usize,
    /// Audio outputs of the configured client.
    num_outputs: usize,
    /// Staged control values, one slot per control channel.
    controls: Vec<Sample>,
    mailbox: Option<ControlMailbox>,
    sample_rate: Option<f64>,
    _client: PhantomData<fn() -> C>,
}

impl<C> RealTime<C> {
    /// Sample rate of the last successful configure.
    pub fn sample_rate(&self) -> Option<f64> {
        self.sample_rate
    }

    #[inline]
    pub fn is_configured(&self) -> bool {
        self.sample_rate.is_some()
    }

    /// Deliver staged control values to the list outlet.
    pub(crate) fn deliver_control<H: HostObject>(&mut self, host: &mut H) {
        let Some(mailbox) = &self.mailbox else {
            log::warn!("control delivery without control outputs");
            return;
        };
        // Drain even without an outlet so the next post schedules again
        let Some(atoms) = mailbox.drain() else {
            return;
        };
        match self.list_outlet {
            Some(outlet) => host.outlet_list(outlet, &atoms),
            None => log::warn!("control values dropped: no control outlet"),
        }
    }
}

impl<C: RealTimeClient> Strategy<C> for RealTime<C> {
    const KIND: StrategyKind = StrategyKind::RealTime;

    fn new() -> Self {
        Self {
            list_outlet: None,
            num_inputs: 0,
            num_outputs: 0,
            controls: Vec::new(),
            mailbox: None,
            sample_rate: None,
            _client: PhantomData,
        }
    }

    fn setup(spec: &mut ClassSpec) {
        spec.add_method("dsp", ArgKind::Cant);
        spec.add_method("signal", ArgKind::None);
    }

    fn create_outlets<H: HostObject>(&mut self, host: &mut H, client: &C) {
        if client.control_channels_out() > 0 {
            self.list_outlet = Some(host.outlet_new(OutletKind::List));
        }
    }

    fn setup_audio<H: HostObject>(&mut self, host: &mut H, num_ins: usize, num_outs: usize) {
        self.num_inputs = num_ins;
        // The first inlet already carries signal
        for _ in 1..num_ins {
            host.signal_inlet_new();
        }
        for _ in 0..num_outs {
            host.outlet_new(OutletKind::Signal);
        }
    }

    fn configure<H: HostObject>(
        &mut self,
        ctx: MessageContext<'_, C, H>,
        sample_rate: f64,
        block_size: usize,
    ) -> AdapterResult<()> {
        let mut client = C::new(ctx.params);
        client.set_sample_rate(sample_rate);

        let audio_in = client.audio_channels_in();
        let audio_out = client.audio_channels_out();
        let control_out = client.control_channels_out();
        if audio_in.max(audio_out).max(control_out) > MAX_CHANNELS {
            return Err(AdapterError::Configuration(format!(
                "client declares {} audio inputs, {} audio outputs and {} control outputs, limit is {} each",
                audio_in, audio_out, control_out, MAX_CHANNELS
            )));
        }
        if (audio_out > 0) == (control_out > 0) {
            return Err(AdapterError::Configuration(format!(
                "client must have either audio outputs or control outputs, has {} audio and {} control",
                audio_out, control_out
            )));
        }

        *ctx.client = client;
        self.num_outputs = audio_out;
        self.controls = vec![0.0; control_out];
        self.mailbox = (control_out > 0).then(|| ControlMailbox::new(control_out));
        self.sample_rate = Some(sample_rate);

        log::debug!(
            "{}: configured at {} Hz, block size {}",
            ctx.diagnostics.class_name(),
            sample_rate,
            block_size
        );
        Ok(())
    }

    fn perform(
        &mut self,
        ctx: AudioContext<'_, C>,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        num_samples: usize,
    ) -> AdapterResult<()> {
        if !self.is_configured() {
            return Err(AdapterError::InvalidState("perform before configure".to_string()));
        }
        let num_inputs = self.num_inputs.min(inputs.len());
        let num_outputs = self.num_outputs.min(outputs.len());
        if inputs[..num_inputs].iter().any(|c| c.len() < num_samples)
            || outputs[..num_outputs].iter().any(|c| c.len() < num_samples)
        {
            return Err(AdapterError::InvalidState(format!(
                "channel storage shorter than block of {}",
                num_samples
            )));
        }

        let inputs = inputs[..num_inputs].iter().copied();
        match &self.mailbox {
            Some(mailbox) => {
                let mut block = Block::with_control_outputs(inputs, self.controls.chunks_mut(1), num_samples);
                ctx.client.process(ctx.params, &mut block);
                if mailbox.post(&self.controls) {
                    ctx.scheduler.schedule(Deferred::ControlOut);
                }
            }
            None => {
                let outputs = outputs[..num_outputs].iter_mut().map(|o| &mut **o);
                let mut block = Block::new(inputs, outputs, num_samples);
                ctx.client.process(ctx.params, &mut block);
            }
        }
        Ok(())
    }

    fn run_deferred<H: HostObject>(
        &mut self,
        ctx: MessageContext<'_, C, H>,
        task: Deferred,
    ) -> AdapterResult<()> {
        match task {
            Deferred::ControlOut => {
                self.deliver_control(ctx.host);
                Ok(())
            }
            Deferred::Process => Err(AdapterError::Unsupported(
                "offline processing is not available for real-time clients".to_string(),
            )),
        }
    }
}
