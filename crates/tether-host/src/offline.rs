//! Non-real-time strategy: offline processing driven by a trigger.
//!
//! The trigger message never processes inline. It records a pending run
//! and schedules [`Deferred::Process`]; the run happens later in the
//! message context, outside the handler that received the trigger, and
//! always goes to completion.
//!
//! Two triggers before the first run complete simply queue two runs. They
//! are neither coalesced nor rejected, and each runs the client once
//! against the parameters current at the time it runs.

use std::marker::PhantomData;

use tether_core::{AdapterError, AdapterResult, OfflineClient, StrategyKind};

use crate::class::{ArgKind, ClassSpec};
use crate::dispatch::{MessageContext, Strategy};
use crate::host::{Deferred, HostObject, OutletId, OutletKind};

/// Non-real-time strategy state.
pub struct NonRealTime<C> {
    /// Outlet for the completion notification.
    done_outlet: Option<OutletId>,
    /// Triggers whose run has not happened yet.
    pending: usize,
    _client: PhantomData<fn() -> C>,
}

impl<C> NonRealTime<C> {
    /// Number of triggered runs still waiting.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub(crate) fn request<H>(&mut self, ctx: MessageContext<'_, C, H>) {
        self.pending += 1;
        ctx.scheduler.schedule(Deferred::Process);
    }
}

impl<C: OfflineClient> NonRealTime<C> {
    /// Run one pending process and report its outcome.
    ///
    /// `Ok` bangs the completion outlet. Warnings and errors go to the
    /// diagnostics gateway unconditionally and produce no notification.
    pub(crate) fn run_pending<H: HostObject>(&mut self, ctx: MessageContext<'_, C, H>) {
        if self.pending == 0 {
            log::warn!("{}: deferred process without a trigger", ctx.diagnostics.class_name());
            return;
        }
        self.pending -= 1;

        let outcome = ctx.client.process_offline(ctx.params);
        if outcome.is_ok() {
            if let Some(outlet) = self.done_outlet {
                ctx.host.outlet_bang(outlet);
            }
        } else {
            ctx.diagnostics.report(ctx.host, &outcome);
        }
    }
}

impl<C: OfflineClient> Strategy<C> for NonRealTime<C> {
    const KIND: StrategyKind = StrategyKind::NonRealTime;

    fn new() -> Self {
        Self {
            done_outlet: None,
            pending: 0,
            _client: PhantomData,
        }
    }

    fn setup(spec: &mut ClassSpec) {
        spec.add_method("bang", ArgKind::Gimme);
    }

    fn create_outlets<H: HostObject>(&mut self, host: &mut H, _client: &C) {
        self.done_outlet = Some(host.outlet_new(OutletKind::Bang));
    }

    fn setup_audio<H: HostObject>(&mut self, _host: &mut H, _num_ins: usize, _num_outs: usize) {}

    fn trigger<H: HostObject>(&mut self, ctx: MessageContext<'_, C, H>) -> AdapterResult<()> {
        self.request(ctx);
        Ok(())
    }

    fn run_deferred<H: HostObject>(
        &mut self,
        ctx: MessageContext<'_, C, H>,
        task: Deferred,
    ) -> AdapterResult<()> {
        match task {
            Deferred::Process => {
                self.run_pending(ctx);
                Ok(())
            }
            Deferred::ControlOut => Err(AdapterError::Unsupported(
                "control output is not available for offline clients".to_string(),
            )),
        }
    }
}
