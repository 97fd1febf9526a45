//! The adapter: one host object driving one client.
//!
//! [`Adapter`] owns everything an instance needs: the host object, the
//! working parameter set and its construction-time snapshot, the client, and
//! the strategy selected for the client's capability. Host messages arrive
//! through [`Adapter::message`], audio through [`Adapter::perform`], and
//! deferred work comes back through [`Adapter::run_deferred`].
//!
//! # Construction
//!
//! 1. Parameters start at their defaults.
//! 2. Arguments before the first `@tag` fill the fixed parameters in order.
//! 3. Each tagged run sets the mutable parameter it names.
//! 4. The whole set is constrained once, then snapshotted for `reset`.
//! 5. The client is built from the resulting values.
//! 6. Outlets are created: completion, control list, then signal.
//!
//! # Concurrency
//!
//! Every entry point takes `&mut self`, so a reconfiguration can never
//! overlap a block in flight. A host that configures and performs on
//! different threads must serialise access to the instance. The audio path
//! never calls into the host object; control values and completion signals
//! go through the [`Scheduler`] instead.

use std::sync::Arc;

use tether_core::{
    AdapterError, AdapterResult, Atom, BufferStore, ClassConfig, Client, Outcome, ParameterSet,
    Parameters, Sample, StrategyKind,
};

use crate::class::{ArgKind, ClassSpec};
use crate::diagnostics::Diagnostics;
use crate::dispatch::{AudioContext, Dispatch, MessageContext, Strategy, StrategyOf};
use crate::host::{Deferred, HostObject, Scheduler};
use crate::marshal::{self, split_tags};

/// Lend adapter fields to a strategy as a [`MessageContext`].
macro_rules! message_context {
    ($adapter:expr) => {
        MessageContext {
            client: &mut $adapter.client,
            params: &$adapter.params,
            host: &mut $adapter.host,
            scheduler: &*$adapter.scheduler,
            diagnostics: &$adapter.diagnostics,
        }
    };
}

/// A client of type `C` attached to a host object of type `H`.
pub struct Adapter<C, H>
where
    C: Client,
    C::Capability: Dispatch<C>,
    H: HostObject,
{
    config: &'static ClassConfig,
    host: H,
    scheduler: Arc<dyn Scheduler>,
    store: Option<Arc<dyn BufferStore>>,
    diagnostics: Diagnostics,
    params: ParameterSet,
    snapshot: ParameterSet,
    client: C,
    strategy: StrategyOf<C>,
}

impl<C, H> Adapter<C, H>
where
    C: Client,
    C::Capability: Dispatch<C>,
    H: HostObject,
{
    /// Method table for the class adapting `C`.
    pub fn class_spec(config: &'static ClassConfig) -> ClassSpec {
        let mut spec = ClassSpec::new(config);
        <StrategyOf<C> as Strategy<C>>::setup(&mut spec);
        spec.add_method("reset", ArgKind::None);
        spec.add_method("warnings", ArgKind::Float);
        for descriptor in C::Parameters::descriptors() {
            if !descriptor.is_fixed() {
                spec.add_method(descriptor.selector(), ArgKind::Gimme);
            }
        }
        spec
    }

    /// Create an instance from host creation arguments.
    ///
    /// Constraint adjustments are reported if the class starts verbose.
    /// Surplus positional arguments are reported regardless.
    pub fn new(
        config: &'static ClassConfig,
        mut host: H,
        scheduler: Arc<dyn Scheduler>,
        args: &[Atom],
    ) -> AdapterResult<Self> {
        let mut diagnostics = Diagnostics::new(config.name, config.warnings);
        let store = host.buffer_store();
        let mut params = ParameterSet::new(C::Parameters::descriptors());

        let split = split_tags(args);

        // Verbosity applies to every report below, whatever its tag position
        for run in split.runs.iter().filter(|run| run.name == "warnings") {
            diagnostics.set_verbose(run.args.first().is_some_and(|a| a.as_float() != 0.0));
        }

        let mut report = Outcome::ok();
        let consumed = marshal::fetch_fixed(&mut params, split.positional, store.as_ref(), &mut report)?;
        diagnostics.report_gated(&mut host, &report);

        for run in &split.runs {
            if run.name == "warnings" {
                continue;
            }
            match mutable_index(&params, run.name) {
                Some(index) => {
                    let mut report = Outcome::ok();
                    marshal::set(&mut params, index, run.args, store.as_ref(), Some(&mut report))?;
                    diagnostics.report_gated(&mut host, &report);
                }
                None => diagnostics.warn(&mut host, &format!("Unknown attribute @{}", run.name)),
            }
        }

        for outcome in params.keep_constrained() {
            diagnostics.report_gated(&mut host, &outcome);
        }
        let snapshot = params.clone();

        let client = C::new(&params);
        let mut strategy = <StrategyOf<C> as Strategy<C>>::new();
        strategy.create_outlets(&mut host, &client);
        strategy.setup_audio(&mut host, client.audio_channels_in(), client.audio_channels_out());

        if split.positional.len() > consumed {
            diagnostics.warn(
                &mut host,
                &format!(
                    "Too many arguments. Got {}, expect at most {}",
                    split.positional.len(),
                    C::Parameters::fixed_arity()
                ),
            );
        }

        log::debug!(
            "{}: instance created ({:?}, {} parameters)",
            config.name,
            <StrategyOf<C> as Strategy<C>>::KIND,
            params.len()
        );

        Ok(Self {
            config,
            host,
            scheduler,
            store,
            diagnostics,
            params,
            snapshot,
            client,
            strategy,
        })
    }

    // =========================================================================
    // Messages
    // =========================================================================

    /// Dispatch a host message.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnknownSelector`] for anything that is neither a
    /// control command nor a mutable parameter, and
    /// [`AdapterError::Unsupported`] for `bang` on a real-time-only client.
    pub fn message(&mut self, selector: &str, args: &[Atom]) -> AdapterResult<()> {
        match selector {
            "reset" => {
                self.reset();
                Ok(())
            }
            "warnings" => {
                let verbose = args.first().is_some_and(|a| a.as_float() != 0.0);
                self.diagnostics.set_verbose(verbose);
                Ok(())
            }
            "bang" => self.trigger(),
            "signal" if <StrategyOf<C> as Strategy<C>>::KIND != StrategyKind::NonRealTime => Ok(()),
            _ => self.set_parameter(selector, args),
        }
    }

    /// Set a mutable parameter from message arguments.
    ///
    /// Constraint adjustments and rejections are reported only when
    /// verbose.
    pub fn set_parameter(&mut self, selector: &str, args: &[Atom]) -> AdapterResult<()> {
        let index = mutable_index(&self.params, selector)
            .ok_or_else(|| AdapterError::UnknownSelector(selector.to_string()))?;

        let mut report = Outcome::ok();
        let verbose = self.diagnostics.verbose();
        marshal::set(
            &mut self.params,
            index,
            args,
            self.store.as_ref(),
            verbose.then_some(&mut report),
        )?;
        self.diagnostics.report_gated(&mut self.host, &report);
        Ok(())
    }

    /// Current value of a parameter as host atoms.
    pub fn parameter(&self, name: &str) -> AdapterResult<Vec<Atom>> {
        self.params
            .index_of(name)
            .and_then(|index| marshal::get(&self.params, index))
            .ok_or_else(|| AdapterError::UnknownParameter(name.to_string()))
    }

    /// Restore the parameters captured at construction.
    pub fn reset(&mut self) {
        self.params.clone_from(&self.snapshot);
    }

    /// Offline trigger.
    pub fn trigger(&mut self) -> AdapterResult<()> {
        self.strategy.trigger(message_context!(self))
    }

    // =========================================================================
    // Audio
    // =========================================================================

    /// Handle a sample-rate or block-size change.
    ///
    /// # Errors
    ///
    /// [`AdapterError::Configuration`] if the rebuilt client reports both
    /// audio and control outputs, or neither.
    pub fn configure(&mut self, sample_rate: f64, block_size: usize) -> AdapterResult<()> {
        self.strategy
            .configure(message_context!(self), sample_rate, block_size)
    }

    /// Process one block. Call from the audio context only.
    pub fn perform(
        &mut self,
        inputs: &[&[Sample]],
        outputs: &mut [&mut [Sample]],
        num_samples: usize,
    ) -> AdapterResult<()> {
        let ctx = AudioContext {
            client: &mut self.client,
            params: &self.params,
            scheduler: &*self.scheduler,
        };
        self.strategy.perform(ctx, inputs, outputs, num_samples)
    }

    /// Run a task the scheduler deferred. Call from the message context.
    pub fn run_deferred(&mut self, task: Deferred) -> AdapterResult<()> {
        self.strategy.run_deferred(message_context!(self), task)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn config(&self) -> &'static ClassConfig {
        self.config
    }

    #[inline]
    pub fn class_name(&self) -> &'static str {
        self.config.name
    }

    #[inline]
    pub fn verbose(&self) -> bool {
        self.diagnostics.verbose()
    }

    #[inline]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    #[inline]
    pub fn snapshot(&self) -> &ParameterSet {
        &self.snapshot
    }

    #[inline]
    pub fn client(&self) -> &C {
        &self.client
    }

    #[inline]
    pub fn strategy(&self) -> &StrategyOf<C> {
        &self.strategy
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

fn mutable_index(params: &ParameterSet, selector: &str) -> Option<usize> {
    params
        .index_of(selector)
        .filter(|&index| params.descriptor(index).is_some_and(|d| !d.is_fixed()))
}

impl<C, H> Drop for Adapter<C, H>
where
    C: Client,
    C::Capability: Dispatch<C>,
    H: HostObject,
{
    fn drop(&mut self) {
        log::debug!("{}: instance destroyed", self.config.name);
    }
}
