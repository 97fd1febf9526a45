//! Host collaborator traits.
//!
//! The adapter never talks to a concrete host runtime. Everything it needs
//! from the host (inlets and outlets, notifications, console diagnostics,
//! named buffer storage, deferred execution) goes through the two traits in
//! this module. A host bridge implements them once; every adapted class
//! then runs on top of it.

use std::sync::Arc;

use tether_core::{Atom, BufferStore};

/// Handle to an outlet created by [`HostObject::outlet_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutletId(pub usize);

/// Kind of outlet to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutletKind {
    /// Completion notifications.
    Bang,
    /// List-valued control output.
    List,
    /// Audio signal output.
    Signal,
}

/// The per-instance host object the adapter is attached to.
///
/// All methods are called from the message context, except where noted.
/// The adapter never calls into the host object from
/// [`Adapter::perform`](crate::Adapter::perform).
pub trait HostObject: Send + 'static {
    /// Create an additional signal inlet.
    ///
    /// The first inlet of a host object already accepts signal, so the
    /// adapter creates one fewer than the client's input channel count.
    fn signal_inlet_new(&mut self);

    /// Create an outlet and return its handle.
    fn outlet_new(&mut self, kind: OutletKind) -> OutletId;

    /// Emit a completion notification.
    fn outlet_bang(&mut self, outlet: OutletId);

    /// Emit a list of values.
    fn outlet_list(&mut self, outlet: OutletId, atoms: &[Atom]);

    /// Post a non-fatal warning to the host console.
    fn post_warning(&mut self, message: &str);

    /// Post an error to the host console. The instance remains usable.
    fn post_error(&mut self, message: &str);

    /// Named buffer storage, if the host has any.
    fn buffer_store(&self) -> Option<Arc<dyn BufferStore>> {
        None
    }
}

/// Work deferred out of the calling context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Deliver staged control-rate values (posted by the audio context).
    ControlOut,
    /// Run one pending offline process (posted by a trigger).
    Process,
}

/// Deferred execution into the message context.
///
/// A scheduler is bound to one instance. Each scheduled task must
/// eventually be handed back to that instance through
/// [`Adapter::run_deferred`](crate::Adapter::run_deferred), on the message
/// context, after the scheduling call has returned.
///
/// # Real-Time Safety
///
/// `schedule` is called from the audio-block context. Implementations must
/// not block, lock, or allocate there (typically a lock-free queue push or
/// a host timer with zero delay).
pub trait Scheduler: Send + Sync {
    fn schedule(&self, task: Deferred);
}
