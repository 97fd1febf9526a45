//! Common types used throughout the Tether adapter.

// =============================================================================
// Block Limits
// =============================================================================
//
// These constants bound the per-block channel storage so that building the
// channel views for a block never allocates. Clients that declare more
// channels than this fail during configuration with a clear error.
// =============================================================================

/// Maximum number of audio channels per direction (inputs or outputs).
///
/// Control-rate outputs count against the same limit since they are handed
/// to the client as one-sample output channels.
pub const MAX_CHANNELS: usize = 32;

/// Maximum fixed arity of a single parameter.
///
/// Multi-element parameters (e.g. a frequency pair) store their elements
/// inline in the descriptor, so the arity is bounded at compile time.
pub const MAX_ARITY: usize = 8;

/// Sample type exchanged with the host.
pub type Sample = f32;
