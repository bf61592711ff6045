//! Seeded draw primitives
//!
//! Every random-looking value in the generated dataset traces back to
//! [`unit`], a pure map from an integer seed to a float in `[0, 1)`.
//! There is no shared generator state: each draw builds a throwaway
//! ChaCha generator from its seed, so the same seed always yields the
//! same value regardless of call order, thread, or platform.
//!
//! Independent draw streams are kept apart by seed namespacing: traces
//! and events start from disjoint bases, each step inside a trace gets
//! its own sub-seed, and per-field draws add small offsets through the
//! helpers below rather than ad hoc arithmetic at call sites.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Base seed for the execution-trace stream.
pub const TRACE_SEED_BASE: u64 = 1000;

/// Base seed for the activity-event stream. Disjoint from
/// [`TRACE_SEED_BASE`] so the two streams never share draws.
pub const EVENT_SEED_BASE: u64 = 2000;

/// Stride between per-step sub-seeds within one trace. Leaves room for
/// per-field offsets inside a step without colliding with the next one.
const STEP_SEED_STRIDE: u64 = 100;

// ═══════════════════════════════════════════════════════════════════════════
// Core draw
// ═══════════════════════════════════════════════════════════════════════════

/// Map an integer seed to a float in `[0, 1)`.
///
/// Pure and total: no hidden state, no ambient randomness. ChaCha output
/// is specified by the algorithm, so results are bit-stable across
/// platforms and runs, and consecutive seeds produce decorrelated values.
pub fn unit(seed: u64) -> f64 {
    ChaCha8Rng::seed_from_u64(seed).gen_range(0.0..1.0)
}

/// Draw a float uniformly from `[lo, hi)`.
pub fn unit_in(seed: u64, lo: f64, hi: f64) -> f64 {
    lo + unit(seed) * (hi - lo)
}

/// Draw an index uniformly from `[0, len)`. Panics if `len` is zero.
pub fn pick_index(seed: u64, len: usize) -> usize {
    assert!(len > 0, "pick_index on empty range");
    let idx = (unit(seed) * len as f64) as usize;
    idx.min(len - 1)
}

/// Draw a boolean that is `true` with the given probability.
pub fn chance(seed: u64, probability: f64) -> bool {
    unit(seed) < probability
}

// ═══════════════════════════════════════════════════════════════════════════
// Stream derivation
// ═══════════════════════════════════════════════════════════════════════════

/// Seed for the i-th trace in a batch.
pub fn trace_seed(base: u64, index: usize) -> u64 {
    base + index as u64
}

/// Seed for the i-th event in a batch.
pub fn event_seed(base: u64, index: usize) -> u64 {
    base + index as u64
}

/// Sub-seed for the i-th step of a trace, independent of the trace-level
/// draws and of other steps.
pub fn step_seed(trace_seed: u64, step_index: usize) -> u64 {
    trace_seed + step_index as u64 * STEP_SEED_STRIDE
}

/// Seed for one named field within a record's draw budget.
///
/// Field offsets must stay below [`STEP_SEED_STRIDE`]; every caller uses
/// a constant from its own `field` namespace so new draws cannot silently
/// collide with existing ones.
pub fn field_seed(seed: u64, field: u64) -> u64 {
    debug_assert!(field < STEP_SEED_STRIDE);
    seed + field
}
