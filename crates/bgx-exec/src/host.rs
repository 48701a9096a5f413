//! The `Host` trait — what the executor needs from its actor.

use bgx_core::{Facing, Vec2};
use bgx_graph::ActionSpec;

/// The actor-side contract.
///
/// The executor decides *which* behavioral state is active; everything
/// physical stays on the host side of this trait.  The executor never
/// mutates position or velocity — it only reads them for sensing and range
/// checks, and calls [`perform`][Self::perform] for graph-authored side
/// effects.
///
/// Implementations are plain synchronous methods, called from within
/// `decide`/`apply_damage`/`post_message` on the host's own thread; no
/// `Send`/`Sync` bound is required.
pub trait Host {
    /// `(current, starting)` health.  Starting health of zero disables
    /// health-percentage exits rather than dividing by it.
    fn health(&self) -> (f32, f32);

    /// Current world position of the actor.
    fn position(&self) -> Vec2;

    /// Current horizontal facing.
    fn facing(&self) -> Facing;

    /// Execute one graph-authored action (play a sound, fire a projectile,
    /// drop loot, …).  Actions run before the transition that owns them is
    /// committed and have no return value visible to the executor.
    fn perform(&mut self, action: &ActionSpec);
}
