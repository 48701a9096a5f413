//! `bgx-core` — foundational types for the bgx behavior-graph runtime.
//!
//! This crate is a dependency of every other `bgx-*` crate.  It intentionally
//! has no `bgx-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `ConnectionId`, `PhaseId`, `StateTag`, `TargetId` |
//! | [`vec2`]   | `Vec2`, `Facing` (left/right mirror)                      |
//! | [`rng`]    | `Dice` trait, `ActorRng` (per-actor), `SequenceDice`      |
//! | [`damage`] | `DamageInfo` — the record passed through damage filters   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.         |

pub mod damage;
pub mod ids;
pub mod rng;
pub mod vec2;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use damage::DamageInfo;
pub use ids::{ConnectionId, NodeId, PhaseId, StateTag, TargetId};
pub use rng::{ActorRng, Dice, SequenceDice};
pub use vec2::{Facing, Vec2};
