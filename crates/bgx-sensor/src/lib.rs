//! `bgx-sensor` — target acquisition for graph-driven actors.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`world`]  | `World` perception trait, `LayerMask`, `StaticWorld`      |
//! | [`sensor`] | `SensorConfig`, `Sensor` (sight → hearing → forget rule)  |
//! | [`error`]  | `SensorError`, `SensorResult<T>`                           |
//!
//! # Pluggability
//!
//! The executor perceives the world exclusively through the [`World`]
//! trait, so hosts with their own physics (spatial hash, engine-side
//! raycasts) implement it directly.  [`StaticWorld`] is the bundled
//! implementation — point bodies with a shared radius in an R-tree — and
//! is sufficient for tests and headless simulation.

pub mod error;
pub mod sensor;
pub mod world;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SensorError, SensorResult};
pub use sensor::{Sensor, SensorConfig};
pub use world::{LayerMask, StaticWorld, World};
