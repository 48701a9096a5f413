//! `bgx-graph` — the immutable behavior-graph model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`node`]      | `NodeKind` tagged union, `ActionSpec`                    |
//! | [`exit`]      | `ExitCondition` catalogue                                |
//! | [`interrupt`] | `Interrupt` kinds, `StateMatcher`, `DamageFilter`        |
//! | [`graph`]     | `Graph` arena, `Connection`, `InterruptCache`, validation |
//! | [`phase`]     | `PhaseTable` — named graphs + interned state tags        |
//! | [`loader`]    | `load_phases_json`, `load_phases_reader`                 |
//! | [`error`]     | `GraphError`, `GraphResult<T>`                           |
//!
//! # Compilation model
//!
//! Authoring tools emit a node/port/connection document keyed by stable
//! string identifiers.  [`loader`] resolves those to dense integer indices
//! and [`Graph::new`] validates the result once, at load time:
//!
//! - exactly one entry node, with at least one outgoing connection;
//! - every connection endpoint in range;
//! - every exit port of a random-choice node connected.
//!
//! A compiled [`PhaseTable`] is immutable for the process lifetime and is
//! shared (`Arc`) across every executor spawned from it.

pub mod error;
pub mod exit;
pub mod graph;
pub mod interrupt;
pub mod loader;
pub mod node;
pub mod phase;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{GraphError, GraphResult};
pub use exit::ExitCondition;
pub use graph::{Connection, Graph, InterruptCache};
pub use interrupt::{DamageFilter, Interrupt, StateMatcher};
pub use loader::{load_phases_json, load_phases_reader};
pub use node::{ActionSpec, NodeKind};
pub use phase::PhaseTable;
