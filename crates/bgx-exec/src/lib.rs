//! `bgx-exec` — the per-actor behavior-graph executor.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|----------------------------------------------------------|
//! | [`executor`]  | `Executor<D>` — decision loop, exit pipeline, phases    |
//! | [`catalogue`] | Interrupt entry points (timer/health/counter/message/damage) |
//! | [`host`]      | `Host` trait — the actor-side contract                   |
//! | [`tick`]      | `TickPhase` — the single per-tick guard value            |
//! | [`error`]     | `ExecError`, `ExecResult<T>`                             |
//!
//! # Tick protocol
//!
//! The host drives one executor per actor, once per simulation tick:
//!
//! ```text
//! executor.begin_tick(dt);              // reset guards, advance timers
//! let state = executor.decide(&mut host, &world);
//! host.run_behavior(state);             // movement/animation — host's concern
//! ```
//!
//! `apply_damage`, `post_message`, `set_counter`, and the `notify_*`
//! feedback calls may arrive at any point inside the host's tick.  Two
//! guards make that interleaving safe: `decide` is idempotent within a
//! tick, and interrupts share a single "already committed" guard with
//! normal transitions, so at most one transition lands per tick and an
//! interrupt always preempts the normal exit scan.
//!
//! # Error policy
//!
//! Configuration faults detected at runtime (unregistered phase name,
//! unconnected random exit, graph hop-limit overflow) log an error and
//! deactivate the executor; the current call returns its sentinel value and
//! the host's tick loop keeps running.  Nothing in this crate panics across
//! the tick boundary.

pub mod catalogue;
pub mod error;
pub mod executor;
pub mod host;
pub mod tick;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ExecError, ExecResult};
pub use executor::Executor;
pub use host::Host;
pub use tick::TickPhase;
