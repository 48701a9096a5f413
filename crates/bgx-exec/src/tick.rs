//! `TickPhase` — the single per-tick guard value.
//!
//! The source material tracked three ad hoc booleans (`hasDecided`,
//! `hasTransitionedThisFrame`, `hasHadInterruptThisFrame`).  Folding them
//! into one closed state value makes the mutual-exclusion invariant
//! auditable: every legal per-tick history is a path through this enum,
//! and `has_committed` is the one guard shared by interrupts and normal
//! transitions.

/// What has already happened in the current tick.
///
/// Reset to [`Fresh`][TickPhase::Fresh] at the top of every tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TickPhase {
    /// Nothing has happened yet.
    #[default]
    Fresh,
    /// `decide` ran without committing a transition.
    Decided,
    /// A normal transition committed; `decide` has necessarily run.
    Transitioned,
    /// An interrupt committed a transition before `decide` ran.
    Interrupted,
    /// An interrupt committed and `decide` has also run (in either order).
    InterruptedDecided,
}

impl TickPhase {
    /// `decide` already ran this tick — further calls return the cached state.
    #[inline]
    pub fn has_decided(self) -> bool {
        matches!(
            self,
            TickPhase::Decided | TickPhase::Transitioned | TickPhase::InterruptedDecided
        )
    }

    /// A transition (normal or interrupt) already committed this tick —
    /// no further transition may commit.
    #[inline]
    pub fn has_committed(self) -> bool {
        matches!(
            self,
            TickPhase::Transitioned | TickPhase::Interrupted | TickPhase::InterruptedDecided
        )
    }

    /// Record that `decide` ran.
    pub fn note_decided(&mut self) {
        *self = match *self {
            TickPhase::Fresh       => TickPhase::Decided,
            TickPhase::Interrupted => TickPhase::InterruptedDecided,
            other => other,
        };
    }

    /// Record a committed normal transition.
    pub fn note_transition(&mut self) {
        *self = match *self {
            TickPhase::Fresh | TickPhase::Decided => TickPhase::Transitioned,
            other => other,
        };
    }

    /// Record a committed interrupt transition.
    pub fn note_interrupt(&mut self) {
        *self = match *self {
            TickPhase::Fresh   => TickPhase::Interrupted,
            TickPhase::Decided => TickPhase::InterruptedDecided,
            other => other,
        };
    }
}
