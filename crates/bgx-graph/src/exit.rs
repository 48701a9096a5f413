//! The fixed catalogue of exit conditions.
//!
//! An exit condition is a predicate attached to one outgoing port of a
//! behavioral node.  The executor evaluates a node's conditions in
//! declaration order each decision; the first true condition selects its
//! port (no further conditions are checked that tick).

/// One exit predicate.  Kind-specific parameters are inline; evaluation
/// state (timers, hit counts, …) lives in the executor, never here — the
/// graph stays immutable and shareable.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitCondition {
    /// True once the current state has been held for `secs` seconds.
    Timer { secs: f32 },

    /// Every `secs` seconds the state timer resets and the exit succeeds
    /// with probability `percent`/100.  The reset happens regardless of the
    /// roll's outcome — a deliberate periodic re-roll, not a bug.
    TimerPlusRandom { secs: f32, percent: f32 },

    /// True once the host has signaled movement completion for the current
    /// state.  Edge-triggered; consumed on read.
    MoveComplete,

    /// True once `count` damage events have been received in the current
    /// state.
    NumberOfHits { count: u32 },

    /// True once the executor's general-purpose counter reaches `count`.
    CounterReaches { count: i32 },

    /// True once current health / starting health drops to `percent`/100
    /// or below.
    HealthPercentage { percent: f32 },

    /// True once the sensor reports an acquired target.
    SensePlayer,

    /// Re-runs the sensor and is true iff no target remains afterwards.
    LostPlayerTarget,

    /// Requires an acquired target.  `range > 0`: true when the target is
    /// within `range` units.  `range < 0`: true when the target is at least
    /// `|range|` units away.  `range == 0`: true whenever a target exists.
    TargetWithinRange { range: f32 },

    /// Unconditionally true.  Used as a default fallback; must be last in
    /// the list if used.
    Always,

    /// Never true.  Disables a slot without deleting it (and without
    /// renumbering the ports after it).
    Disabled,
}

impl ExitCondition {
    /// Short label for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ExitCondition::Timer { .. }            => "timer",
            ExitCondition::TimerPlusRandom { .. }  => "timer_plus_random",
            ExitCondition::MoveComplete            => "move_complete",
            ExitCondition::NumberOfHits { .. }     => "number_of_hits",
            ExitCondition::CounterReaches { .. }   => "counter_reaches",
            ExitCondition::HealthPercentage { .. } => "health_percentage",
            ExitCondition::SensePlayer             => "sense_player",
            ExitCondition::LostPlayerTarget        => "lost_player_target",
            ExitCondition::TargetWithinRange { .. } => "target_within_range",
            ExitCondition::Always                  => "always",
            ExitCondition::Disabled                => "disabled",
        }
    }
}
