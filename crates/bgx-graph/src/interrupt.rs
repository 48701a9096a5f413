//! Out-of-band interrupt definitions.
//!
//! Interrupts live in the graph as [`NodeKind::Interrupt`][crate::NodeKind]
//! nodes off the traversable path.  They are grouped by kind at compile
//! time (see [`InterruptCache`][crate::InterruptCache]); the executor
//! evaluates each group at its own entry point — timers and health inside
//! the per-tick decision, counter on counter writes, message and damage
//! when the host delivers one.  A firing interrupt walks its exit exactly
//! like a behavioral node would, preempting the tick's normal transition.

use bgx_core::{DamageInfo, StateTag};

// ── Interrupt ─────────────────────────────────────────────────────────────────

/// One interrupt definition.  Runtime state (countdowns, fired latches)
/// lives in the executor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interrupt {
    /// Counts down from `period_secs`; on expiry, fires with probability
    /// `percent`/100.  `looped` re-seeds the countdown after every expiry
    /// (whether or not the roll succeeded); one-shot timers are consumed
    /// by their first expiry.
    Timer {
        period_secs: f32,
        looped:      bool,
        percent:     f32,
    },

    /// Fires when a counter write reaches `trigger`.  With `or_above`, any
    /// write crossing from below `trigger` to `trigger` or above fires;
    /// without it, only an exact hit does.
    Counter { trigger: i32, or_above: bool },

    /// Fires once per phase when current health first drops to `trigger`
    /// or below.
    Health { trigger: f32 },

    /// Fires when the host posts a message whose key matches exactly.
    Message { key: String },

    /// Matched against the current behavioral state whenever damage
    /// arrives; rewrites the damage through `filters` and then fires.
    Damage {
        states:  StateMatcher,
        filters: Vec<DamageFilter>,
    },
}

impl Interrupt {
    /// Short label for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Interrupt::Timer { .. }   => "timer",
            Interrupt::Counter { .. } => "counter",
            Interrupt::Health { .. }  => "health",
            Interrupt::Message { .. } => "message",
            Interrupt::Damage { .. }  => "damage",
        }
    }
}

// ── StateMatcher ──────────────────────────────────────────────────────────────

/// Which behavioral states a damage interrupt applies to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateMatcher {
    /// Applies in every state.
    Any,
    /// Applies only while the current state tag is one of these.
    OneOf(Vec<StateTag>),
}

impl StateMatcher {
    #[inline]
    pub fn matches(&self, state: StateTag) -> bool {
        match self {
            StateMatcher::Any => true,
            StateMatcher::OneOf(tags) => tags.contains(&state),
        }
    }
}

// ── DamageFilter ──────────────────────────────────────────────────────────────

/// One step of a damage-rewrite chain.
///
/// Filters compose left to right over the damage amount; the chained result
/// is floored at zero.  Chains let designers express armor ("scale 0.5,
/// then subtract 2"), caps, and outright immunity per state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageFilter {
    /// Multiply the amount by a factor.
    Scale(f32),
    /// Add a (possibly negative) flat amount.
    Offset(f32),
    /// Cap the amount from above.
    ClampMax(f32),
    /// Raise the amount from below.
    ClampMin(f32),
    /// Replace the amount outright.
    Set(f32),
}

impl DamageFilter {
    /// Apply this single filter step.
    #[inline]
    pub fn apply(self, amount: f32) -> f32 {
        match self {
            DamageFilter::Scale(f)    => amount * f,
            DamageFilter::Offset(d)   => amount + d,
            DamageFilter::ClampMax(m) => amount.min(m),
            DamageFilter::ClampMin(m) => amount.max(m),
            DamageFilter::Set(v)      => v,
        }
    }

    /// Run a whole chain over a damage record.  The source passes through
    /// untouched; the amount is folded through every filter and floored at
    /// zero.
    pub fn apply_chain(filters: &[DamageFilter], hit: DamageInfo) -> DamageInfo {
        let amount = filters
            .iter()
            .fold(hit.amount, |acc, f| f.apply(acc))
            .max(0.0);
        DamageInfo { amount, ..hit }
    }
}
