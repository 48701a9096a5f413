//! Node kinds — the closed tagged union at the heart of the graph model.

use bgx_core::StateTag;

use crate::exit::ExitCondition;
use crate::interrupt::Interrupt;

/// The single unconditional exit slot shared by every `Step` node.
const STEP_EXITS: [ExitCondition; 1] = [ExitCondition::Always];

// ── ActionSpec ────────────────────────────────────────────────────────────────

/// A side-effecting action attached to a connection.
///
/// Opaque to the executor: when the owning exit is taken the executor calls
/// `Host::perform` with this spec and moves on.  The key and arguments are
/// whatever the host's action registry understands (play a sound, fire a
/// projectile, drop loot, …).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSpec {
    /// Host-defined action name.
    pub key: String,
    /// Host-defined numeric arguments.
    pub args: Vec<f32>,
}

impl ActionSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), args: Vec::new() }
    }

    pub fn with_args(key: impl Into<String>, args: Vec<f32>) -> Self {
        Self { key: key.into(), args }
    }
}

// ── NodeKind ──────────────────────────────────────────────────────────────────

/// One authored node in a compiled graph.  `NodeId` is the index into the
/// graph's node arena.
///
/// Behavioral nodes (`Step`, `Choice`, `RandomChoice`) carry the [`StateTag`]
/// the executor reports to the host while the node is current.  Structural
/// nodes (`Entry`, `ChangePhase`, `Action`, `Interrupt`) are never current:
/// they are traversed, redirected through, or scanned out-of-band.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Where traversal starts when the graph's phase is entered.
    /// Exactly one per graph; its single exit (port 0) is walked
    /// immediately on phase entry.
    Entry,

    /// A behavioral state with a single unconditional exit on port 0 —
    /// held until the next decision, then left.
    Step { state: StateTag },

    /// A behavioral state with an ordered list of exit conditions, one
    /// outgoing port per condition.  First condition to evaluate true wins.
    Choice {
        state: StateTag,
        exits: Vec<ExitCondition>,
    },

    /// A behavioral state that is never observed: on arrival, one of its
    /// `exit_count` ports is chosen uniformly at random and traversal
    /// continues immediately.  Every port must be connected (validated at
    /// compile time).
    RandomChoice {
        state:      StateTag,
        exit_count: u8,
    },

    /// Redirects the executor to a different named graph.  Not a behavioral
    /// state; aborts whatever transition reached it.
    ChangePhase { phase: String },

    /// A side effect executed whenever a connection terminating here is
    /// traversed.  Never becomes current.
    Action(ActionSpec),

    /// An out-of-band trigger.  Not on the traversable path; scanned once
    /// at compile time and cached by kind.  Its exit (port 0) is walked
    /// when the interrupt fires.
    Interrupt(Interrupt),
}

impl NodeKind {
    /// The behavioral-state tag this node contributes, if any.
    #[inline]
    pub fn state_tag(&self) -> Option<StateTag> {
        match self {
            NodeKind::Step { state }
            | NodeKind::Choice { state, .. }
            | NodeKind::RandomChoice { state, .. } => Some(*state),
            _ => None,
        }
    }

    /// `true` for nodes the executor may hold as `current_node`.
    #[inline]
    pub fn is_behavioral(&self) -> bool {
        matches!(
            self,
            NodeKind::Step { .. } | NodeKind::Choice { .. } | NodeKind::RandomChoice { .. }
        )
    }

    /// The ordered exit-condition slots evaluated while this node is
    /// current.  Empty for nodes that are never current or never scanned
    /// (`RandomChoice` exits are unconditioned and resolved on arrival).
    pub fn exit_slots(&self) -> &[ExitCondition] {
        match self {
            NodeKind::Step { .. } => &STEP_EXITS,
            NodeKind::Choice { exits, .. } => exits,
            _ => &[],
        }
    }

    /// Short label for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeKind::Entry            => "entry",
            NodeKind::Step { .. }      => "step",
            NodeKind::Choice { .. }    => "choice",
            NodeKind::RandomChoice { .. } => "random_choice",
            NodeKind::ChangePhase { .. } => "change_phase",
            NodeKind::Action(_)        => "action",
            NodeKind::Interrupt(_)     => "interrupt",
        }
    }
}
