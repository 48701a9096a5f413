//! JSON graph loader.
//!
//! # Document format
//!
//! One document holds every phase of one actor archetype.  Nodes are keyed
//! by stable string identifiers chosen by the authoring tool; connections
//! reference those ids.  The loader resolves ids to dense indices, interns
//! state names across all phases, and compiles each phase through
//! [`Graph::new`] so every validation rule runs before anything reaches an
//! executor.
//!
//! ```json
//! {
//!   "phases": [
//!     {
//!       "name": "calm",
//!       "nodes": [
//!         { "id": "start",  "kind": "entry" },
//!         { "id": "patrol", "kind": "choice", "state": "patrol",
//!           "exits": [
//!             { "kind": "sense_player" },
//!             { "kind": "timer_plus_random", "secs": 3.0, "percent": 25.0 }
//!           ] },
//!         { "id": "growl",  "kind": "action", "key": "play_sound", "args": [2.0] },
//!         { "id": "chase",  "kind": "step", "state": "chase" },
//!         { "id": "enrage", "kind": "interrupt", "interrupt":
//!             { "kind": "health", "trigger": 20.0 } }
//!       ],
//!       "connections": [
//!         { "from": "start",  "to": "patrol" },
//!         { "from": "patrol", "port": 0, "to": "growl" },
//!         { "from": "patrol", "port": 0, "to": "chase" },
//!         { "from": "enrage", "to": "chase" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! **`state`** strings are interned into the table's shared tag registry:
//! the same name in two phases yields the same `StateTag`.
//!
//! **Damage interrupts** declare `"states": []` (or omit it) to match every
//! state, or a list of state names to match only those.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bgx_core::{NodeId, StateTag};
use rustc_hash::FxHashMap;

use crate::error::{GraphError, GraphResult};
use crate::exit::ExitCondition;
use crate::graph::{Connection, Graph};
use crate::interrupt::{DamageFilter, Interrupt, StateMatcher};
use crate::node::{ActionSpec, NodeKind};
use crate::phase::PhaseTable;

// ── Document records ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PhaseSetDoc {
    phases: Vec<PhaseDoc>,
}

#[derive(Deserialize)]
struct PhaseDoc {
    name:  String,
    nodes: Vec<NodeDoc>,
    #[serde(default)]
    connections: Vec<ConnectionDoc>,
}

#[derive(Deserialize)]
struct NodeDoc {
    id: String,
    #[serde(flatten)]
    kind: NodeKindDoc,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum NodeKindDoc {
    Entry,
    Step {
        state: String,
    },
    Choice {
        state: String,
        #[serde(default)]
        exits: Vec<ExitDoc>,
    },
    RandomChoice {
        state:      String,
        exit_count: u8,
    },
    ChangePhase {
        phase: String,
    },
    Action {
        key: String,
        #[serde(default)]
        args: Vec<f32>,
    },
    Interrupt {
        interrupt: InterruptDoc,
    },
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ExitDoc {
    Timer { secs: f32 },
    TimerPlusRandom { secs: f32, percent: f32 },
    MoveComplete,
    NumberOfHits { count: u32 },
    CounterReaches { count: i32 },
    HealthPercentage { percent: f32 },
    SensePlayer,
    LostPlayerTarget,
    TargetWithinRange { range: f32 },
    Always,
    Disabled,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum InterruptDoc {
    Timer {
        period_secs: f32,
        #[serde(default)]
        looped: bool,
        #[serde(default = "full_percent")]
        percent: f32,
    },
    Counter {
        trigger: i32,
        #[serde(default)]
        or_above: bool,
    },
    Health {
        trigger: f32,
    },
    Message {
        key: String,
    },
    Damage {
        #[serde(default)]
        states: Vec<String>,
        #[serde(default)]
        filters: Vec<FilterDoc>,
    },
}

/// Omitted timer-interrupt probability means "always fire".
fn full_percent() -> f32 {
    100.0
}

#[derive(Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum FilterDoc {
    Scale { factor: f32 },
    Offset { amount: f32 },
    ClampMax { max: f32 },
    ClampMin { min: f32 },
    Set { amount: f32 },
}

#[derive(Deserialize)]
struct ConnectionDoc {
    from: String,
    #[serde(default)]
    port: u8,
    to:   String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and compile a phase table from a JSON file.
pub fn load_phases_json(path: &Path) -> GraphResult<PhaseTable> {
    let file = std::fs::File::open(path).map_err(GraphError::Io)?;
    load_phases_reader(std::io::BufReader::new(file))
}

/// Like [`load_phases_json`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from packed
/// asset archives.
pub fn load_phases_reader<R: Read>(reader: R) -> GraphResult<PhaseTable> {
    let doc: PhaseSetDoc =
        serde_json::from_reader(reader).map_err(|e| GraphError::Parse(e.to_string()))?;

    let mut state_names: Vec<String> = Vec::new();
    let mut phases: Vec<(String, Graph)> = Vec::with_capacity(doc.phases.len());

    for phase in doc.phases {
        let graph = compile_phase(&phase, &mut state_names).inspect_err(|e| {
            tracing::error!(phase = %phase.name, error = %e, "phase failed to compile");
        })?;
        phases.push((phase.name, graph));
    }

    let table = PhaseTable::new(phases, state_names)?;
    tracing::debug!(
        phases = table.len(),
        states = table.state_names().len(),
        "phase table loaded"
    );
    Ok(table)
}

// ── Compilation ───────────────────────────────────────────────────────────────

fn compile_phase(phase: &PhaseDoc, state_names: &mut Vec<String>) -> GraphResult<Graph> {
    // String id → arena index, duplicate detection included.
    let mut by_id: FxHashMap<&str, NodeId> = FxHashMap::default();
    for (i, node) in phase.nodes.iter().enumerate() {
        if by_id.insert(&node.id, NodeId(i as u32)).is_some() {
            return Err(GraphError::DuplicateNode(node.id.clone()));
        }
    }

    let nodes: Vec<NodeKind> = phase
        .nodes
        .iter()
        .map(|n| compile_node(&n.kind, state_names))
        .collect();

    let connections: Vec<Connection> = phase
        .connections
        .iter()
        .map(|c| {
            let resolve = |id: &str| {
                by_id
                    .get(id)
                    .copied()
                    .ok_or_else(|| GraphError::UnknownNode(id.to_owned()))
            };
            Ok(Connection::new(resolve(&c.from)?, c.port, resolve(&c.to)?))
        })
        .collect::<GraphResult<_>>()?;

    Graph::new(nodes, connections)
}

fn compile_node(doc: &NodeKindDoc, state_names: &mut Vec<String>) -> NodeKind {
    match doc {
        NodeKindDoc::Entry => NodeKind::Entry,
        NodeKindDoc::Step { state } => NodeKind::Step {
            state: intern(state_names, state),
        },
        NodeKindDoc::Choice { state, exits } => NodeKind::Choice {
            state: intern(state_names, state),
            exits: exits.iter().map(compile_exit).collect(),
        },
        NodeKindDoc::RandomChoice { state, exit_count } => NodeKind::RandomChoice {
            state:      intern(state_names, state),
            exit_count: *exit_count,
        },
        NodeKindDoc::ChangePhase { phase } => NodeKind::ChangePhase {
            phase: phase.clone(),
        },
        NodeKindDoc::Action { key, args } => {
            NodeKind::Action(ActionSpec::with_args(key.clone(), args.clone()))
        }
        NodeKindDoc::Interrupt { interrupt } => {
            NodeKind::Interrupt(compile_interrupt(interrupt, state_names))
        }
    }
}

fn compile_exit(doc: &ExitDoc) -> ExitCondition {
    match *doc {
        ExitDoc::Timer { secs }                     => ExitCondition::Timer { secs },
        ExitDoc::TimerPlusRandom { secs, percent }  => ExitCondition::TimerPlusRandom { secs, percent },
        ExitDoc::MoveComplete                       => ExitCondition::MoveComplete,
        ExitDoc::NumberOfHits { count }             => ExitCondition::NumberOfHits { count },
        ExitDoc::CounterReaches { count }           => ExitCondition::CounterReaches { count },
        ExitDoc::HealthPercentage { percent }       => ExitCondition::HealthPercentage { percent },
        ExitDoc::SensePlayer                        => ExitCondition::SensePlayer,
        ExitDoc::LostPlayerTarget                   => ExitCondition::LostPlayerTarget,
        ExitDoc::TargetWithinRange { range }        => ExitCondition::TargetWithinRange { range },
        ExitDoc::Always                             => ExitCondition::Always,
        ExitDoc::Disabled                           => ExitCondition::Disabled,
    }
}

fn compile_interrupt(doc: &InterruptDoc, state_names: &mut Vec<String>) -> Interrupt {
    match doc {
        InterruptDoc::Timer { period_secs, looped, percent } => Interrupt::Timer {
            period_secs: *period_secs,
            looped:      *looped,
            percent:     *percent,
        },
        InterruptDoc::Counter { trigger, or_above } => Interrupt::Counter {
            trigger:  *trigger,
            or_above: *or_above,
        },
        InterruptDoc::Health { trigger } => Interrupt::Health { trigger: *trigger },
        InterruptDoc::Message { key } => Interrupt::Message { key: key.clone() },
        InterruptDoc::Damage { states, filters } => Interrupt::Damage {
            states: if states.is_empty() {
                StateMatcher::Any
            } else {
                StateMatcher::OneOf(states.iter().map(|s| intern(state_names, s)).collect())
            },
            filters: filters.iter().map(compile_filter).collect(),
        },
    }
}

fn compile_filter(doc: &FilterDoc) -> DamageFilter {
    match *doc {
        FilterDoc::Scale { factor }  => DamageFilter::Scale(factor),
        FilterDoc::Offset { amount } => DamageFilter::Offset(amount),
        FilterDoc::ClampMax { max }  => DamageFilter::ClampMax(max),
        FilterDoc::ClampMin { min }  => DamageFilter::ClampMin(min),
        FilterDoc::Set { amount }    => DamageFilter::Set(amount),
    }
}

/// Intern a state name, returning its stable tag.
fn intern(state_names: &mut Vec<String>, name: &str) -> StateTag {
    if let Some(i) = state_names.iter().position(|n| n == name) {
        return StateTag(i as u16);
    }
    state_names.push(name.to_owned());
    StateTag((state_names.len() - 1) as u16)
}
