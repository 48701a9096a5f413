//! `PhaseTable` — the named-graph registry an executor runs against.
//!
//! A phase is a named, independently addressable graph.  The first entry is
//! the default phase an executor starts in; `ChangePhase` nodes switch the
//! active phase wholesale by name.
//!
//! The table also owns the interned behavioral-state names: `StateTag`s are
//! indices into `state_names`, shared across every phase so a tag means the
//! same thing before and after a phase switch.

use bgx_core::{PhaseId, StateTag};
use rustc_hash::FxHashMap;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Named graphs plus the interned state-tag table.
///
/// Immutable after construction; share across executors with `Arc`.
#[derive(Debug)]
pub struct PhaseTable {
    phases:      Vec<(String, Graph)>,
    by_name:     FxHashMap<String, PhaseId>,
    state_names: Vec<String>,
}

impl PhaseTable {
    /// Build a table from `(name, graph)` pairs (first = default phase) and
    /// the interned state-name table the graphs' tags index into.
    ///
    /// Fails on duplicate phase names.  An empty table is representable —
    /// the executor rejects it at construction instead, so a host can still
    /// stage tables incrementally.
    pub fn new(phases: Vec<(String, Graph)>, state_names: Vec<String>) -> GraphResult<Self> {
        let mut by_name = FxHashMap::default();
        for (i, (name, _)) in phases.iter().enumerate() {
            if by_name.insert(name.clone(), PhaseId(i as u16)).is_some() {
                return Err(GraphError::DuplicatePhase(name.clone()));
            }
        }
        Ok(Self { phases, by_name, state_names })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// The default (starting) phase, if the table is non-empty.
    #[inline]
    pub fn default_phase(&self) -> Option<PhaseId> {
        (!self.phases.is_empty()).then_some(PhaseId(0))
    }

    /// The graph for a phase id previously handed out by this table.
    #[inline]
    pub fn graph(&self, id: PhaseId) -> &Graph {
        &self.phases[id.index()].1
    }

    #[inline]
    pub fn name(&self, id: PhaseId) -> &str {
        &self.phases[id.index()].0
    }

    /// Resolve a phase name.  `None` is the unresolved-`ChangePhase` case —
    /// a fatal configuration error the executor turns into deactivation.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<PhaseId> {
        self.by_name.get(name).copied()
    }

    // ── State-tag interning ───────────────────────────────────────────────

    /// Human-readable name of a state tag, for logging and host mapping.
    #[inline]
    pub fn state_name(&self, tag: StateTag) -> Option<&str> {
        self.state_names.get(tag.index()).map(String::as_str)
    }

    /// Reverse lookup of an interned state name.
    pub fn state_tag(&self, name: &str) -> Option<StateTag> {
        self.state_names
            .iter()
            .position(|n| n == name)
            .map(|i| StateTag(i as u16))
    }

    /// All interned state names, indexed by `StateTag`.
    #[inline]
    pub fn state_names(&self) -> &[String] {
        &self.state_names
    }
}
