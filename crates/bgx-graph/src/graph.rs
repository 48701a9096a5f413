//! The compiled graph arena: nodes, connections, and the interrupt cache.
//!
//! # Data layout
//!
//! A `Graph` is two flat arrays — nodes indexed by `NodeId`, connections
//! indexed by `ConnectionId` — plus two precomputed indexes:
//!
//! - `out`: `(NodeId, port)` → ordered `Vec<ConnectionId>`, so walking an
//!   exit is a single hash lookup followed by a contiguous scan;
//! - [`InterruptCache`]: interrupt node ids grouped by kind, so each
//!   interrupt entry point scans only its own kind.
//!
//! Both are built once by [`Graph::new`], which also runs every load-time
//! validation rule.  A compiled `Graph` is immutable and can be shared
//! across any number of executors.

use bgx_core::{ConnectionId, NodeId};
use rustc_hash::FxHashMap;

use crate::error::{GraphError, GraphResult};
use crate::interrupt::Interrupt;
use crate::node::NodeKind;

// ── Connection ────────────────────────────────────────────────────────────────

/// A directed edge: source node + exit port → target node.
///
/// Several connections may share one `(from, port)` pair — action nodes ride
/// in parallel with the behavioral target on the same exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub from: NodeId,
    pub port: u8,
    pub to:   NodeId,
}

impl Connection {
    pub fn new(from: NodeId, port: u8, to: NodeId) -> Self {
        Self { from, port, to }
    }
}

// ── InterruptCache ────────────────────────────────────────────────────────────

/// Interrupt node ids grouped by kind, in declaration order.
///
/// Computed once per graph at compile time.  Switching phases swaps to the
/// new graph's cache wholesale; nothing is rescanned at runtime.
#[derive(Clone, Debug, Default)]
pub struct InterruptCache {
    pub timers:   Vec<NodeId>,
    pub counters: Vec<NodeId>,
    pub health:   Vec<NodeId>,
    pub messages: Vec<NodeId>,
    pub damage:   Vec<NodeId>,
}

impl InterruptCache {
    fn scan(nodes: &[NodeKind]) -> Self {
        let mut cache = InterruptCache::default();
        for (i, node) in nodes.iter().enumerate() {
            let id = NodeId(i as u32);
            match node {
                NodeKind::Interrupt(Interrupt::Timer { .. })   => cache.timers.push(id),
                NodeKind::Interrupt(Interrupt::Counter { .. }) => cache.counters.push(id),
                NodeKind::Interrupt(Interrupt::Health { .. })  => cache.health.push(id),
                NodeKind::Interrupt(Interrupt::Message { .. }) => cache.messages.push(id),
                NodeKind::Interrupt(Interrupt::Damage { .. })  => cache.damage.push(id),
                _ => {}
            }
        }
        cache
    }
}

// ── Graph ─────────────────────────────────────────────────────────────────────

/// One compiled, validated behavior graph.
#[derive(Debug)]
pub struct Graph {
    nodes:       Vec<NodeKind>,
    connections: Vec<Connection>,
    /// Ordered outgoing connections per (node, exit port).
    out:         FxHashMap<(NodeId, u8), Vec<ConnectionId>>,
    entry:       NodeId,
    interrupts:  InterruptCache,
}

impl Graph {
    /// Compile and validate a graph.
    ///
    /// Fails on: zero or multiple entry nodes, an entry with no outgoing
    /// connection, connections referencing nodes outside the arena, or a
    /// random-choice node with a missing exit connection.
    pub fn new(nodes: Vec<NodeKind>, connections: Vec<Connection>) -> GraphResult<Graph> {
        // Endpoint range check first — the other rules index freely after it.
        for (i, conn) in connections.iter().enumerate() {
            for endpoint in [conn.from, conn.to] {
                if endpoint.index() >= nodes.len() {
                    return Err(GraphError::ConnectionOutOfRange {
                        connection: i,
                        node:       endpoint,
                        node_count: nodes.len(),
                    });
                }
            }
        }

        // Exactly one entry node.
        let mut entry = None;
        for (i, node) in nodes.iter().enumerate() {
            if matches!(node, NodeKind::Entry) {
                let id = NodeId(i as u32);
                match entry {
                    None => entry = Some(id),
                    Some(first) => return Err(GraphError::MultipleEntries(first, id)),
                }
            }
        }
        let entry = entry.ok_or(GraphError::NoEntry)?;

        // Build the per-port outgoing index, preserving declaration order.
        let mut out: FxHashMap<(NodeId, u8), Vec<ConnectionId>> = FxHashMap::default();
        for (i, conn) in connections.iter().enumerate() {
            out.entry((conn.from, conn.port))
                .or_default()
                .push(ConnectionId(i as u32));
        }

        if !out.contains_key(&(entry, 0)) {
            return Err(GraphError::EntryUnconnected(entry));
        }

        // Every declared exit of a random-choice node must be connected —
        // the executor resolves these on arrival and has no fallback.
        for (i, node) in nodes.iter().enumerate() {
            if let NodeKind::RandomChoice { exit_count, .. } = node {
                let id = NodeId(i as u32);
                if *exit_count == 0 {
                    return Err(GraphError::RandomChoiceNoExits(id));
                }
                for port in 0..*exit_count {
                    if !out.contains_key(&(id, port)) {
                        return Err(GraphError::RandomExitUnconnected { node: id, port });
                    }
                }
            }
        }

        let interrupts = InterruptCache::scan(&nodes);

        Ok(Graph { nodes, connections, out, entry, interrupts })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node at `id`.  Ids handed out by this graph are always in range.
    #[inline]
    pub fn node(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.connections[id.index()]
    }

    /// The graph's single entry node.
    #[inline]
    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Ordered connections leaving `(node, port)`.  Empty slice if none.
    #[inline]
    pub fn connections_from(&self, node: NodeId, port: u8) -> &[ConnectionId] {
        self.out.get(&(node, port)).map_or(&[], Vec::as_slice)
    }

    /// Interrupt node ids grouped by kind.
    #[inline]
    pub fn interrupts(&self) -> &InterruptCache {
        &self.interrupts
    }

    /// The interrupt definition behind a cached id.
    ///
    /// Ids in the cache always point at interrupt nodes; anything else is a
    /// compiler bug in this crate.
    #[inline]
    pub fn interrupt(&self, id: NodeId) -> &Interrupt {
        match self.node(id) {
            NodeKind::Interrupt(interrupt) => interrupt,
            other => unreachable!("interrupt cache pointed at {} node", other.kind_name()),
        }
    }
}
