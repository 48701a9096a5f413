//! Graph loading and validation errors.
//!
//! Everything here is a *configuration* failure: authoring bugs detected
//! once, at load time.  A host that receives `Err` from the loader or from
//! `Graph::new` must not spawn executors from the offending data — the
//! system fails loud rather than guessing a fallback state.

use bgx_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph has no entry node")]
    NoEntry,

    #[error("graph has multiple entry nodes ({0} and {1})")]
    MultipleEntries(NodeId, NodeId),

    #[error("entry node {0} has no outgoing connection")]
    EntryUnconnected(NodeId),

    #[error("random-choice node {0} declares no exits")]
    RandomChoiceNoExits(NodeId),

    #[error("random-choice node {node} has no connection on exit {port}")]
    RandomExitUnconnected { node: NodeId, port: u8 },

    #[error("connection {connection} references node {node} outside the arena (size {node_count})")]
    ConnectionOutOfRange {
        connection: usize,
        node:       NodeId,
        node_count: usize,
    },

    #[error("duplicate node id \"{0}\"")]
    DuplicateNode(String),

    #[error("connection references unknown node id \"{0}\"")]
    UnknownNode(String),

    #[error("duplicate phase name \"{0}\"")]
    DuplicatePhase(String),

    #[error("graph parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
