//! Parallel solve: a coordinator dispatching frontier tasks to worker
//! endpoints over tagged message frames.
//!
//! The system consists of:
//! - A **coordinator** (rank 0) that owns the task pool, dispatches to
//!   idle workers, orchestrates termination, and aggregates witnesses
//! - Multiple **workers** (ranks 1..=W) that expand tasks against a local
//!   incumbent and broadcast improved bounds directly to their peers
//! - A **channel fabric** of tagged frames with per-pair FIFO delivery
//!
//! The coordinator never searches, and bound updates never pass through
//! it: its view of the bound is stale until the final witness collection,
//! which is harmless because it never prunes.

pub mod channel;
pub mod config;
pub mod coordinator;
pub mod worker;

use std::fmt;

use crate::search::codec::CodecError;

pub use config::EngineConfig;
pub use coordinator::solve;

/// Fatal engine failure. There is no retry and no partial result: for a
/// problem this size, re-running is cheaper than recovery.
#[derive(Debug)]
pub enum EngineError {
    /// A transport endpoint disconnected mid-protocol.
    Disconnected,
    /// A payload failed to encode or decode.
    Codec(CodecError),
    /// A worker thread panicked.
    WorkerPanicked(usize),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Disconnected => write!(f, "transport endpoint disconnected"),
            EngineError::Codec(err) => write!(f, "payload codec failure: {}", err),
            EngineError::WorkerPanicked(rank) => write!(f, "worker {} panicked", rank),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodecError> for EngineError {
    fn from(err: CodecError) -> Self {
        EngineError::Codec(err)
    }
}
