//! Branch-and-bound search for shortest knight tours.
//!
//! The pieces, leaves first:
//! - [`state`]: partial solutions with heuristic move expansion
//! - [`codec`]: the compact wire encoding of states
//! - [`bound`]: the shared incumbent (pruning bound plus witness)
//! - [`expander`]: depth-first branch-and-bound over one task
//! - [`frontier`]: breadth-first task-pool generation on the master
//! - [`parallel`]: the coordinator/worker engine tying them together

pub mod bound;
pub mod codec;
pub mod expander;
pub mod frontier;
pub mod parallel;
pub mod result;
pub mod state;

pub use parallel::{EngineConfig, EngineError, solve};
pub use result::{EngineStatistics, SolveReport};
pub use state::SearchState;
