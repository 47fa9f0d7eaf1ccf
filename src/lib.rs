//! # `ktour`
//!
//! A parallel branch-and-bound solver for an optimization variant of the
//! knight's tour: given an N×N board, a starting knight square, a set of
//! target squares, and an upper bound on the number of moves, find the
//! shortest knight-move sequence that visits every target (revisiting
//! squares is allowed).
//!
//! Parse a puzzle with [`parser::parse_file`] or [`parser::parse_str`],
//! then hand it to [`search::solve`] with an [`search::EngineConfig`].
//!
//! # Internals
//!
//! The engine is a master-worker task pool. The coordinator expands the
//! root state breadth-first into a frontier of coarse-grained tasks and
//! dispatches them to idle workers over tagged message frames. Each
//! worker runs depth-first branch-and-bound on its task, pruning against
//! the best complete solution it knows of; improved solutions are
//! broadcast directly to peer workers, which adopt them only when
//! strictly better, so the global bound tightens monotonically without
//! any endpoint ever blocking another. When the pool is empty and every
//! worker is idle the coordinator broadcasts termination, collects one
//! witness per worker, and reports the best.

pub mod board;
pub mod parser;
pub mod search;

pub use board::Coord;
pub use parser::{ParseError, Puzzle};
pub use search::{EngineConfig, EngineError, SolveReport, solve};
