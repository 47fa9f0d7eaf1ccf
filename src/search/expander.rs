//! Depth-first branch-and-bound expansion of a single task.

use std::sync::Mutex;
use std::thread;

use crate::search::bound::Incumbent;
use crate::search::state::SearchState;

/// Expand `task` to exhaustion against the shared incumbent.
///
/// On return, every completion reachable from `task` that beats the
/// entering bound has been considered: the incumbent holds the least such
/// length and a witness for it. Pruning discards a subtree only when its
/// lower bound already meets the current bound, so no improving completion
/// is ever missed.
///
/// Only the top level is parallel: the task's immediate subtrees form a
/// work queue drained by `threads` scoped threads, and each thread runs
/// its subtrees sequentially. A complete task is installed directly and
/// not expanded.
pub fn expand(task: &SearchState, board_size: u8, incumbent: &Incumbent, threads: usize) {
    if task.is_complete() {
        incumbent.try_install(task);
        return;
    }

    let mut subtrees = Vec::new();
    for mv in task.available_moves(board_size) {
        let mut child = task.clone();
        child.apply(mv);
        if child.lower_bound() >= incumbent.bound() {
            continue;
        }
        if child.is_complete() {
            incumbent.try_install(&child);
            continue;
        }
        subtrees.push(child);
    }

    if threads <= 1 || subtrees.len() <= 1 {
        for child in &subtrees {
            descend(child, board_size, incumbent);
        }
        return;
    }

    // Hand out subtrees from the front, preserving the target-first order.
    let queue = Mutex::new(std::collections::VecDeque::from(subtrees));
    thread::scope(|scope| {
        for _ in 0..threads {
            scope.spawn(|| {
                loop {
                    let next = queue
                        .lock()
                        .expect("expander queue lock poisoned")
                        .pop_front();
                    match next {
                        Some(child) => descend(&child, board_size, incumbent),
                        None => break,
                    }
                }
            });
        }
    });
}

fn descend(state: &SearchState, board_size: u8, incumbent: &Incumbent) {
    for mv in state.available_moves(board_size) {
        let mut child = state.clone();
        child.apply(mv);
        if child.lower_bound() >= incumbent.bound() {
            continue;
        }
        if child.is_complete() {
            incumbent.try_install(&child);
            continue;
        }
        descend(&child, board_size, incumbent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, is_knight_step};
    use std::collections::BTreeSet;

    fn targets(coords: &[(u8, u8)]) -> BTreeSet<Coord> {
        coords.iter().map(|&(r, c)| Coord::new(r, c)).collect()
    }

    fn run(
        start: (u8, u8),
        target_coords: &[(u8, u8)],
        board_size: u8,
        upper_bound: u32,
        threads: usize,
    ) -> SearchState {
        let start = Coord::new(start.0, start.1);
        let incumbent = Incumbent::new(SearchState::unsolved(
            start,
            targets(target_coords),
            upper_bound,
        ));
        let root = SearchState::new(start, targets(target_coords));
        expand(&root, board_size, &incumbent, threads);
        incumbent.witness()
    }

    #[test]
    fn test_single_target_one_move() {
        let witness = run((0, 0), &[(2, 1)], 3, 10, 1);
        assert_eq!(witness.steps(), 1);
        assert_eq!(
            witness.history(),
            &[Coord::new(0, 0), Coord::new(2, 1)]
        );
    }

    #[test]
    fn test_complete_task_reports_itself() {
        let incumbent = Incumbent::new(SearchState::unsolved(Coord::new(0, 0), targets(&[]), 10));
        let root = SearchState::new(Coord::new(0, 0), targets(&[]));
        expand(&root, 3, &incumbent, 1);
        assert_eq!(incumbent.bound(), 0);
        assert_eq!(incumbent.witness().history().len(), 1);
    }

    #[test]
    fn test_two_targets_on_a_line() {
        let witness = run((0, 0), &[(1, 2), (2, 4)], 5, 20, 1);
        assert_eq!(witness.steps(), 2);
        assert_eq!(witness.history()[1], Coord::new(1, 2));
        assert_eq!(witness.history()[2], Coord::new(2, 4));
    }

    #[test]
    fn test_unreachable_within_bound_keeps_sentinel() {
        let witness = run((0, 0), &[(7, 7)], 8, 4, 1);
        assert_eq!(witness.steps(), 4);
        assert!(!witness.is_complete());
    }

    #[test]
    fn test_witness_history_is_legal() {
        let witness = run((2, 2), &[(0, 1), (4, 3), (1, 4)], 5, 30, 1);
        assert!(witness.is_complete());
        assert_eq!(witness.steps() as usize, witness.history().len() - 1);
        for pair in witness.history().windows(2) {
            assert!(is_knight_step(pair[0], pair[1]));
        }
    }

    #[test]
    fn test_parallel_matches_sequential_bound() {
        let sequential = run((2, 2), &[(0, 1), (4, 3), (1, 4), (3, 0)], 5, 30, 1);
        let parallel = run((2, 2), &[(0, 1), (4, 3), (1, 4), (3, 0)], 5, 30, 4);
        assert_eq!(sequential.steps(), parallel.steps());
        assert!(parallel.is_complete());
    }

    #[test]
    fn test_tighter_entering_bound_prunes_nothing_improving() {
        // Solving once gives the optimum; solving again with the optimum
        // as the entering bound must find nothing better and keep the
        // sentinel.
        let optimum = run((0, 0), &[(1, 2), (2, 4)], 5, 20, 1).steps();
        let witness = run((0, 0), &[(1, 2), (2, 4)], 5, optimum, 1);
        assert_eq!(witness.steps(), optimum);
        assert!(!witness.is_complete());
    }
}
