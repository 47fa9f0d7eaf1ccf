//! Breadth-first pre-expansion of the root into a pool of worker tasks.

use std::collections::VecDeque;

use crate::search::state::SearchState;

/// Expand `root` breadth-first until the pool holds at least `min_pool`
/// tasks, always splitting the smallest-depth task next. Together the
/// returned tasks cover every completion reachable from the root exactly
/// once: an expanded state is replaced by all of its children, a complete
/// state is retained as a trivially solvable task (it is its own only
/// completion), and an incomplete state with no legal moves has no
/// completions and is dropped. No pruning happens here.
///
/// The pool can come up short of `min_pool` when the frontier is exhausted
/// first; on boards where the knight cannot move at all it can be empty.
pub fn generate(root: SearchState, board_size: u8, min_pool: usize) -> Vec<SearchState> {
    let mut queue = VecDeque::from([root]);
    let mut complete = Vec::new();

    while complete.len() + queue.len() < min_pool {
        let Some(state) = queue.pop_front() else {
            break;
        };
        if state.is_complete() {
            complete.push(state);
            continue;
        }
        for mv in state.available_moves(board_size) {
            let mut child = state.clone();
            child.apply(mv);
            queue.push_back(child);
        }
    }

    complete.extend(queue);
    complete
}
