//! Partial solutions: the move history so far, the targets still unvisited,
//! and the step count.

use std::collections::BTreeSet;
use std::fmt;

use crate::board::{Coord, knight_moves_from};

/// A partial solution. `history[0]` is the starting square, the last
/// element is the knight's current square, and `steps` is always
/// `history.len() - 1` for states reachable during search. The one
/// exception is [`SearchState::unsolved`], the infeasibility sentinel that
/// seeds every incumbent and is never expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    history: Vec<Coord>,
    remaining: BTreeSet<Coord>,
    steps: u32,
}

impl SearchState {
    /// A fresh root state at `start` with all of `targets` unvisited.
    pub fn new(start: Coord, targets: BTreeSet<Coord>) -> Self {
        debug_assert!(!targets.contains(&start));
        Self {
            history: vec![start],
            remaining: targets,
            steps: 0,
        }
    }

    /// The "no progress" witness: full target set, `steps` pinned to the
    /// move budget. It loses to any real completion under the strict `<`
    /// installation predicate and is what gets reported when the budget
    /// admits no solution.
    pub fn unsolved(start: Coord, targets: BTreeSet<Coord>, upper_bound: u32) -> Self {
        Self {
            history: vec![start],
            remaining: targets,
            steps: upper_bound,
        }
    }

    pub(crate) fn from_parts(history: Vec<Coord>, remaining: BTreeSet<Coord>, steps: u32) -> Self {
        Self {
            history,
            remaining,
            steps,
        }
    }

    /// The knight's current square.
    pub fn position(&self) -> Coord {
        // history is non-empty by construction
        *self.history.last().expect("history is never empty")
    }

    pub fn history(&self) -> &[Coord] {
        &self.history
    }

    pub fn remaining(&self) -> &BTreeSet<Coord> {
        &self.remaining
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Apply one knight move in place: append to the history, cross the
    /// square off the target set if it was one, bump the step count. The
    /// caller guarantees `coord` is a legal knight move from the current
    /// position.
    pub fn apply(&mut self, coord: Coord) {
        self.remaining.remove(&coord);
        self.history.push(coord);
        self.steps += 1;
    }

    /// On-board knight moves from the current position, target-hitting
    /// moves first. The partition is stable, so within each group the
    /// canonical offset order is preserved and the result is fully
    /// deterministic. Exploring target hits first tightens the bound
    /// sooner, which deepens pruning everywhere else.
    pub fn available_moves(&self, board_size: u8) -> Vec<Coord> {
        let mut moves = knight_moves_from(self.position(), board_size);
        moves.sort_by_key(|mv| !self.remaining.contains(mv));
        moves
    }

    /// `steps + |remaining|`: every unvisited target costs at least one
    /// more move, so no completion of this state can be shorter.
    pub fn lower_bound(&self) -> u32 {
        self.steps + self.remaining.len() as u32
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "steps={} moves=", self.steps)?;
        for coord in &self.history {
            write!(f, "{}", coord)?;
        }
        if !self.remaining.is_empty() {
            write!(f, " unvisited={}", self.remaining.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(coords: &[(u8, u8)]) -> BTreeSet<Coord> {
        coords.iter().map(|&(r, c)| Coord::new(r, c)).collect()
    }

    #[test]
    fn test_new_state() {
        let state = SearchState::new(Coord::new(0, 0), targets(&[(2, 1)]));
        assert_eq!(state.steps(), 0);
        assert_eq!(state.history(), &[Coord::new(0, 0)]);
        assert_eq!(state.lower_bound(), 1);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_apply_visits_target() {
        let mut state = SearchState::new(Coord::new(0, 0), targets(&[(2, 1)]));
        state.apply(Coord::new(2, 1));
        assert_eq!(state.steps(), 1);
        assert_eq!(state.position(), Coord::new(2, 1));
        assert!(state.is_complete());
        assert_eq!(state.lower_bound(), 1);
    }

    #[test]
    fn test_apply_non_target_leaves_remaining() {
        let mut state = SearchState::new(Coord::new(0, 0), targets(&[(2, 1)]));
        state.apply(Coord::new(1, 2));
        assert_eq!(state.steps(), 1);
        assert_eq!(state.remaining().len(), 1);
        assert_eq!(state.lower_bound(), 2);
    }

    #[test]
    fn test_steps_tracks_history_length() {
        let mut state = SearchState::new(Coord::new(0, 0), targets(&[(2, 1), (1, 2)]));
        state.apply(Coord::new(1, 2));
        state.apply(Coord::new(0, 0));
        state.apply(Coord::new(2, 1));
        assert_eq!(state.steps() as usize, state.history().len() - 1);
        assert!(state.is_complete());
    }

    #[test]
    fn test_available_moves_targets_first() {
        // From (0,0) the canonical-order moves are (2,1) then (1,2).
        // Making (1,2) a target must move it to the front.
        let state = SearchState::new(Coord::new(0, 0), targets(&[(1, 2)]));
        assert_eq!(
            state.available_moves(5),
            vec![Coord::new(1, 2), Coord::new(2, 1)]
        );
    }

    #[test]
    fn test_available_moves_stable_within_groups() {
        let state = SearchState::new(Coord::new(2, 2), targets(&[(3, 0), (0, 1)]));
        let moves = state.available_moves(5);
        // Both targets first, in canonical offset order: (3,0) comes from
        // offset (1,-2) which precedes (-2,-1) -> (0,1).
        assert_eq!(moves[0], Coord::new(3, 0));
        assert_eq!(moves[1], Coord::new(0, 1));
        assert_eq!(moves.len(), 8);
        for mv in &moves[2..] {
            assert!(!state.remaining().contains(mv));
        }
    }

    #[test]
    fn test_unsolved_sentinel() {
        let sentinel = SearchState::unsolved(Coord::new(0, 0), targets(&[(7, 7)]), 4);
        assert_eq!(sentinel.steps(), 4);
        assert!(!sentinel.is_complete());
        assert_eq!(sentinel.history().len(), 1);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut parent = SearchState::new(Coord::new(0, 0), targets(&[(2, 1)]));
        let child = parent.clone();
        parent.apply(Coord::new(2, 1));
        assert_eq!(child.steps(), 0);
        assert_eq!(child.remaining().len(), 1);
    }
}
