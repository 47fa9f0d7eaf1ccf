//! Solve reports and run statistics.

use std::time::Duration;

use crate::parser::Puzzle;
use crate::search::state::SearchState;

/// Result of one engine run: the winning witness plus run statistics.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// The best witness across all workers. When no completion exists
    /// within the move budget this is the unsolved sentinel, recognizable
    /// by `!witness.is_complete()` and `steps == upper_bound`.
    pub witness: SearchState,
    /// Statistics from the run.
    pub statistics: EngineStatistics,
}

impl SolveReport {
    /// Step count of the reported solution.
    pub fn steps(&self) -> u32 {
        self.witness.steps()
    }

    /// Whether a solution within the move budget was found at all.
    pub fn solved(&self) -> bool {
        self.witness.is_complete()
    }

    /// The single-line output format: input name, step count, elapsed
    /// seconds, and the move sequence with original targets starred.
    pub fn render(&self, puzzle: &Puzzle, input_name: &str) -> String {
        let mut line = format!(
            "File={}, steps={}, elapsedTime={:.3}, moves=",
            input_name,
            self.steps(),
            self.statistics.elapsed.as_secs_f64()
        );
        for &coord in self.witness.history() {
            line.push_str(&coord.to_string());
            if puzzle.is_original_target(coord) {
                line.push('*');
            }
        }
        line
    }
}

/// Statistics from an engine run.
#[derive(Debug, Clone, Default)]
pub struct EngineStatistics {
    /// Wall-clock time for the whole run.
    pub elapsed: Duration,
    /// Number of workers the run used.
    pub workers: usize,
    /// Tasks produced by the frontier generator.
    pub frontier_tasks: usize,
    /// Tasks actually dispatched (equals `frontier_tasks`; dispatch is
    /// exhaustive).
    pub tasks_dispatched: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::parser::parse_str;

    #[test]
    fn test_render_marks_targets() {
        let puzzle = parse_str("3 10\n3..\n...\n.1.\n").unwrap();
        let mut witness = SearchState::new(puzzle.knight, puzzle.targets.clone());
        witness.apply(Coord::new(2, 1));
        let report = SolveReport {
            witness,
            statistics: EngineStatistics {
                elapsed: Duration::from_millis(1500),
                workers: 1,
                frontier_tasks: 1,
                tasks_dispatched: 1,
            },
        };
        assert_eq!(
            report.render(&puzzle, "board.txt"),
            "File=board.txt, steps=1, elapsedTime=1.500, moves=(0,0)(2,1)*"
        );
        assert!(report.solved());
    }

    #[test]
    fn test_render_unsolved_sentinel() {
        let puzzle = parse_str("8 4\n3.......\n........\n........\n........\n........\n........\n........\n.......1\n").unwrap();
        let witness =
            SearchState::unsolved(puzzle.knight, puzzle.targets.clone(), puzzle.upper_bound);
        let report = SolveReport {
            witness,
            statistics: EngineStatistics::default(),
        };
        let line = report.render(&puzzle, "hard.txt");
        assert!(line.contains("steps=4"));
        assert!(!line.contains("(7,7)"));
        assert!(!report.solved());
    }
}
