//! End-to-end scenarios through the public engine API.

use ktour::board::{Coord, is_knight_step};
use ktour::parser::parse_str;
use ktour::search::{EngineConfig, SolveReport, solve};

fn engine() -> EngineConfig {
    EngineConfig::default()
        .with_workers(3)
        .with_threads(2)
        .with_min_pool(12)
}

fn assert_witness_is_legal(report: &SolveReport) {
    let witness = &report.witness;
    assert_eq!(witness.steps() as usize, witness.history().len() - 1);
    for pair in witness.history().windows(2) {
        assert!(
            is_knight_step(pair[0], pair[1]),
            "illegal step {} -> {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn single_target_one_move_away() {
    let puzzle = parse_str("3 10\n3..\n...\n.1.\n").unwrap();
    let report = solve(&puzzle, &engine()).unwrap();

    assert_eq!(report.steps(), 1);
    assert!(report.solved());
    assert_witness_is_legal(&report);
    let line = report.render(&puzzle, "t1");
    assert!(line.ends_with("moves=(0,0)(2,1)*"), "got: {}", line);
}

#[test]
fn no_targets_means_zero_moves() {
    let puzzle = parse_str("3 10\n3..\n...\n...\n").unwrap();
    let report = solve(&puzzle, &engine()).unwrap();

    assert_eq!(report.steps(), 0);
    assert!(report.solved());
    let line = report.render(&puzzle, "t2");
    assert!(line.ends_with("moves=(0,0)"), "got: {}", line);
}

#[test]
fn two_targets_in_a_chain() {
    let puzzle = parse_str("5 20\n3....\n..1..\n....1\n.....\n.....\n").unwrap();
    let report = solve(&puzzle, &engine()).unwrap();

    assert_eq!(report.steps(), 2);
    assert_witness_is_legal(&report);
    let history = report.witness.history();
    assert_eq!(history[0], Coord::new(0, 0));
    assert_eq!(history[1], Coord::new(1, 2));
    assert_eq!(history[2], Coord::new(2, 4));
    let line = report.render(&puzzle, "t3");
    assert!(line.ends_with("moves=(0,0)(1,2)*(2,4)*"), "got: {}", line);
}

#[test]
fn infeasible_budget_reports_the_bound() {
    let puzzle = parse_str(
        "8 4\n3.......\n........\n........\n........\n........\n........\n........\n.......1\n",
    )
    .unwrap();
    let report = solve(&puzzle, &engine()).unwrap();

    assert_eq!(report.steps(), 4);
    assert!(!report.solved());
    let line = report.render(&puzzle, "t4");
    assert!(!line.contains("(7,7)"), "got: {}", line);
}

#[test]
fn ring_of_eight_targets_takes_fifteen_moves() {
    let puzzle = parse_str("5 30\n.1.1.\n1...1\n..3..\n1...1\n.1.1.\n").unwrap();
    assert_eq!(puzzle.targets.len(), 8);
    let report = solve(&puzzle, &engine()).unwrap();

    assert_eq!(report.steps(), 15);
    assert!(report.solved());
    assert_witness_is_legal(&report);
    for target in &puzzle.targets {
        assert!(
            report.witness.history().contains(target),
            "witness never visits {}",
            target
        );
    }
}

#[test]
fn step_count_is_deterministic_across_runs() {
    let input = "5 25\n.1.1.\n1....\n..3..\n....1\n.....\n";
    let puzzle = parse_str(input).unwrap();

    let first = solve(&puzzle, &engine()).unwrap();
    let second = solve(&puzzle, &engine()).unwrap();
    assert_eq!(first.steps(), second.steps());

    // Worker/thread counts must not change the optimum either.
    let lone = solve(&puzzle, &EngineConfig::default().with_workers(1).with_threads(1)).unwrap();
    assert_eq!(lone.steps(), first.steps());
}

#[test]
fn legacy_payload_budget_still_works_on_small_boards() {
    // The 300-byte budget of the original transport remains expressible.
    let puzzle = parse_str("5 20\n3....\n..1..\n....1\n.....\n.....\n").unwrap();
    let config = engine().with_max_payload(300);
    let report = solve(&puzzle, &config).unwrap();
    assert_eq!(report.steps(), 2);
}
