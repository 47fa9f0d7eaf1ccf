//! Coordinator: task dispatch, termination, and witness aggregation.

use std::collections::VecDeque;
use std::thread;
use std::time::Instant;

use log::{debug, info, warn};

use crate::parser::Puzzle;
use crate::search::codec;
use crate::search::frontier;
use crate::search::parallel::EngineError;
use crate::search::parallel::channel::{
    COORDINATOR_RANK, CoordinatorChannels, Frame, TERMINATE_PAYLOAD, Tag, create_channels,
};
use crate::search::parallel::config::EngineConfig;
use crate::search::parallel::worker::run_worker;
use crate::search::result::{EngineStatistics, SolveReport};
use crate::search::state::SearchState;

/// Solve `puzzle` with the full engine: seed the frontier, spawn the
/// workers, run the coordinator loop, and aggregate the witnesses.
pub fn solve(puzzle: &Puzzle, config: &EngineConfig) -> Result<SolveReport, EngineError> {
    let start_time = Instant::now();
    let workers = config.workers.max(1);
    let threads = config.threads.max(1);

    let root = SearchState::new(puzzle.knight, puzzle.targets.clone());
    let pool = frontier::generate(root, puzzle.board_size, config.min_pool);
    let frontier_tasks = pool.len();
    info!(
        "frontier holds {} tasks, dispatching to {} workers",
        frontier_tasks, workers
    );

    let (coordinator, worker_channels) = create_channels(workers);

    let witness = thread::scope(|scope| {
        let handles: Vec<_> = worker_channels
            .into_iter()
            .map(|channels| {
                scope.spawn(move || run_worker(puzzle, channels, threads, config.max_payload))
            })
            .collect();

        let mut outcome = run_coordinator(puzzle, pool, &coordinator, config.max_payload);
        if outcome.is_err() {
            // Failing before the termination broadcast would leave the
            // workers blocked on their inboxes; release them first.
            for tx in &coordinator.to_workers {
                let _ = tx.send(terminate_frame());
            }
        }

        for (i, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => outcome = outcome.and(Err(err)),
                Err(_) => outcome = outcome.and(Err(EngineError::WorkerPanicked(i + 1))),
            }
        }
        outcome
    })?;

    info!(
        "engine finished: {} steps in {:.3}s",
        witness.steps(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(SolveReport {
        witness,
        statistics: EngineStatistics {
            elapsed: start_time.elapsed(),
            workers,
            frontier_tasks,
            tasks_dispatched: frontier_tasks,
        },
    })
}

/// The dispatch loop and termination protocol. The coordinator never
/// searches and never blocks on a send. Bound updates flow only between
/// workers, so its view of the bound stays stale until the final witness
/// selection, where every worker's answer is in hand.
fn run_coordinator(
    puzzle: &Puzzle,
    pool: Vec<SearchState>,
    channels: &CoordinatorChannels,
    max_payload: usize,
) -> Result<SearchState, EngineError> {
    let workers = channels.to_workers.len();
    let mut pool: VecDeque<SearchState> = pool.into();
    let mut idle = vec![true; workers];

    // Pair tasks with idle workers until the pool drains; each removed
    // task goes to exactly one worker, which stays busy until its READY
    // comes back.
    while !pool.is_empty() {
        for (i, tx) in channels.to_workers.iter().enumerate() {
            if !idle[i] {
                continue;
            }
            let Some(task) = pool.pop_front() else {
                break;
            };
            let payload = codec::encode(&task, max_payload)?;
            tx.send(Frame {
                source: COORDINATOR_RANK,
                tag: Tag::Task,
                payload,
            })
            .map_err(|_| EngineError::Disconnected)?;
            idle[i] = false;
            debug!("dispatched a task to worker {}, {} left in pool", i + 1, pool.len());
        }

        if pool.is_empty() {
            break;
        }
        let frame = channels
            .inbox
            .recv()
            .map_err(|_| EngineError::Disconnected)?;
        acknowledge(&frame, &mut idle);
    }

    // Pool exhausted: wait out the stragglers.
    while idle.iter().any(|ready| !ready) {
        let frame = channels
            .inbox
            .recv()
            .map_err(|_| EngineError::Disconnected)?;
        acknowledge(&frame, &mut idle);
    }

    info!("pool exhausted and all workers idle, broadcasting termination");
    for (i, tx) in channels.to_workers.iter().enumerate() {
        tx.send(terminate_frame())
            .map_err(|_| EngineError::Disconnected)?;
        debug!("sent termination to worker {}", i + 1);
    }

    // Exactly one witness per worker, indexed by rank so that arrival
    // order cannot affect tie-breaking.
    let mut witnesses: Vec<Option<SearchState>> = vec![None; workers];
    let mut received = 0;
    while received < workers {
        let frame = channels
            .inbox
            .recv()
            .map_err(|_| EngineError::Disconnected)?;
        match frame.tag {
            Tag::Bound => {
                let witness = codec::decode(&frame.payload)?;
                debug!(
                    "worker {} returned a witness with {} steps",
                    frame.source,
                    witness.steps()
                );
                match witnesses.get_mut(frame.source.wrapping_sub(1)) {
                    Some(slot) => {
                        if slot.replace(witness).is_none() {
                            received += 1;
                        }
                    }
                    None => warn!("witness from unknown rank {}", frame.source),
                }
            }
            tag => warn!(
                "coordinator ignoring unexpected {} frame from {}",
                tag, frame.source
            ),
        }
    }

    // Lowest step count wins; scanning in rank order with a strict
    // comparison leaves ties with the lowest rank.
    let mut best = SearchState::unsolved(puzzle.knight, puzzle.targets.clone(), puzzle.upper_bound);
    for witness in witnesses.into_iter().flatten() {
        if witness.is_complete() && witness.steps() < best.steps() {
            best = witness;
        }
    }
    Ok(best)
}

fn acknowledge(frame: &Frame, idle: &mut [bool]) {
    match frame.tag {
        Tag::Ready => match idle.get_mut(frame.source.wrapping_sub(1)) {
            Some(slot) => {
                *slot = true;
                debug!("worker {} is ready", frame.source);
            }
            None => warn!("READY from unknown rank {}", frame.source),
        },
        tag => warn!(
            "coordinator ignoring unexpected {} frame from {}",
            tag, frame.source
        ),
    }
}

fn terminate_frame() -> Frame {
    Frame {
        source: COORDINATOR_RANK,
        tag: Tag::Terminate,
        payload: TERMINATE_PAYLOAD.to_vec(),
    }
}
