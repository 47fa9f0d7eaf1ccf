//! Worker event loop.

use log::{debug, warn};

use crate::parser::Puzzle;
use crate::search::bound::Incumbent;
use crate::search::codec;
use crate::search::expander;
use crate::search::parallel::EngineError;
use crate::search::parallel::channel::{Frame, READY_PAYLOAD, Tag, WorkerChannels};
use crate::search::state::SearchState;

/// Run one worker until termination.
///
/// The loop receives one frame at a time and dispatches on its tag:
/// a TASK is expanded against the local incumbent (with the improved
/// witness broadcast to every peer before the READY acknowledgement goes
/// out), a BOUND from a peer is adopted if strictly better, and TERMINATE
/// sends the local witness back to the coordinator and ends the loop.
/// Frames are handled strictly in arrival order, so bound updates that
/// land during an expansion take effect at the next message boundary.
pub fn run_worker(
    puzzle: &Puzzle,
    channels: WorkerChannels,
    threads: usize,
    max_payload: usize,
) -> Result<(), EngineError> {
    let rank = channels.rank;
    let incumbent = Incumbent::new(SearchState::unsolved(
        puzzle.knight,
        puzzle.targets.clone(),
        puzzle.upper_bound,
    ));

    loop {
        let frame = channels
            .inbox
            .recv()
            .map_err(|_| EngineError::Disconnected)?;
        match frame.tag {
            Tag::Task => {
                let task = match codec::decode(&frame.payload) {
                    Ok(task) => task,
                    Err(err) => {
                        // Unblock the dispatch loop before failing.
                        let _ = channels.to_coordinator.send(ready_frame(rank));
                        return Err(err.into());
                    }
                };
                debug!("worker {} received a task at depth {}", rank, task.steps());

                let entering = incumbent.bound();
                expander::expand(&task, puzzle.board_size, &incumbent, threads);

                if incumbent.bound() < entering {
                    let witness = incumbent.witness();
                    debug!(
                        "worker {} improved the bound to {} steps, notifying peers",
                        rank,
                        witness.steps()
                    );
                    let payload = match codec::encode(&witness, max_payload) {
                        Ok(payload) => payload,
                        Err(err) => {
                            let _ = channels.to_coordinator.send(ready_frame(rank));
                            return Err(err.into());
                        }
                    };
                    for (peer, tx) in &channels.to_peers {
                        // Best effort: a peer that is already gone has no
                        // use for the bound.
                        let _ = tx.send(Frame {
                            source: rank,
                            tag: Tag::Bound,
                            payload: payload.clone(),
                        });
                        debug!("worker {} sent bound {} to worker {}", rank, witness.steps(), peer);
                    }
                }

                channels
                    .to_coordinator
                    .send(ready_frame(rank))
                    .map_err(|_| EngineError::Disconnected)?;
            }
            Tag::Bound => {
                let candidate = codec::decode(&frame.payload)?;
                let steps = candidate.steps();
                if incumbent.adopt(candidate) {
                    debug!(
                        "worker {} adopted bound {} from worker {}",
                        rank, steps, frame.source
                    );
                }
            }
            Tag::Terminate => {
                let payload = codec::encode(&incumbent.witness(), max_payload)?;
                channels
                    .to_coordinator
                    .send(Frame {
                        source: rank,
                        tag: Tag::Bound,
                        payload,
                    })
                    .map_err(|_| EngineError::Disconnected)?;
                debug!("worker {} returned its witness and terminated", rank);
                return Ok(());
            }
            tag => {
                warn!("worker {} ignoring unexpected {} frame from {}", rank, tag, frame.source);
            }
        }
    }
}

fn ready_frame(rank: usize) -> Frame {
    Frame {
        source: rank,
        tag: Tag::Ready,
        payload: READY_PAYLOAD.to_vec(),
    }
}
