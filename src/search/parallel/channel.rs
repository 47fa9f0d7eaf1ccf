//! Tagged-frame transport between the coordinator and the workers.
//!
//! Endpoints are addressed by rank: the coordinator is rank 0, workers are
//! ranks 1..=W. Every endpoint owns one inbox and holds senders to every
//! other endpoint, so bound updates travel worker-to-worker without
//! passing through the coordinator. Channels are unbounded: sends never
//! block, receives block until a frame arrives, and delivery is FIFO per
//! (sender, receiver) pair.

use crossbeam_channel::{Receiver, Sender, unbounded};

/// The coordinator's rank.
pub const COORDINATOR_RANK: usize = 0;

/// Message kind. One match over the tag at each receive site decides
/// everything about a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Payload is an encoded task state; coordinator to worker.
    Task,
    /// Short acknowledgement; worker to coordinator.
    Ready,
    /// Short shutdown command; coordinator to worker.
    Terminate,
    /// Payload is an encoded witness: a bound update between workers, or
    /// a worker's final witness returned to the coordinator.
    Bound,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Task => write!(f, "TASK"),
            Tag::Ready => write!(f, "READY"),
            Tag::Terminate => write!(f, "TERMINATE"),
            Tag::Bound => write!(f, "BOUND"),
        }
    }
}

/// ASCII payload of a READY acknowledgement.
pub const READY_PAYLOAD: &[u8] = b"ready";

/// ASCII payload of a TERMINATE command.
pub const TERMINATE_PAYLOAD: &[u8] = b"terminate";

/// One message on the wire: the sender's rank, a tag, and an opaque
/// payload. This is also what a receive reports, so the receiver can match
/// on source and tag the way the original's receive-any did.
#[derive(Debug, Clone)]
pub struct Frame {
    pub source: usize,
    pub tag: Tag,
    pub payload: Vec<u8>,
}

/// Channel endpoints for one worker.
pub struct WorkerChannels {
    /// This worker's rank, in 1..=num_workers.
    pub rank: usize,
    /// Incoming frames from the coordinator and from peers.
    pub inbox: Receiver<Frame>,
    /// Send frames to the coordinator.
    pub to_coordinator: Sender<Frame>,
    /// Send frames to each peer worker, as (peer rank, sender) pairs.
    /// Excludes this worker itself.
    pub to_peers: Vec<(usize, Sender<Frame>)>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Incoming frames from all workers.
    pub inbox: Receiver<Frame>,
    /// Send frames to each worker; index `i` reaches rank `i + 1`.
    pub to_workers: Vec<Sender<Frame>>,
}

/// Create the full many-to-many channel fabric for `num_workers` workers.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    let (coordinator_tx, coordinator_rx) = unbounded();

    let mut worker_txs = Vec::with_capacity(num_workers);
    let mut worker_rxs = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let (tx, rx) = unbounded();
        worker_txs.push(tx);
        worker_rxs.push(rx);
    }

    let workers = worker_rxs
        .into_iter()
        .enumerate()
        .map(|(i, inbox)| {
            let rank = i + 1;
            let to_peers = worker_txs
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, tx)| (j + 1, tx.clone()))
                .collect();
            WorkerChannels {
                rank,
                inbox,
                to_coordinator: coordinator_tx.clone(),
                to_peers,
            }
        })
        .collect();

    let coordinator = CoordinatorChannels {
        inbox: coordinator_rx,
        to_workers: worker_txs,
    };

    (coordinator, workers)
}
