//! Shared best-known solution, the pruning bound of the search.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::search::state::SearchState;

/// The best complete solution known to one endpoint: an atomic step-count
/// bound for lock-free pruning reads, paired with the witness state behind
/// a mutex. The bound only ever decreases; writers re-check the strict `<`
/// predicate after taking the lock, so concurrent installers cannot
/// regress it and equal-length completions lose to the first one found.
#[derive(Debug)]
pub struct Incumbent {
    bound: AtomicU32,
    witness: Mutex<SearchState>,
}

impl Incumbent {
    /// Seed with the initial witness, normally the [`SearchState::unsolved`]
    /// sentinel carrying the user's upper bound.
    pub fn new(initial: SearchState) -> Self {
        Self {
            bound: AtomicU32::new(initial.steps()),
            witness: Mutex::new(initial),
        }
    }

    /// Lock-free snapshot of the current bound.
    pub fn bound(&self) -> u32 {
        self.bound.load(Ordering::SeqCst)
    }

    /// Install `candidate` as the new bound and witness if it is complete
    /// and strictly better. Returns whether it was adopted.
    pub fn try_install(&self, candidate: &SearchState) -> bool {
        if !candidate.is_complete() {
            return false;
        }
        if candidate.steps() >= self.bound() {
            return false;
        }
        let mut witness = self.witness.lock().expect("incumbent lock poisoned");
        if candidate.steps() >= witness.steps() {
            return false;
        }
        self.bound.store(candidate.steps(), Ordering::SeqCst);
        *witness = candidate.clone();
        true
    }

    /// Install by value, for candidates arriving off the wire.
    pub fn adopt(&self, candidate: SearchState) -> bool {
        if !candidate.is_complete() || candidate.steps() >= self.bound() {
            return false;
        }
        let mut witness = self.witness.lock().expect("incumbent lock poisoned");
        if candidate.steps() >= witness.steps() {
            return false;
        }
        self.bound.store(candidate.steps(), Ordering::SeqCst);
        *witness = candidate;
        true
    }

    /// Clone of the current witness.
    pub fn witness(&self) -> SearchState {
        self.witness
            .lock()
            .expect("incumbent lock poisoned")
            .clone()
    }
}
