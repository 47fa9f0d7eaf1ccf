//! Configuration for engine runs.

/// Configuration for a parallel solve.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of worker endpoints.
    pub workers: usize,
    /// Expander threads inside each worker (top-level subtree
    /// parallelism; 1 means fully sequential expansion).
    pub threads: usize,
    /// Minimum task-pool size the frontier generator aims for before
    /// dispatch starts.
    pub min_pool: usize,
    /// Maximum encoded payload size in bytes. Encoding a state past this
    /// budget is a fatal error.
    pub max_payload: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            threads: 1,
            min_pool: 30,
            max_payload: 4096,
        }
    }
}

impl EngineConfig {
    /// Set the number of workers (floored at 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the per-worker expander thread count (floored at 1).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Set the frontier pool minimum.
    pub fn with_min_pool(mut self, min_pool: usize) -> Self {
        self.min_pool = min_pool.max(1);
        self
    }

    /// Set the payload budget.
    pub fn with_max_payload(mut self, max_payload: usize) -> Self {
        self.max_payload = max_payload;
        self
    }
}
