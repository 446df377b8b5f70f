use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::results::{MatchOutcome, PairOutcome};
use crate::search::Algorithm;

/// Tracks search work across the workers of a batch
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    pairs_evaluated: Arc<AtomicU64>,
    duplicates: Arc<AtomicU64>,
    not_found: Arc<AtomicU64>,
    truncated: Arc<AtomicU64>,
    comparisons: Arc<AtomicU64>,
    elapsed_nanos: Arc<AtomicU64>,

    // Invocations per algorithm
    naive_runs: Arc<AtomicU64>,
    kmp_runs: Arc<AtomicU64>,
    boyer_moore_runs: Arc<AtomicU64>,
}

impl SearchMetrics {
    /// Creates a new SearchMetrics instance
    pub fn new() -> Self {
        Self {
            pairs_evaluated: Arc::new(AtomicU64::new(0)),
            duplicates: Arc::new(AtomicU64::new(0)),
            not_found: Arc::new(AtomicU64::new(0)),
            truncated: Arc::new(AtomicU64::new(0)),
            comparisons: Arc::new(AtomicU64::new(0)),
            elapsed_nanos: Arc::new(AtomicU64::new(0)),
            naive_runs: Arc::new(AtomicU64::new(0)),
            kmp_runs: Arc::new(AtomicU64::new(0)),
            boyer_moore_runs: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records one evaluated pair
    pub fn record_pair(&self, outcome: &PairOutcome) {
        self.pairs_evaluated.fetch_add(1, Ordering::Relaxed);
        match outcome.run.outcome {
            MatchOutcome::Found(_) => self.duplicates.fetch_add(1, Ordering::Relaxed),
            MatchOutcome::NotFound => self.not_found.fetch_add(1, Ordering::Relaxed),
            MatchOutcome::Truncated => self.truncated.fetch_add(1, Ordering::Relaxed),
        };
        self.comparisons
            .fetch_add(outcome.run.comparisons as u64, Ordering::Relaxed);
        let nanos = u64::try_from(outcome.elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::Relaxed);

        let runs = match outcome.algorithm {
            Algorithm::Naive => &self.naive_runs,
            Algorithm::Kmp => &self.kmp_runs,
            Algorithm::BoyerMoore => &self.boyer_moore_runs,
        };
        runs.fetch_add(1, Ordering::Relaxed);

        if outcome.run.outcome.is_truncated() {
            debug!(
                "Trace budget exhausted after {} comparisons",
                outcome.run.comparisons
            );
        }
    }

    pub fn pairs_evaluated(&self) -> u64 {
        self.pairs_evaluated.load(Ordering::Relaxed)
    }

    pub fn truncated(&self) -> u64 {
        self.truncated.load(Ordering::Relaxed)
    }

    /// Gets current statistics
    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            pairs_evaluated: self.pairs_evaluated.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
            comparisons: self.comparisons.load(Ordering::Relaxed),
            elapsed_nanos: self.elapsed_nanos.load(Ordering::Relaxed),
            naive_runs: self.naive_runs.load(Ordering::Relaxed),
            kmp_runs: self.kmp_runs.load(Ordering::Relaxed),
            boyer_moore_runs: self.boyer_moore_runs.load(Ordering::Relaxed),
        }
    }

    /// Logs current statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Search stats:\n\
             Pairs evaluated: {}\n\
             Duplicate/not found/truncated: {}/{}/{}\n\
             Character comparisons: {}\n\
             Search time: {} ns\n\
             Runs (naive/kmp/bm): {}/{}/{}",
            stats.pairs_evaluated,
            stats.duplicates,
            stats.not_found,
            stats.truncated,
            stats.comparisons,
            stats.elapsed_nanos,
            stats.naive_runs,
            stats.kmp_runs,
            stats.boyer_moore_runs
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`SearchMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub pairs_evaluated: u64,
    pub duplicates: u64,
    pub not_found: u64,
    pub truncated: u64,
    pub comparisons: u64,
    pub elapsed_nanos: u64,
    pub naive_runs: u64,
    pub kmp_runs: u64,
    pub boyer_moore_runs: u64,
}
