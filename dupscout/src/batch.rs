use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

use crate::config::DetectorConfig;
use crate::metrics::SearchMetrics;
use crate::pair::{evaluate, Sentence};
use crate::results::{BatchReport, PairRecord};
use crate::search::{Algorithm, Fidelity};

// Chunking bounds for parallel pair evaluation
const MIN_CHUNK_SIZE: usize = 16;
const MAX_CHUNK_SIZE: usize = 256;

/// All unordered index pairs `(i, j)` with `i < j`, in lexicographic order
pub fn pair_indices(count: usize) -> Vec<(usize, usize)> {
    (0..count)
        .flat_map(|i| (i + 1..count).map(move |j| (i, j)))
        .collect()
}

/// Pairs per parallel chunk for `pairs` pairs spread over `threads` workers
fn chunk_size(pairs: usize, threads: NonZeroUsize) -> usize {
    (pairs / threads.get()).clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

/// Runs `op` on a dedicated rayon pool of `threads` workers.
///
/// Falls back to the current pool when a dedicated one cannot be built.
pub(crate) fn run_in_pool<R, OP>(threads: NonZeroUsize, op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match ThreadPoolBuilder::new().num_threads(threads.get()).build() {
        Ok(pool) => pool.install(op),
        Err(e) => {
            warn!(
                "Could not build a pool of {} threads, using the global pool: {}",
                threads, e
            );
            op()
        }
    }
}

/// Checks every pair of sentences for duplication.
///
/// Input limits are the caller's job, see [`crate::validation::prepare_sentences`].
pub fn check_batch<S: AsRef<str> + Sync>(
    sentences: &[S],
    algorithm: Algorithm,
    fidelity: Fidelity,
    config: &DetectorConfig,
) -> BatchReport {
    let metrics = SearchMetrics::new();
    let report = check_batch_with_metrics(sentences, algorithm, fidelity, config, &metrics);
    metrics.log_stats();
    report
}

/// Same as [`check_batch`], recording into caller-provided metrics.
///
/// Pairs are evaluated on a pool of `config.thread_count` workers; records
/// come back in `(i, j)` enumeration order regardless of which worker
/// finished first.
pub fn check_batch_with_metrics<S: AsRef<str> + Sync>(
    sentences: &[S],
    algorithm: Algorithm,
    fidelity: Fidelity,
    config: &DetectorConfig,
    metrics: &SearchMetrics,
) -> BatchReport {
    info!(
        "Starting duplicate check of {} sentences with {} ({})",
        sentences.len(),
        algorithm.label(),
        fidelity
    );

    let (count, records) = run_in_pool(config.thread_count, || {
        let sentences: Vec<Sentence> = sentences
            .par_iter()
            .map(|s| Sentence::new(s.as_ref()))
            .collect();
        let pairs = pair_indices(sentences.len());
        debug!("Enumerated {} pairs", pairs.len());

        let mode = fidelity.mode();
        let records: Vec<PairRecord> = pairs
            .par_chunks(chunk_size(pairs.len(), config.thread_count))
            .flat_map(|chunk| {
                chunk
                    .iter()
                    .map(|&(i, j)| {
                        let (a, b) = (&sentences[i], &sentences[j]);
                        let outcome = evaluate(a, b, algorithm, mode, config.step_budget);
                        metrics.record_pair(&outcome);
                        PairRecord {
                            first: i + 1,
                            second: j + 1,
                            a: a.original.clone(),
                            b: b.original.clone(),
                            status: outcome.status(),
                            outcome,
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        (sentences.len(), records)
    });

    let mut report = BatchReport::new(algorithm, fidelity, count);
    for record in records {
        report.add_record(record);
    }

    info!(
        "Duplicate check complete. {} of {} pairs are duplicates ({} truncated traces)",
        report.duplicate_count, report.total_pairs, report.truncated_count
    );

    report
}
