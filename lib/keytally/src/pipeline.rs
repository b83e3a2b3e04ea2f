use crate::barrier::CompletionBarrier;
use crate::map::map_record;
use crate::record::{Emission, Record, ReducedEntry};
use crate::reduce::reduce;
use crate::select::{select_max, Selection};
use crate::shuffle::group;
use crate::stats::RunStats;
use anyhow::{anyhow, Context, Result};
use crossbeam_channel as channel;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Result of one pipeline run: the selection handed to presentation, plus
/// the run's observability counters.
#[derive(Clone, Debug)]
pub struct Summary {
    pub selection: Selection,
    pub stats: RunStats,
}

/// Three-stage counting pipeline: concurrent map into a barrier-closed
/// emission stream, single-consumer shuffle into a group table, then a
/// reduce stream folded to the maximum count and its tie set.
///
/// Degree of parallelism is an explicit constructor parameter bounding the
/// map worker pool; it is never read from global state inside the run.
pub struct Pipeline {
    parallelism: usize,
}

impl Pipeline {
    /// Pipeline with one map worker per available core.
    pub fn new() -> Self {
        Self::with_parallelism(num_cpus::get())
    }

    pub fn with_parallelism(parallelism: usize) -> Self {
        Self { parallelism: parallelism.max(1) }
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    /// Run the pipeline over a finite in-memory record set.
    ///
    /// Stages never fail on validated in-memory data; the only fallible step
    /// is building the worker pool. Malformed records are dropped, counted
    /// in the returned stats rather than treated as errors.
    pub fn run(&self, records: &[Record]) -> Result<Summary> {
        // Channel capacity = input length, so producers never block on a
        // consumer that has not started draining yet.
        let capacity = records.len().max(1);
        let (emit_tx, emit_rx) = channel::bounded::<Emission>(capacity);
        let (reduced_tx, reduced_rx) = channel::bounded::<ReducedEntry>(capacity);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism)
            .build()
            .context("build map worker pool")?;
        let barrier = CompletionBarrier::new(records.len(), emit_tx);
        let emitted = AtomicU64::new(0);
        let skipped = AtomicU64::new(0);

        info!(records = records.len(), workers = self.parallelism, "pipeline starting");

        let (map_ms, shuffle_ms, distinct_keys, selection, reduce_select_ms) =
            thread::scope(|s| -> Result<(u64, u64, u64, Selection, u64)> {
                let barrier = &barrier;
                let emitted = &emitted;
                let skipped = &skipped;
                let pool = &pool;
                let emit_rx = &emit_rx;

                // Map phase: one task per record on the bounded pool. Each
                // task drops its producer handle before arriving, so the
                // zero-reaching arrival drops the last sender.
                let map_stage = s.spawn(move || {
                    let start = Instant::now();
                    pool.install(|| {
                        records.par_iter().for_each(|record| {
                            if let Some(tx) = barrier.producer() {
                                let mut sent = false;
                                map_record(record, &mut |emission| {
                                    sent = true;
                                    let _ = tx.send(emission);
                                });
                                if sent {
                                    emitted.fetch_add(1, Ordering::Relaxed);
                                } else {
                                    skipped.fetch_add(1, Ordering::Relaxed);
                                    debug!(fields = record.fields().len(), "dropping malformed record");
                                }
                            }
                            barrier.arrive();
                        });
                    });
                    start.elapsed().as_millis() as u64
                });

                // Shuffle drains until the barrier closes the stream, then
                // reduce feeds the selector; dropping reduced_tx closes it.
                let shuffle_stage = s.spawn(move || {
                    let start = Instant::now();
                    let table = group(emit_rx);
                    let shuffle_ms = start.elapsed().as_millis() as u64;
                    let keys = table.len() as u64;
                    reduce(table, reduced_tx);
                    (shuffle_ms, keys)
                });

                let start = Instant::now();
                let selection = select_max(&reduced_rx);
                let reduce_select_ms = start.elapsed().as_millis() as u64;

                let map_ms = map_stage.join().map_err(|_| anyhow!("map stage panicked"))?;
                let (shuffle_ms, distinct_keys) =
                    shuffle_stage.join().map_err(|_| anyhow!("shuffle stage panicked"))?;
                Ok((map_ms, shuffle_ms, distinct_keys, selection, reduce_select_ms))
            })?;

        let stats = RunStats {
            records_in: records.len() as u64,
            emitted: emitted.load(Ordering::Relaxed),
            skipped: skipped.load(Ordering::Relaxed),
            distinct_keys,
            map_ms,
            shuffle_ms,
            reduce_select_ms,
        };
        info!(
            phase = "map",
            records_in = stats.records_in,
            emitted = stats.emitted,
            skipped = stats.skipped,
            wall_ms = stats.map_ms,
            "Map phase complete"
        );
        info!(
            phase = "shuffle",
            keys = stats.distinct_keys,
            wall_ms = stats.shuffle_ms,
            "Shuffle phase complete"
        );
        info!(
            phase = "reduce_select",
            max_count = selection.max_count,
            winners = selection.winners.len(),
            wall_ms = stats.reduce_select_ms,
            "Reduce and selection complete"
        );

        Ok(Summary { selection, stats })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallelism_is_clamped_to_at_least_one() {
        assert_eq!(Pipeline::with_parallelism(0).parallelism(), 1);
        assert_eq!(Pipeline::with_parallelism(4).parallelism(), 4);
        assert!(Pipeline::new().parallelism() >= 1);
    }
}
