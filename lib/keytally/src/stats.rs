use serde::Serialize;

/// Per-run observability counters, logged per phase and returned to callers.
/// `skipped` surfaces the rows dropped for having the wrong field count;
/// the selection itself never carries them.
#[derive(Default, Clone, Debug, Serialize)]
pub struct RunStats {
    pub records_in: u64,
    pub emitted: u64,
    pub skipped: u64,
    pub distinct_keys: u64,
    pub map_ms: u64,
    pub shuffle_ms: u64,
    pub reduce_select_ms: u64,
}
