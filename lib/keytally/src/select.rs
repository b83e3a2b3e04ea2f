use crate::record::ReducedEntry;
use crossbeam_channel::Receiver;
use serde::Serialize;

/// Maximum observed count and the keys tied at it.
///
/// `winners` is in selector-encounter order, which is not deterministic
/// across runs; callers wanting stable output use `sorted_winners`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub max_count: u64,
    pub winners: Vec<String>,
}

impl Selection {
    /// Winners sorted by key, the explicit determinism step for display.
    pub fn sorted_winners(&self) -> Vec<String> {
        let mut winners = self.winners.clone();
        winners.sort();
        winners
    }
}

/// Fold the reduced stream into the running maximum and its tie set.
pub fn select_max(receiver: &Receiver<ReducedEntry>) -> Selection {
    let mut max_count = 0u64;
    let mut winners: Vec<String> = Vec::new();
    for entry in receiver.iter() {
        if entry.count > max_count {
            max_count = entry.count;
            winners.clear();
            winners.push(entry.key);
        } else if entry.count == max_count && max_count > 0 {
            winners.push(entry.key);
        }
    }
    Selection { max_count, winners }
}
