use crate::record::ReducedEntry;
use crate::shuffle::GroupTable;
use crossbeam_channel::Sender;

/// Reduce each key's contribution list to its count.
///
/// Single pass in table-iteration order (unspecified, may differ between
/// runs). Takes the reduced-stream sender by value: dropping it on return
/// closes the stream for the selector.
pub fn reduce(table: GroupTable, sender: Sender<ReducedEntry>) {
    for (key, contributions) in table {
        let entry = ReducedEntry { key, count: contributions.len() as u64 };
        let _ = sender.send(entry);
    }
}
