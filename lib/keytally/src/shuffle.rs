use crate::record::Emission;
use crossbeam_channel::Receiver;
use std::collections::HashMap;

/// Key to the ordered contributions received for it. List order is arrival
/// order, not input order, since map tasks race.
pub type GroupTable = HashMap<String, Vec<String>>;

/// Drain the emission stream into a group table.
///
/// Single-consumer: exactly one grouper runs per pipeline, so no locking is
/// needed even though the producers are concurrent. Returns only once the
/// stream disconnects, which is the map/reduce synchronization point.
pub fn group(receiver: &Receiver<Emission>) -> GroupTable {
    let mut table = GroupTable::new();
    for emission in receiver.iter() {
        table.entry(emission.key).or_default().push(emission.contribution);
    }
    table
}
