use crate::constants::UNIT_CONTRIBUTION;
use crate::record::{Emission, Record};

/// Map one record into zero or one emission.
///
/// A record with the wrong field count is dropped without error; the caller
/// is responsible for counting drops if it wants them surfaced. The key is
/// the first field, trimmed and upper-cased so padding or case variants of
/// the same id collapse into one key.
pub fn map_record<F>(record: &Record, emit: &mut F)
where
    F: FnMut(Emission),
{
    if !record.is_valid() {
        return;
    }
    let key = record.fields()[0].trim().to_uppercase();
    emit(Emission { key, contribution: UNIT_CONTRIBUTION.to_string() });
}
