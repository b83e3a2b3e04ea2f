//! Centralized record-format constants and environment knob names.

/// A record is valid iff it carries exactly this many fields.
pub const RECORD_FIELDS: usize = 6;

/// Unit contribution emitted once per valid record; counting sums these.
pub const UNIT_CONTRIBUTION: &str = "1";

/// Overrides the default map worker count (all cores) when set.
pub const ENV_PARALLELISM: &str = "KEYTALLY_PARALLELISM";
