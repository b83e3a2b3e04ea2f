pub mod barrier;
pub mod constants;
pub mod map;
pub mod pipeline;
pub mod record;
pub mod reduce;
pub mod select;
pub mod shuffle;
pub mod stats;

pub use barrier::CompletionBarrier;
pub use pipeline::{Pipeline, Summary};
pub use record::{Emission, Record, ReducedEntry};
pub use select::Selection;
pub use shuffle::GroupTable;
pub use stats::RunStats;
