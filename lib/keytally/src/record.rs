use crate::constants::RECORD_FIELDS;
use serde::Serialize;

/// One input row: an ordered sequence of string fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record(Vec<String>);

impl Record {
    pub fn new(fields: Vec<String>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.len() == RECORD_FIELDS
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Key/contribution pair produced by the map phase, one per valid record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Emission {
    pub key: String,
    pub contribution: String,
}

/// Per-key count produced by the reduce phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReducedEntry {
    pub key: String,
    pub count: u64,
}
