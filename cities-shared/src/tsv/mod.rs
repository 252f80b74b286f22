//! TSV import pipeline: one canonical 17-column, tab-separated row format.
//!
//! A line flows through three stages: the record parser splits it into raw
//! positional fields, the factory coerces and range-checks every field
//! against the domain rules, and the bulk reader drives both over a file,
//! keeping the rejection reason for every dropped row.

pub mod coerce;
pub mod factory;
pub mod generator;
pub mod reader;
pub mod record;

use thiserror::Error;

/// Why a single row was dropped. Row-level rejections never abort a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("expected {expected} tab-separated columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("invalid '{field}': {message}")]
    Field {
        field: &'static str,
        message: &'static str,
    },

    #[error("no known user matches '{reference}'")]
    UnknownUser { reference: String },
}
