//! Typed errors surfaced by the core pipeline.
//!
//! Everything here propagates to the session layer unchanged; the core never
//! retries or recovers silently. Re-prompting on bad input is the session's
//! job.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error("unknown city '{name}' (supported: chicago, new york city, washington)")]
    UnknownCity { name: String },

    #[error("row {row}: cannot parse timestamp '{value}'")]
    MalformedTimestamp { row: usize, value: String },

    #[error("row {row}: cannot parse number '{value}'")]
    MalformedNumeric { row: usize, value: String },

    #[error("unknown month '{name}' (expected 'all' or january..december)")]
    UnknownMonth { name: String },

    #[error("unknown day of week '{name}' (expected 'all' or monday..sunday)")]
    UnknownWeekday { name: String },

    #[error("no rows to aggregate for {what}")]
    EmptyDataset { what: &'static str },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
