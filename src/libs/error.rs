//! Typed errors raised by the jtl core.
//!
//! Command handlers work with `anyhow::Result` and convert these with `?`.
//! Everything the core can reject on user input is listed here so that the
//! caller can always tell the user *why* an operation was refused.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JtlError {
    /// A duration token ends with something other than `d`, `h` or `m`.
    #[error("Invalid duration unit in '{0}', expected one of d, h, m")]
    InvalidDurationUnit(String),

    #[error("Duration is empty")]
    EmptyDuration,

    #[error("Timestamp '{value}' does not match the pattern '{pattern}'")]
    InvalidTimestamp { value: String, pattern: String },

    #[error("Ticket '{ticket}' must match pattern {pattern}")]
    InvalidTicket { ticket: String, pattern: String },

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    /// Auto-fitting left nothing to log for the day.
    #[error("Calculated time spent is 0m, will not log!")]
    ZeroDurationRejected,

    /// The daily cap is reached and every record of the day is already pushed.
    #[error("You have already logged {logged}, will not log more")]
    DailyCapExceeded { logged: String },

    #[error("Row {index} was not pushed: {reason}")]
    RemoteRequestFailed { index: usize, reason: String },

    #[error("No record at row {0}")]
    RecordNotFound(usize),

    #[error("Row {row} has {columns} columns, expected 6")]
    MalformedRow { row: usize, columns: usize },
}
