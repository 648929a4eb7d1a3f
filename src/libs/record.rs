use super::duration::{parse_duration, TimeFormat};
use super::error::JtlError;
use regex::Regex;

pub const DEFAULT_PROJECT_KEY_PATTERN: &str = r"([A-Za-z]{1,10}-?)[A-Z]+-\d+";
pub const DEFAULT_CATEGORY: &str = "jira";

/// Column names of the data file, in the order fields are written.
pub const HEADER: [&str; 6] = ["ID", "StartedTs", "Comment", "TimeSpent", "Ticket", "Category"];

/// One logged work entry, i.e. one row of the data file.
///
/// `index` is the row position assigned when the record was read or added.
/// It identifies the record for updates and for matching push responses,
/// and is never written to the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub index: usize,
    pub id: String,
    pub started_ts: String,
    pub comment: String,
    pub time_spent: String,
    pub ticket: String,
    pub category: String,
}

impl Record {
    pub fn new(ticket: &str, time_spent: &str, comment: &str, started_ts: &str, category: &str) -> Self {
        Record {
            index: 0,
            id: String::new(),
            started_ts: started_ts.to_string(),
            comment: comment.to_string(),
            time_spent: time_spent.to_string(),
            ticket: ticket.to_string(),
            category: category.to_string(),
        }
    }

    /// A record is pushed once Jira assigned it a worklog id.
    pub fn is_pushed(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn minutes(&self) -> Result<i64, JtlError> {
        parse_duration(&self.time_spent)
    }

    pub fn as_row(&self) -> [&str; 6] {
        [
            &self.id,
            &self.started_ts,
            &self.comment,
            &self.time_spent,
            &self.ticket,
            &self.category,
        ]
    }
}

/// Checks that `ticket` looks like a Jira issue key.
pub fn validate_ticket(ticket: &str, pattern: &str) -> Result<(), JtlError> {
    if ticket.trim().is_empty() {
        return Err(JtlError::MissingField("Ticket"));
    }
    let invalid = || JtlError::InvalidTicket {
        ticket: ticket.to_string(),
        pattern: pattern.to_string(),
    };
    let rx = Regex::new(pattern).map_err(|_| invalid())?;
    if rx.is_match(ticket) {
        Ok(())
    } else {
        Err(invalid())
    }
}

/// Field-by-field validation run before a record is written.
pub fn validate_record(record: &Record, key_pattern: &str, format: &TimeFormat) -> Result<(), JtlError> {
    validate_ticket(&record.ticket, key_pattern)?;
    if record.time_spent.trim().is_empty() {
        return Err(JtlError::MissingField("TimeSpent"));
    }
    parse_duration(&record.time_spent)?;
    format.parse(&record.started_ts)?;
    Ok(())
}
