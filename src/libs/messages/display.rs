//! Display implementation for jtl messages.
//!
//! Every line of text jtl shows to the user is defined here, in one match, so
//! wording stays consistent across commands. Messages that explain a
//! rejection always say why the operation was refused.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    /// Converts a `Message` variant into the text shown to the user.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jtl::libs::messages::Message;
    ///
    /// let message = Message::PushSummary { pushed: 2, total: 3 };
    /// assert_eq!(message.to_string(), "Pushed 2 of 3 worklogs");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigInitialized(path) => format!("Config file not found. Initialized default config: {}", path),
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigModuleJira => "Jira settings".to_string(),
            Message::ConfigModuleLog => "Logging settings".to_string(),

            // === LOG MESSAGES ===
            Message::RecordLogged {
                ticket,
                time_spent,
                started,
            } => format!("Logged {} on {} starting {}", time_spent, ticket, started),
            Message::TimeSpentTrimmed { logged, cap } => {
                format!("Time spent is trimmed to {}, to not exceed {}", logged, cap)
            }
            Message::DayRedistributed { adjusted, per_record } => format!(
                "Daily limit reached: {} unpushed record(s) of the day and the new one are set to {} each",
                adjusted, per_record
            ),
            Message::AliasResolved { alias, ticket } => format!("Alias '{}' resolved to {}", alias, ticket),

            // === PUSH MESSAGES ===
            Message::PreviewHeader(host) => format!("------------\nPREVIEW MODE\n------------\nJira server: {}", host),
            Message::PreviewRequest { url, body } => format!("POST {}\n{}\n", url, body),
            Message::PreviewTotal(count) => format!("Total requests: {}", count),
            Message::PreviewDone => "-----\nDone!\n-----".to_string(),
            Message::PreviewNoHost => "No Jira host configured, showing a preview instead of pushing".to_string(),
            Message::NothingToPush => "Nothing to push, all records already have worklog ids".to_string(),
            Message::PushSummary { pushed, total } => format!("Pushed {} of {} worklogs", pushed, total),
            Message::PushFailed(reason) => reason.to_string(),

            // === REPORT MESSAGES ===
            Message::DailyReportHeader(date) => format!("Report for {}", date),
            Message::MonthlyReportHeader(file) => format!("Weekly summary of {}", file),
            Message::NoRecords(file) => format!("No records in {}", file),

            // === PROMPTS ===
            Message::PromptJiraHost => "Enter the Jira server URL".to_string(),
            Message::PromptJiraUsername => "Enter your Jira username".to_string(),
            Message::PromptJiraPassword => "Enter your Jira password".to_string(),
            Message::PromptDailyCap => "Maximum minutes to log per day".to_string(),
            Message::PromptAliases => "Ticket aliases (name=TICKET, comma separated)".to_string(),
        };
        write!(f, "{}", text)
    }
}
