//! Client for the remote issue tracker.
//!
//! jtl talks to a single endpoint, the Jira worklog API:
//!
//! ```text
//! POST <host>/rest/api/2/issue/<ticket>/worklog
//! Authorization: Basic <base64(username:password)>
//!
//! {"timeSpent": "2h 30m", "comment": "...", "started": "2020-04-17T08:20:00.000+0200"}
//! ```
//!
//! A created worklog answers `201 Created` with a body whose `id` becomes the
//! record's ID in the data file.

use crate::libs::config::Credentials;
use crate::libs::messages::Message;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Password};

pub mod jira;

pub use jira::Jira;

/// Returns the configured credentials, or asks for them when the username or
/// the password is blank.
pub fn resolve_credentials(configured: &Credentials) -> Result<Credentials> {
    if configured.is_valid() {
        return Ok(configured.trim());
    }

    let username: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptJiraUsername.to_string())
        .with_initial_text(configured.username.trim())
        .interact_text()?;
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptJiraPassword.to_string())
        .interact()?;

    Ok(Credentials::new(&username, &password).trim())
}
