//! Configuration management for jtl.
//!
//! The configuration is a JSON file stored in the per-user application
//! directory (see [`DataStorage`]). A different file can be given with the
//! global `--config` flag. Every field has a default, so a partial file or
//! no file at all still yields a usable configuration.
//!
//! ## Example
//!
//! ```json
//! {
//!   "host": "https://jira.example.com",
//!   "credentials": { "username": "jdoe", "password": "" },
//!   "alias": { "standup": "TEAM-12", "review": "TEAM-31" },
//!   "date_time_pattern": "%d %b %Y %H:%M",
//!   "date_pattern": "%d %b %Y",
//!   "daily_cap": 480,
//!   "project_key_pattern": "([A-Za-z]{1,10}-?)[A-Z]+-\\d+"
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jtl::libs::config::Config;
//!
//! let config = Config::read(None)?;
//! let auto_fit = config.auto_fit();
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::allocator::AutoFit;
use super::data_storage::DataStorage;
use super::duration::{TimeFormat, DEFAULT_DATE_PATTERN, DEFAULT_DATE_TIME_PATTERN, MINUTES_PER_DAY};
use super::error::JtlError;
use super::record::{validate_ticket, DEFAULT_CATEGORY, DEFAULT_PROJECT_KEY_PATTERN};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Jira account used for Basic authentication.
///
/// Both fields may stay empty; the `push` command then asks for them.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn trim(&self) -> Self {
        Self::new(self.username.trim(), self.password.trim())
    }

    pub fn is_valid(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }
}

fn default_date_time_pattern() -> String {
    DEFAULT_DATE_TIME_PATTERN.to_string()
}

fn default_date_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}

fn default_daily_cap() -> i64 {
    MINUTES_PER_DAY
}

fn default_project_key_pattern() -> String {
    DEFAULT_PROJECT_KEY_PATTERN.to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Jira server. Empty means push can only preview.
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub credentials: Credentials,

    /// Short names for frequently logged tickets, e.g. `standup -> TEAM-12`.
    #[serde(default)]
    pub alias: BTreeMap<String, String>,

    /// chrono pattern of the `StartedTs` column.
    #[serde(default = "default_date_time_pattern")]
    pub date_time_pattern: String,

    /// chrono pattern for dates shown in reports.
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,

    /// Maximum minutes auto-fitting lets a single day hold.
    #[serde(default = "default_daily_cap")]
    pub daily_cap: i64,

    /// Largest duration auto-fitting gives one entry when the day still has
    /// room. Half of `daily_cap` when not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_size: Option<i64>,

    #[serde(default = "default_project_key_pattern")]
    pub project_key_pattern: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: String::new(),
            credentials: Credentials::default(),
            alias: BTreeMap::new(),
            date_time_pattern: default_date_time_pattern(),
            date_pattern: default_date_pattern(),
            daily_cap: default_daily_cap(),
            split_size: None,
            project_key_pattern: default_project_key_pattern(),
        }
    }
}

impl Config {
    /// Path of the configuration file: `path` if given, otherwise
    /// `config.json` in the application directory.
    pub fn file_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => DataStorage::new().get_path(CONFIG_FILE_NAME),
        }
    }

    /// Reads the configuration.
    ///
    /// When the file does not exist the defaults are written to it first, so
    /// the user has a file to edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default file cannot be created.
    pub fn read(path: Option<&Path>) -> Result<Config> {
        let config_file_path = Self::file_path(path)?;

        if !config_file_path.exists() {
            let config = Config::default();
            config.save(Some(&config_file_path))?;
            msg_print!(Message::ConfigInitialized(config_file_path.display().to_string()));
            return Ok(config);
        }

        let config_str = fs::read_to_string(&config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        tracing::debug!(path = %config_file_path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_file_path = Self::file_path(path)?;
        if let Some(parent) = config_file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive setup of the values people usually change.
    pub fn init(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::read(path).unwrap_or_default();

        msg_print!(Message::ConfigModuleJira);
        config.host = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraHost.to_string())
            .default(config.host.clone())
            .allow_empty(true)
            .interact_text()?;
        config.credentials.username = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptJiraUsername.to_string())
            .default(config.credentials.username.clone())
            .allow_empty(true)
            .interact_text()?;

        msg_print!(Message::ConfigModuleLog);
        config.daily_cap = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDailyCap.to_string())
            .default(config.daily_cap)
            .interact_text()?;

        let aliases: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAliases.to_string())
            .default(format_aliases(&config.alias))
            .allow_empty(true)
            .interact_text()?;
        config.alias = parse_aliases(&aliases);

        Ok(config)
    }

    pub fn time_format(&self) -> TimeFormat {
        TimeFormat::new(&self.date_time_pattern, &self.date_pattern)
    }

    pub fn split_size(&self) -> i64 {
        self.split_size.unwrap_or(self.daily_cap / 2)
    }

    pub fn auto_fit(&self) -> AutoFit {
        AutoFit::new(self.daily_cap, self.split_size(), self.time_format())
    }

    /// Turns the `log` argument into a `(ticket, category)` pair.
    ///
    /// A configured alias maps to its ticket and is used as the category.
    /// Anything else must look like an issue key and gets the `jira`
    /// category.
    pub fn resolve_ticket(&self, value: &str) -> Result<(String, String), JtlError> {
        let (ticket, category) = match self.alias.get(value) {
            Some(ticket) => (ticket.clone(), value.to_string()),
            None => (value.to_string(), DEFAULT_CATEGORY.to_string()),
        };
        validate_ticket(&ticket, &self.project_key_pattern)?;
        Ok((ticket, category))
    }
}

/// `standup=TEAM-12, review=TEAM-31`
fn format_aliases(aliases: &BTreeMap<String, String>) -> String {
    aliases
        .iter()
        .map(|(name, ticket)| format!("{}={}", name, ticket))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn parse_aliases(value: &str) -> BTreeMap<String, String> {
    value
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, ticket)| (name.trim().to_string(), ticket.trim().to_string()))
        .filter(|(name, ticket)| !name.is_empty() && !ticket.is_empty())
        .collect()
}
