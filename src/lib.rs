//! # jtl - Jira Time Logger
//!
//! A command-line utility for logging time spent on Jira tickets into a
//! monthly CSV file and pushing it to Jira as worklogs.
//!
//! ## Features
//!
//! - **Logging**: append entries, optionally auto-fitted into an 8 hour day
//! - **Aliases**: short names for frequently logged tickets
//! - **Reports**: today's entries and a weekly summary of the month
//! - **Push**: concurrent worklog creation with per-record results
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jtl::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
