//! Core library modules for jtl.
//!
//! ## Modules
//!
//! - **duration**: duration strings and timestamp patterns
//! - **record** / **store**: the data file and its rows
//! - **allocator**: auto-fitting of new entries into a working day
//! - **push**: matching Jira worklog responses back to records
//! - **report**: weekly, monthly and daily summaries
//! - **config**, **data_storage**, **messages**, **view**: plumbing around them
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jtl::libs::allocator::{AutoFit, LogRequest};
//! use jtl::libs::store::RecordStore;
//! use std::path::Path;
//!
//! let mut store = RecordStore::read(Path::new("Apr-2020.csv"))?;
//! let request = LogRequest {
//!     ticket: "PROJ-1".to_string(),
//!     time_spent: "2h".to_string(),
//!     comment: "Code review".to_string(),
//!     started_ts: "14 Apr 2020 10:00".to_string(),
//!     category: "jira".to_string(),
//! };
//! AutoFit::default().allocate(&mut store, &request)?;
//! store.write()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod allocator;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod error;
pub mod messages;
pub mod push;
pub mod record;
pub mod report;
pub mod store;
pub mod view;
