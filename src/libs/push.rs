//! Reconciliation of local records with worklogs created on the server.
//!
//! Each unpushed record becomes one [`PushRequest`] carrying the record's
//! row index. Responses come back in any order and are matched to records
//! by that index only. A record moves from unpushed (empty id) to pushed
//! (id set) exactly once; nothing in here ever touches a pushed record.

use super::error::JtlError;
use super::record::Record;
use super::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    pub index: usize,
    pub ticket: String,
    pub time_spent: String,
    pub comment: String,
    pub started_ts: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResponse {
    pub index: usize,
    pub success: bool,
    pub remote_id: Option<String>,
    pub error: Option<String>,
}

impl PushResponse {
    pub fn pushed(index: usize, remote_id: &str) -> Self {
        Self {
            index,
            success: true,
            remote_id: Some(remote_id.to_string()),
            error: None,
        }
    }

    pub fn failed(index: usize, reason: &str) -> Self {
        Self {
            index,
            success: false,
            remote_id: None,
            error: Some(reason.to_string()),
        }
    }
}

/// Outcome of [`merge`], used for the summary printed after a push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub expected: usize,
    pub pushed: Vec<usize>,
    pub failed: Vec<JtlError>,
}

impl MergeSummary {
    pub fn changed(&self) -> bool {
        !self.pushed.is_empty()
    }
}

/// One request per record without an id, in store order.
///
/// # Arguments
///
/// * `records` - All records of the data file
///
/// # Returns
///
/// Requests carrying each record's row index, which is how [`merge`] finds
/// the record again.
///
/// # Examples
///
/// ```rust
/// use jtl::libs::push::build_requests;
/// use jtl::libs::record::Record;
///
/// let mut pushed = Record::new("PROJ-1", "2h", "", "14 Apr 2020 09:00", "jira");
/// pushed.id = "100027".to_string();
/// let mut open = Record::new("PROJ-2", "1h", "", "14 Apr 2020 11:00", "jira");
/// open.index = 1;
///
/// let requests = build_requests(&[pushed, open]);
/// assert_eq!(requests.len(), 1);
/// assert_eq!(requests[0].index, 1);
/// ```
pub fn build_requests(records: &[Record]) -> Vec<PushRequest> {
    records
        .iter()
        .filter(|record| !record.is_pushed())
        .map(|record| PushRequest {
            index: record.index,
            ticket: record.ticket.clone(),
            time_spent: record.time_spent.clone(),
            comment: record.comment.clone(),
            started_ts: record.started_ts.clone(),
        })
        .collect()
}

/// Writes remote ids of successful responses into the matching records.
///
/// Failed responses are collected in the summary. A response that points at
/// a record which already has an id is ignored, so merging the same
/// responses twice changes nothing.
///
/// # Arguments
///
/// * `responses` - Push results in any order
/// * `store` - The store the requests were built from
/// * `expected` - Number of requests sent. A different number of responses
///   is logged as a warning and the responses present are still merged.
///
/// # Returns
///
/// A [`MergeSummary`] listing the rows that got an id and one
/// [`JtlError::RemoteRequestFailed`] per failed response.
///
/// # Examples
///
/// ```rust
/// use jtl::libs::push::{merge, PushResponse};
/// use jtl::libs::record::Record;
/// use jtl::libs::store::RecordStore;
/// use std::path::Path;
///
/// let mut store = RecordStore::new(Path::new("Apr-2020.csv"));
/// store.add(Record::new("PROJ-1", "2h", "", "14 Apr 2020 09:00", "jira"));
///
/// let summary = merge(&[PushResponse::pushed(0, "100028")], &mut store, 1);
/// assert_eq!(summary.pushed, vec![0]);
/// assert_eq!(store.get(0).unwrap().id, "100028");
/// ```
pub fn merge(responses: &[PushResponse], store: &mut RecordStore, expected: usize) -> MergeSummary {
    if responses.len() != expected {
        tracing::warn!(expected, received = responses.len(), "Response count does not match request count");
    }

    let mut summary = MergeSummary {
        expected,
        ..Default::default()
    };

    for response in responses {
        let remote_id = match (response.success, &response.remote_id) {
            (true, Some(remote_id)) if !remote_id.is_empty() => remote_id,
            _ => {
                summary.failed.push(JtlError::RemoteRequestFailed {
                    index: response.index,
                    reason: response.error.clone().unwrap_or_else(|| "no worklog id returned".to_string()),
                });
                continue;
            }
        };

        match store.get_mut(response.index) {
            Some(record) if record.is_pushed() => {
                tracing::warn!(index = response.index, id = %record.id, "Record is already pushed, ignoring response");
            }
            Some(record) => {
                record.id = remote_id.clone();
                tracing::debug!(index = response.index, id = %remote_id, "Updated record with worklog id");
                summary.pushed.push(response.index);
            }
            None => {
                tracing::warn!(index = response.index, "Response does not match any record");
            }
        }
    }

    summary
}
