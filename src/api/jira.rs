use crate::libs::{
    config::Credentials,
    duration::TimeFormat,
    error::JtlError,
    push::{PushRequest, PushResponse},
};
use anyhow::Result;
use base64::prelude::*;
use chrono::{Local, TimeZone};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::{self, JoinSet};

const WORKLOG_URL: &str = "rest/api/2/issue";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogBody {
    pub time_spent: String,
    pub comment: String,
    pub started: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogResponse {
    pub id: String,
    #[serde(default)]
    pub issue_id: String,
    #[serde(default)]
    pub time_spent: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub started: String,
}

/// A worklog request ready to be sent or shown in preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    pub index: usize,
    pub url: String,
    pub body: WorklogBody,
}

#[derive(Debug, Clone)]
pub struct Jira {
    client: Client,
    host: String,
    format: TimeFormat,
}

impl Jira {
    pub fn new(host: &str, format: &TimeFormat) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS)).build()?;
        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            format: format.clone(),
        })
    }

    pub fn worklog_url(&self, ticket: &str) -> String {
        format!("{}/{}/{}/worklog", self.host, WORKLOG_URL, ticket)
    }

    /// Builds the URL and body for one request. Preview and live pushes both
    /// go through here.
    pub fn prepare(&self, request: &PushRequest) -> Result<PreparedRequest, JtlError> {
        Ok(PreparedRequest {
            index: request.index,
            url: self.worklog_url(&request.ticket),
            body: WorklogBody {
                time_spent: request.time_spent.clone(),
                comment: request.comment.clone(),
                started: self.started_iso(&request.started_ts)?,
            },
        })
    }

    pub fn prepare_all(&self, requests: &[PushRequest]) -> Vec<Result<PreparedRequest, JtlError>> {
        requests.iter().map(|request| self.prepare(request)).collect()
    }

    /// Local `StartedTs` as ISO-8601 with the local offset, e.g.
    /// `2020-04-17T08:20:00.000+0200`.
    fn started_iso(&self, started_ts: &str) -> Result<String, JtlError> {
        let naive = self.format.parse(started_ts)?;
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .ok_or_else(|| JtlError::InvalidTimestamp {
                value: started_ts.to_string(),
                pattern: self.format.date_time.clone(),
            })?;
        Ok(local.format(ISO_FORMAT).to_string())
    }

    /// Sends every request concurrently and waits for all of them.
    ///
    /// A request that cannot be built, fails in transport or gets a non-2xx
    /// answer becomes a failed response; it never stops the other requests.
    /// Responses are returned in completion order.
    ///
    /// # Arguments
    ///
    /// * `requests` - One request per unpushed record, see [`build_requests`](crate::libs::push::build_requests)
    /// * `credentials` - Account used for the Basic `Authorization` header
    ///
    /// # Returns
    ///
    /// Exactly one [`PushResponse`] per request, carrying the request's row
    /// index.
    pub async fn push_all(&self, requests: &[PushRequest], credentials: &Credentials) -> Vec<PushResponse> {
        let authorization = basic_auth(credentials);
        let mut tasks = JoinSet::new();
        let mut indices = HashMap::new();
        let mut responses = Vec::with_capacity(requests.len());

        for request in requests {
            let prepared = match self.prepare(request) {
                Ok(prepared) => prepared,
                Err(e) => {
                    responses.push(PushResponse::failed(request.index, &e.to_string()));
                    continue;
                }
            };
            let client = self.client.clone();
            let authorization = authorization.clone();
            let handle = tasks.spawn(async move { send(client, prepared, authorization).await });
            indices.insert(handle.id(), request.index);
        }

        responses.extend(collect_responses(tasks, indices).await);
        responses
    }
}

/// Waits for every push task. A task that panicked or was cancelled becomes
/// a failed response for the row it was spawned for.
pub async fn collect_responses(
    mut tasks: JoinSet<PushResponse>,
    mut indices: HashMap<task::Id, usize>,
) -> Vec<PushResponse> {
    let mut responses = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((id, response)) => {
                indices.remove(&id);
                responses.push(response);
            }
            Err(e) => {
                tracing::error!(error = %e, "Push task did not complete");
                match indices.remove(&e.id()) {
                    Some(index) => responses.push(PushResponse::failed(index, &format!("Push task failed: {}", e))),
                    None => tracing::warn!(task = %e.id(), "Failed push task has no row index"),
                }
            }
        }
    }
    responses
}

async fn send(client: Client, prepared: PreparedRequest, authorization: String) -> PushResponse {
    let index = prepared.index;
    let result = client
        .post(&prepared.url)
        .header(AUTHORIZATION, authorization)
        .header(CONTENT_TYPE, "application/json")
        .json(&prepared.body)
        .send()
        .await;

    let res = match result {
        Ok(res) => res,
        Err(e) => {
            tracing::warn!(index, url = %prepared.url, error = %e, "Failed to send worklog");
            return PushResponse::failed(index, &e.to_string());
        }
    };

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        tracing::warn!(index, %status, body = %body, "Jira rejected worklog");
        return PushResponse::failed(index, &format!("Jira responded {}", status));
    }

    match res.json::<WorklogResponse>().await {
        Ok(worklog) => {
            tracing::debug!(index, id = %worklog.id, issue_id = %worklog.issue_id, "Worklog created");
            PushResponse::pushed(index, &worklog.id)
        }
        Err(e) => PushResponse::failed(index, &format!("Unexpected Jira response: {}", e)),
    }
}

pub fn basic_auth(credentials: &Credentials) -> String {
    let token = BASE64_STANDARD.encode(format!("{}:{}", credentials.username, credentials.password));
    format!("Basic {}", token)
}
