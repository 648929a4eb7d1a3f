#[cfg(test)]
mod tests {
    use jtl::api::jira::{basic_auth, collect_responses, Jira};
    use jtl::libs::config::Credentials;
    use jtl::libs::duration::TimeFormat;
    use jtl::libs::error::JtlError;
    use jtl::libs::push::{build_requests, merge, PushResponse};
    use jtl::libs::record::Record;
    use jtl::libs::store::RecordStore;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use tokio::task::JoinSet;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct PushTestContext {
        _temp_dir: TempDir,
        store: RecordStore,
    }

    fn seeded_store(temp_dir: &TempDir) -> RecordStore {
        let mut store = RecordStore::new(&temp_dir.path().join("Apr-2020.csv"));
        store.add(Record::new("JIRA-1", "3h", "Review", "14 Apr 2020 12:00", "jira"));
        store.add(Record::new("JIRA-2", "2h", "Design", "17 Apr 2020 08:20", "jira"));
        store.add(Record::new("JIRA-3", "20m", "", "20 Apr 2020 12:00", "jira"));
        store
    }

    impl TestContext for PushTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = seeded_store(&temp_dir);
            PushTestContext {
                _temp_dir: temp_dir,
                store,
            }
        }
    }

    /// Seeded store plus a mock Jira server. The temp dir must outlive the store.
    async fn create_jira_context() -> (TempDir, RecordStore, MockServer) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&temp_dir);
        (temp_dir, store, MockServer::start().await)
    }

    #[test_context(PushTestContext)]
    #[test]
    fn test_build_requests_skips_pushed(ctx: &mut PushTestContext) {
        let mut record = ctx.store.get(0).unwrap().clone();
        record.id = "100027".to_string();
        ctx.store.update(record).unwrap();

        let requests = build_requests(ctx.store.records());

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].index, 1);
        assert_eq!(requests[0].ticket, "JIRA-2");
        assert_eq!(requests[1].index, 2);
    }

    #[test_context(PushTestContext)]
    #[test]
    fn test_merge_sets_ids_by_index(ctx: &mut PushTestContext) {
        let responses = vec![
            PushResponse::pushed(2, "100030"),
            PushResponse::failed(0, "Jira responded 400 Bad Request"),
            PushResponse::pushed(1, "100029"),
        ];

        let summary = merge(&responses, &mut ctx.store, 3);

        assert_eq!(ctx.store.get(0).unwrap().id, "");
        assert_eq!(ctx.store.get(1).unwrap().id, "100029");
        assert_eq!(ctx.store.get(2).unwrap().id, "100030");
        assert_eq!(summary.pushed, vec![2, 1]);
        assert_eq!(
            summary.failed,
            vec![JtlError::RemoteRequestFailed {
                index: 0,
                reason: "Jira responded 400 Bad Request".to_string()
            }]
        );
        assert!(summary.changed());
    }

    #[test_context(PushTestContext)]
    #[test]
    fn test_merge_is_idempotent(ctx: &mut PushTestContext) {
        let responses = vec![PushResponse::pushed(1, "100028")];
        merge(&responses, &mut ctx.store, 1);
        let after_first = ctx.store.records().to_vec();

        let summary = merge(&responses, &mut ctx.store, 1);
        assert!(!summary.changed());
        assert_eq!(ctx.store.records(), after_first.as_slice());

        let summary = merge(&[PushResponse::pushed(1, "999999")], &mut ctx.store, 1);
        assert!(!summary.changed());
        assert_eq!(ctx.store.get(1).unwrap().id, "100028");
    }

    #[test_context(PushTestContext)]
    #[test]
    fn test_merge_with_missing_responses(ctx: &mut PushTestContext) {
        let summary = merge(&[PushResponse::pushed(0, "100027")], &mut ctx.store, 3);

        assert_eq!(summary.expected, 3);
        assert_eq!(summary.pushed, vec![0]);
        assert_eq!(ctx.store.get(0).unwrap().id, "100027");
        assert_eq!(ctx.store.get(2).unwrap().id, "");
    }

    #[test]
    fn test_basic_auth() {
        let credentials = Credentials::new("user", "pass");
        assert_eq!(basic_auth(&credentials), "Basic dXNlcjpwYXNz");
    }

    #[test_context(PushTestContext)]
    #[test]
    fn test_prepare_request(ctx: &mut PushTestContext) {
        let jira = Jira::new("https://jira.example.com/", &TimeFormat::default()).unwrap();
        let requests = build_requests(ctx.store.records());

        let prepared = jira.prepare(&requests[1]).unwrap();

        assert_eq!(prepared.index, 1);
        assert_eq!(prepared.url, "https://jira.example.com/rest/api/2/issue/JIRA-2/worklog");
        assert_eq!(prepared.body.time_spent, "2h");
        assert_eq!(prepared.body.comment, "Design");
        assert!(prepared.body.started.starts_with("2020-04-17T08:20:00.000"));

        let body = serde_json::to_value(&prepared.body).unwrap();
        assert!(body.get("timeSpent").is_some());
        assert!(body.get("started").is_some());
    }

    #[tokio::test]
    async fn test_push_one_of_three_succeeds() {
        let (_temp_dir, mut store, server) = create_jira_context().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/JIRA-2/worklog"))
            .and(header("Authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "100028",
                "issueId": "10002",
                "timeSpent": "2h",
                "started": "2020-04-17T08:20:00.000+0000"
            })))
            .expect(1)
            .mount(&server)
            .await;
        for ticket in ["JIRA-1", "JIRA-3"] {
            Mock::given(method("POST"))
                .and(path(format!("/rest/api/2/issue/{}/worklog", ticket)))
                .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                    "errorMessages": ["Worklog must not be null."]
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let jira = Jira::new(&server.uri(), &TimeFormat::default()).unwrap();
        let requests = build_requests(store.records());
        let responses = jira.push_all(&requests, &Credentials::new("user", "pass")).await;
        assert_eq!(responses.len(), 3);

        let summary = merge(&responses, &mut store, requests.len());

        assert_eq!(summary.pushed, vec![1]);
        assert_eq!(summary.failed.len(), 2);
        assert_eq!(store.get(0).unwrap().id, "");
        assert_eq!(store.get(1).unwrap().id, "100028");
        assert_eq!(store.get(2).unwrap().id, "");
    }

    #[tokio::test]
    async fn test_push_with_bad_timestamp_still_sends_others() {
        let (_temp_dir, mut store, server) = create_jira_context().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "100040" })))
            .expect(2)
            .mount(&server)
            .await;

        let mut broken = store.get(0).unwrap().clone();
        broken.started_ts = "yesterday".to_string();
        store.update(broken).unwrap();

        let jira = Jira::new(&server.uri(), &TimeFormat::default()).unwrap();
        let requests = build_requests(store.records());
        let responses = jira.push_all(&requests, &Credentials::new("user", "pass")).await;

        let summary = merge(&responses, &mut store, requests.len());
        assert_eq!(summary.pushed.len(), 2);
        assert!(matches!(
            summary.failed.as_slice(),
            [JtlError::RemoteRequestFailed { index: 0, .. }]
        ));
        assert_eq!(store.get(0).unwrap().id, "");
    }

    #[tokio::test]
    async fn test_push_unreachable_server() {
        let (_temp_dir, mut store, _server) = create_jira_context().await;
        let jira = Jira::new("http://127.0.0.1:9", &TimeFormat::default()).unwrap();
        let requests = build_requests(store.records());

        let responses = jira.push_all(&requests, &Credentials::new("user", "pass")).await;

        assert_eq!(responses.len(), 3);
        assert!(responses.iter().all(|response| !response.success));
        let summary = merge(&responses, &mut store, requests.len());
        assert!(!summary.changed());
    }

    #[tokio::test]
    async fn test_cancelled_task_is_reported_for_its_row() {
        let (_temp_dir, mut store, _server) = create_jira_context().await;
        let mut tasks = JoinSet::new();
        let mut indices = HashMap::new();

        let done = tasks.spawn(async { PushResponse::pushed(0, "100028") });
        indices.insert(done.id(), 0);
        let stuck = tasks.spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            PushResponse::pushed(2, "100030")
        });
        indices.insert(stuck.id(), 2);
        stuck.abort();

        let responses = collect_responses(tasks, indices).await;
        assert_eq!(responses.len(), 2);

        let summary = merge(&responses, &mut store, 2);
        assert_eq!(summary.pushed, vec![0]);
        assert!(matches!(
            summary.failed.as_slice(),
            [JtlError::RemoteRequestFailed { index: 2, .. }]
        ));
        assert_eq!(store.get(2).unwrap().id, "");
    }
}
