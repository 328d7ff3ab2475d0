mod support;

use pr_hygiene::{
    report_check, AggregateError, CheckStatus, Credential, GitHubConnector, GitHubHost, HostError,
    HygieneConfig, LimitCheck, ReportError, RetryPolicy, RunOutcome, Runner, RunnerError, ScmHost,
    StatusTarget, FILES_CHANGED_CONTEXT, GITHUB_JSON_MEDIA_TYPE,
};
use serde_json::json;
use support::{files_body, pr_env, StaticCredentials, BUILD_URL, COMMIT_SHA};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FILES_PATH: &str = "/repos/acme/widgets/pulls/7/files";
const STATUS_PATH: &str = "/repos/acme/widgets/statuses/abc123";

fn connect(server: &MockServer) -> GitHubHost {
    let credential = Credential::new("github-credentials", "test-token");
    GitHubHost::connect(Url::parse(&server.uri()).unwrap(), &credential).unwrap()
}

fn target() -> StatusTarget {
    StatusTarget {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        sha: COMMIT_SHA.to_string(),
    }
}

#[tokio::test]
async fn fetches_files_with_json_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .and(header("accept", GITHUB_JSON_MEDIA_TYPE))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(files_body(&["src/a.rs", "yarn.lock"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = connect(&server)
        .fetch_pull_request_files("acme", "widgets", 7)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.url, format!("{}{FILES_PATH}", server.uri()));
    assert!(response.body.contains("src/a.rs"));
}

#[tokio::test]
async fn server_error_on_fetch_is_requested_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let response = connect(&server)
        .fetch_pull_request_files("acme", "widgets", 7)
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert!(!response.is_success());
}

#[tokio::test]
async fn resolves_head_sha_from_pull_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 7,
            "head": { "ref": "feature", "sha": "def456" },
            "base": { "ref": "main", "sha": "0a1b2c" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sha = connect(&server).head_sha("acme", "widgets", 7).await.unwrap();

    assert_eq!(sha, "def456");
}

#[tokio::test]
async fn head_sha_reports_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/pulls/7"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = connect(&server)
        .head_sha("acme", "widgets", 7)
        .await
        .unwrap_err();

    assert!(matches!(err, HostError::UnexpectedStatus { status: 404, .. }));
}

#[tokio::test]
async fn publishes_status_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STATUS_PATH))
        .and(body_partial_json(json!({
            "state": "failure",
            "context": FILES_CHANGED_CONTEXT,
            "description": "11 files changed (limit 10)",
            "target_url": BUILD_URL
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let result = LimitCheck::files_changed(11, 10).into_result(Some(BUILD_URL.to_string()));
    connect(&server)
        .publish_status(&target(), &result)
        .await
        .unwrap();
}

#[tokio::test]
async fn failing_status_endpoint_sees_one_request_per_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STATUS_PATH))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let host = connect(&server);
    let err = report_check(
        &host,
        &target(),
        LimitCheck::files_changed(1, 10),
        None,
        &RetryPolicy::default(),
    )
    .await
    .unwrap_err();

    let ReportError::PublishFailed { attempts, url, .. } = &err;
    assert_eq!(*attempts, 3);
    assert_eq!(url, &format!("{}{STATUS_PATH}", server.uri()));
}

#[tokio::test]
async fn full_run_against_github_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .and(header("accept", GITHUB_JSON_MEDIA_TYPE))
        .respond_with(ResponseTemplate::new(200).set_body_string(files_body(&[
            "src/a.ts",
            "yarn.lock",
            "src/b.ts",
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(STATUS_PATH))
        .and(body_partial_json(json!({ "state": "success" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let connector = GitHubConnector::new(Url::parse(&server.uri()).unwrap());
    let runner = Runner::new(HygieneConfig::default(), connector, StaticCredentials::default());

    let outcome = runner.run(&pr_env("PR-7")).await;

    assert_eq!(outcome.label(), "completed");
    assert!(outcome
        .checks()
        .iter()
        .all(|check| check.status == CheckStatus::Success));
}

#[tokio::test]
async fn full_run_aborts_on_single_failed_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let connector = GitHubConnector::new(Url::parse(&server.uri()).unwrap());
    let runner = Runner::new(HygieneConfig::default(), connector, StaticCredentials::default());

    let outcome = runner.run(&pr_env("PR-7")).await;

    assert!(matches!(
        outcome,
        RunOutcome::Aborted(RunnerError::Aggregate(AggregateError::ApiUnavailable {
            status: Some(500),
            ..
        }))
    ));
}
