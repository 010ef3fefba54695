// crates/secret-gate-github/tests/client_unit.rs
// ============================================================================
// Module: GitHub Client Unit Tests
// Description: Loopback-server tests for the three gate API calls.
// Purpose: Pin request shapes, limits, and fail-closed error behavior.
// ============================================================================

//! ## Overview
//! Each test runs a loopback `tiny_http` server and drives one client call
//! against it: alert listing, raw file fetch, and comment posting, plus the
//! non-success, oversized-body, and cleartext-scheme failure paths.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Read;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use secret_gate_github::ApiError;
use secret_gate_github::GithubClient;
use secret_gate_github::GithubClientConfig;
use time::macros::datetime;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

/// Captured view of the single request a test server received.
struct ReceivedRequest {
    /// Request method as an uppercase string.
    method: String,
    /// Request path including the query string.
    url: String,
    /// Headers as lowercase `name: value` pairs.
    headers: Vec<(String, String)>,
    /// Raw request body bytes.
    body: Vec<u8>,
}

impl ReceivedRequest {
    /// Returns the first header value for a lowercase header name.
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Serves exactly one request with the given response, capturing the request.
fn one_shot_server(
    response: Response<std::io::Cursor<Vec<u8>>>,
) -> (Url, thread::JoinHandle<ReceivedRequest>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base = Url::parse(&format!("http://{addr}")).unwrap();
    let handle = thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let method = request.method().to_string();
        let url = request.url().to_string();
        let headers = request
            .headers()
            .iter()
            .map(|header| (header.field.to_string().to_ascii_lowercase(), header.value.to_string()))
            .collect();
        let mut body = Vec::new();
        request.as_reader().read_to_end(&mut body).unwrap();
        request.respond(response).unwrap();
        ReceivedRequest {
            method,
            url,
            headers,
            body,
        }
    });
    (base, handle)
}

/// Builds a loopback client with a short timeout.
fn loopback_client(base: Url) -> GithubClient {
    let config = GithubClientConfig {
        allow_http: true,
        timeout_ms: 5_000,
        ..GithubClientConfig::new(base, "test-token".to_string())
    };
    GithubClient::new(config).unwrap()
}

#[test]
fn fetch_alerts_parses_upstream_order() {
    let payload = r#"[
        {"id": 2, "secret": "s2", "severity": "low", "created_at": "2026-01-02T00:00:00Z", "state": "open"},
        {"id": 1, "secret": "s1", "severity": "high", "created_at": "2026-01-01T00:00:00Z", "state": "open"}
    ]"#;
    let (base, handle) = one_shot_server(Response::from_string(payload));
    let client = loopback_client(base);

    let alerts = client.fetch_alerts("octo/widgets").unwrap();
    let request = handle.join().unwrap();

    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "/repos/octo/widgets/secret-scanning/alerts");
    assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    assert_eq!(request.header("accept"), Some("application/vnd.github+json"));
    // Upstream order is preserved: no re-ordering by id or severity.
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].id, 2);
    assert_eq!(alerts[0].secret, "s2");
    assert_eq!(alerts[1].created_at, datetime!(2026-01-01 00:00:00 UTC));
}

#[test]
fn fetch_alerts_fails_on_non_success_status() {
    let (base, handle) =
        one_shot_server(Response::from_string("server error").with_status_code(500));
    let client = loopback_client(base);

    let err = client.fetch_alerts("octo/widgets").unwrap_err();
    handle.join().unwrap();

    match err {
        ApiError::Status {
            status, ..
        } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn fetch_alerts_rejects_malformed_payload() {
    let (base, handle) = one_shot_server(Response::from_string(r#"{"not": "an array"}"#));
    let client = loopback_client(base);

    let err = client.fetch_alerts("octo/widgets").unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[test]
fn fetch_raw_file_returns_document_text() {
    let text = "high: 1\nmedium: 3\nlow: 7\n";
    let (base, handle) = one_shot_server(Response::from_string(text));
    let client = loopback_client(base);

    let fetched = client.fetch_raw_file("octo/policies", "configs/scanning.yaml").unwrap();
    let request = handle.join().unwrap();

    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "/repos/octo/policies/contents/configs/scanning.yaml");
    assert_eq!(request.header("accept"), Some("application/vnd.github.raw+json"));
    assert_eq!(fetched, text);
}

#[test]
fn post_pr_comment_sends_json_body() {
    let (base, handle) = one_shot_server(Response::from_string("{}").with_status_code(201));
    let client = loopback_client(base);

    client.post_pr_comment("octo/widgets", 42, "## Secret Scanning Alerts\n").unwrap();
    let request = handle.join().unwrap();

    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "/repos/octo/widgets/issues/42/comments");
    let payload: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(payload["body"], "## Secret Scanning Alerts\n");
}

#[test]
fn oversized_response_fails_closed() {
    let big = "x".repeat(2_048);
    let (base, handle) = one_shot_server(Response::from_string(big));
    let config = GithubClientConfig {
        allow_http: true,
        max_response_bytes: 1_024,
        ..GithubClientConfig::new(base, "test-token".to_string())
    };
    let client = GithubClient::new(config).unwrap();

    let err = client.fetch_raw_file("octo/policies", "scanning.yaml").unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, ApiError::ResponseTooLarge { .. }));
}

#[test]
fn withheld_response_times_out_instead_of_hanging() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            // Hold the connection open well past the client timeout.
            thread::sleep(Duration::from_millis(1_000));
        }
    });

    let base = Url::parse(&format!("http://{addr}")).unwrap();
    let config = GithubClientConfig {
        allow_http: true,
        timeout_ms: 200,
        ..GithubClientConfig::new(base, "test-token".to_string())
    };
    let client = GithubClient::new(config).unwrap();

    let err = client.fetch_alerts("octo/widgets").unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, ApiError::Request { .. }));
}

#[test]
fn cleartext_base_is_blocked_by_default() {
    let base = Url::parse("http://127.0.0.1:1/").unwrap();
    let config = GithubClientConfig::new(base, "test-token".to_string());
    let err = GithubClient::new(config).unwrap_err();
    assert!(matches!(err, ApiError::CleartextBlocked(_)));
}
