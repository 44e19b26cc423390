use super::*;
use crate::auth::Token;
use crate::error::{FetchError, GateError};
use crate::workflow::WorkflowRef;
use base64::{engine::general_purpose, Engine as _};
use mockito::Matcher;

const CONTENTS_PATH: &str = "/repos/octo/hello/contents/.github/workflows/ci.yaml";

fn workflow_ref() -> WorkflowRef {
    WorkflowRef::parse(
        "octo/hello/.github/workflows/ci.yaml@refs/pull/7/merge",
        "deadbeef",
    )
}

/// Base64 the way the contents API does it: wrapped at 60 columns.
fn api_encode(yaml: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(yaml);
    encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn file_body(yaml: &str) -> String {
    serde_json::json!({
        "type": "file",
        "encoding": "base64",
        "path": ".github/workflows/ci.yaml",
        "content": api_encode(yaml),
    })
    .to_string()
}

#[tokio::test]
async fn test_fetch_workflow_decodes_file() {
    let mut server = mockito::Server::new_async().await;
    let yaml = "name: ci\non: pull_request\njobs:\n  test:\n    runs-on: ubuntu-latest\n    steps:\n      - run: cargo test --workspace --all-features --locked\n  status-check:\n    needs: [test]\n";
    let mock = server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::UrlEncoded("ref".into(), "deadbeef".into()))
        .match_header("authorization", "Bearer ghp_test")
        .match_header("accept", "application/vnd.github+json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(file_body(yaml))
        .create_async()
        .await;

    let provider = GitHubProvider::new(&server.url(), Some(Token::from("ghp_test"))).unwrap();
    let workflow = provider.fetch_workflow(&workflow_ref()).await.unwrap();

    mock.assert_async().await;
    let names: Vec<&str> = workflow.jobs.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["test", "status-check"]);
}

#[tokio::test]
async fn test_fetch_workflow_directory_is_not_a_file() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"type": "file", "name": "a.yaml"}]"#)
        .create_async()
        .await;

    let provider = GitHubProvider::new(&server.url(), None).unwrap();
    let err = provider.fetch_workflow(&workflow_ref()).await.unwrap_err();

    match err {
        GateError::Fetch(FetchError::NotAFile { status, body }) => {
            assert_eq!(status, 200);
            assert!(body.contains("a.yaml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_fetch_workflow_non_json_body_is_not_a_file() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>proxy login</html>")
        .create_async()
        .await;

    let provider = GitHubProvider::new(&server.url(), None).unwrap();
    let err = provider.fetch_workflow(&workflow_ref()).await.unwrap_err();

    match &err {
        GateError::Fetch(FetchError::NotAFile { status, body }) => {
            assert_eq!(*status, 200);
            assert_eq!(body, "<html>proxy login</html>");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().starts_with("workflow file is not a file: (200) "));
}

#[tokio::test]
async fn test_fetch_workflow_not_found() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .expect(1)
        .create_async()
        .await;

    let provider = GitHubProvider::new(&server.url(), None).unwrap();
    let err = provider.fetch_workflow(&workflow_ref()).await.unwrap_err();

    mock.assert_async().await;
    assert!(matches!(
        err,
        GateError::Fetch(FetchError::Api { status: 404, .. })
    ));
    assert!(err.to_string().contains("Not Found"));
}

#[tokio::test]
async fn test_fetch_workflow_empty_content() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", CONTENTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"type": "file", "content": ""}"#)
        .create_async()
        .await;

    let provider = GitHubProvider::new(&server.url(), None).unwrap();
    let err = provider.fetch_workflow(&workflow_ref()).await.unwrap_err();

    assert!(matches!(err, GateError::EmptyWorkflow));
}
