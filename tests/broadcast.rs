//! Broadcasting against a mock gateway.

use serde_json::{json, Value};
use steemconnect::error::TokenError;
use steemconnect::operations::{Comment, CustomJson, Follow, Vote};
use steemconnect::{Client, Error, Token};

mod common;

use common::MockResponse;

const TRANSACTION: &str = include_str!("fixtures/transaction.json");

fn vote() -> Vote {
    let mut vote = Vote::new();
    vote.voter("alice").on("bob", "a-post-about-rust").up_vote(1);
    vote
}

#[tokio::test]
async fn test_broadcast_returns_transaction() {
    let (addr, mut requests) = common::start_mock_backend(MockResponse::json(200, TRANSACTION)).await;
    let client = Client::new(common::config_for(addr)).with_token(Token::new("abc"));

    let vote = vote();
    let mut follow = Follow::new();
    follow.follower("alice").follow("bob");

    let response = client.broadcast(&[&vote, &follow]).await.unwrap();
    assert_eq!(response.http().status_code(), 200);

    let transaction = response.transaction().unwrap().unwrap();
    assert_eq!(transaction.id(), Some("4f3a6d4e2b1c0a9f8e7d6c5b4a3928170f1e2d3c"));
    assert_eq!(transaction.operations().len(), 4);
    assert!(transaction.operations()[0].as_any().is::<Vote>());
    assert!(transaction.operations()[1].as_any().is::<Comment>());
    assert!(transaction.operations()[2].as_any().is::<CustomJson>());
    assert!(transaction.operations()[3].as_any().is::<CustomJson>());

    let request = requests.recv().await.unwrap();
    assert_eq!(request.request_line(), "POST /api/broadcast HTTP/1.1");
    assert_eq!(request.header("authorization").as_deref(), Some("Bearer abc"));
    assert_eq!(request.header("accept").as_deref(), Some("application/json"));
    assert_eq!(request.header("content-type").as_deref(), Some("application/json"));

    let payload: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(
        payload,
        json!({
            "operations": [
                ["vote", { "voter": "alice", "author": "bob", "permlink": "a-post-about-rust", "weight": 10000 }],
                ["custom_json", {
                    "required_auths": [],
                    "required_posting_auths": ["alice"],
                    "json": "[\"follow\",{\"follower\":\"alice\",\"following\":\"bob\",\"what\":[\"blog\"]}]",
                    "id": "follow"
                }]
            ]
        })
    );
}

#[tokio::test]
async fn test_json_error_response() {
    let body = r#"{"error":"YOUR ARE NOT AUTHORIZED","error_description":"Unauthorized"}"#;
    let (addr, _requests) = common::start_mock_backend(MockResponse::json(401, body)).await;
    let client = Client::new(common::config_for(addr)).with_token(Token::new("expired"));

    let err = client.broadcast(&[&vote()]).await.unwrap_err();
    let Error::Response(error) = err else {
        panic!("expected a response error, got {err:?}");
    };
    assert_eq!(error.status, 401);
    assert_eq!(error.message, "YOUR ARE NOT AUTHORIZED: Unauthorized");
    assert_eq!(error.response.reason(), "Unauthorized");
}

#[tokio::test]
async fn test_text_error_response_keeps_body() {
    let body = "<html><body>Bad Gateway</body></html>";
    let (addr, _requests) = common::start_mock_backend(MockResponse::html(502, body)).await;
    let client = Client::new(common::config_for(addr)).with_token(Token::new("abc"));

    let err = client.broadcast(&[&vote()]).await.unwrap_err();
    let Error::Response(error) = err else {
        panic!("expected a response error, got {err:?}");
    };
    assert_eq!(error.status, 502);
    assert_eq!(error.message, body);
}

#[tokio::test]
async fn test_non_json_success_has_no_transaction() {
    let (addr, _requests) = common::start_mock_backend(MockResponse::html(200, "accepted")).await;
    let client = Client::new(common::config_for(addr)).with_token(Token::new("abc"));

    let response = client.broadcast(&[&vote()]).await.unwrap();
    assert!(response.transaction().unwrap().is_none());
}

#[tokio::test]
async fn test_transport_failure_is_client_error() {
    let addr = common::unused_addr().await;
    let client = Client::new(common::config_for(addr)).with_token(Token::new("abc"));

    let err = client.broadcast(&[&vote()]).await.unwrap_err();
    match err {
        Error::Client { source, .. } => assert!(source.is_some()),
        other => panic!("expected a client error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let (addr, mut requests) = common::start_mock_backend(MockResponse::json(200, TRANSACTION)).await;
    let client = Client::new(common::config_for(addr));

    let err = client.broadcast(&[&vote()]).await.unwrap_err();
    assert!(matches!(err, Error::Token(TokenError::Missing)));
    assert!(requests.try_recv().is_err());
}
