//! Request pipeline tests against a mock HTTP server
//!
//! Covers header assembly, body signing, query formatting, and the
//! success/error decode paths.

mod common;

use common::{mock_client, public_client, setup_mock_server, MOCK_KEY, MOCK_PASSPHRASE, MOCK_SECRET, TIME_RESPONSE};
use gdax_rest::types::ServerTime;
use gdax_rest::{Credentials, RestError};
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn time_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(TIME_RESPONSE, "application/json")
}

#[tokio::test]
async fn test_get_decodes_success_body() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(time_response())
        .mount(&server)
        .await;

    let time: ServerTime = mock_client(&server).get_time().await.unwrap();
    assert_eq!(time.epoch, 1420674445.201);
    assert_eq!(time.iso.timestamp(), 1420674445);
}

#[tokio::test]
async fn test_get_sends_auth_headers() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(header("CB-ACCESS-KEY", MOCK_KEY))
        .and(header("CB-ACCESS-PASSPHRASE", MOCK_PASSPHRASE))
        .and(header_exists("CB-ACCESS-SIGN"))
        .and(header_exists("CB-ACCESS-TIMESTAMP"))
        .and(header_exists("User-Agent"))
        .respond_with(time_response())
        .expect(1)
        .mount(&server)
        .await;

    mock_client(&server).get_time().await.unwrap();
}

#[tokio::test]
async fn test_public_client_omits_auth_headers() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(time_response())
        .mount(&server)
        .await;

    public_client(&server).get_time().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert!(headers.contains_key("CB-ACCESS-TIMESTAMP"));
    assert!(!headers.contains_key("CB-ACCESS-KEY"));
    assert!(!headers.contains_key("CB-ACCESS-PASSPHRASE"));
    assert!(!headers.contains_key("CB-ACCESS-SIGN"));
}

#[tokio::test]
async fn test_signature_covers_sent_timestamp_and_path() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(time_response())
        .mount(&server)
        .await;

    mock_client(&server)
        .get::<ServerTime>("/time", &[("test", "value")])
        .await
        .unwrap();

    // Recompute the signature from what was actually sent; they must agree.
    let requests = server.received_requests().await.unwrap();
    let sent = &requests[0];
    let timestamp = sent.headers["CB-ACCESS-TIMESTAMP"].to_str().unwrap();
    let signature = sent.headers["CB-ACCESS-SIGN"].to_str().unwrap();

    let credentials = Credentials::new(MOCK_KEY, MOCK_PASSPHRASE, MOCK_SECRET);
    let expected = credentials
        .sign(timestamp, "GET", "/time?test=value", "")
        .unwrap()
        .unwrap();
    assert_eq!(signature, expected);
}

#[tokio::test]
async fn test_post_sends_signed_body_bytes() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/time"))
        .and(body_string(r#"{"key":"value"}"#))
        .and(header_exists("CB-ACCESS-SIGN"))
        .respond_with(time_response())
        .expect(1)
        .mount(&server)
        .await;

    let body = serde_json::json!({"key": "value"});
    let time: ServerTime = mock_client(&server).post("/time", &body).await.unwrap();
    assert_eq!(time.epoch, 1420674445.201);
}

#[tokio::test]
async fn test_delete_roundtrip() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/time"))
        .respond_with(time_response())
        .expect(1)
        .mount(&server)
        .await;

    let time: ServerTime = mock_client(&server)
        .delete("/time", None::<&serde_json::Value>)
        .await
        .unwrap();
    assert_eq!(time.iso.timestamp(), 1420674445);
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .and(query_param("test", "value"))
        .respond_with(time_response())
        .expect(1)
        .mount(&server)
        .await;

    public_client(&server)
        .get::<ServerTime>("/time", &[("test", "value")])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_api_error_is_the_message_text() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_raw(r#"{ "message": "Invalid Price" }"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = mock_client(&server).get_time().await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid Price");
    match err {
        RestError::Api { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "Invalid Price");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_error_body_is_decode_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = public_client(&server).get_time().await.unwrap_err();
    assert!(matches!(err, RestError::Decode(_)));
}

#[tokio::test]
async fn test_success_status_with_wrong_shape_is_decode_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[1, 2, 3]", "application/json"))
        .mount(&server)
        .await;

    let err = public_client(&server).get_time().await.unwrap_err();
    assert!(matches!(err, RestError::Decode(_)));
}

#[tokio::test]
async fn test_non_200_never_decodes_the_success_shape() {
    // A 201 carrying a perfectly valid success body still routes to the
    // error path.
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/time"))
        .respond_with(ResponseTemplate::new(201).set_body_raw(TIME_RESPONSE, "application/json"))
        .mount(&server)
        .await;

    let result = public_client(&server).get_time().await;
    assert!(matches!(result, Err(RestError::Decode(_))));
}

#[tokio::test]
async fn test_transport_error_when_server_unreachable() {
    let server = setup_mock_server().await;
    let client = public_client(&server);
    drop(server);

    let err = client.get_time().await.unwrap_err();
    assert!(matches!(err, RestError::Transport(_)));
}

#[tokio::test]
async fn test_invalid_secret_fails_before_sending() {
    let server = setup_mock_server().await;
    let client = gdax_rest::GdaxRestClient::with_config(
        gdax_rest::ClientConfig::new(Credentials::new("key", "pass", "%%%not-base64%%%"))
            .with_base_url(server.uri()),
    );

    let err = client.get_time().await.unwrap_err();
    assert!(matches!(err, RestError::InvalidCredential(_)));
    // Nothing reached the wire.
    assert!(server.received_requests().await.unwrap().is_empty());
}
