//! Request layer call-shape tests against a mock endpoint.

use mega_client::api::ApiClient;
use serde_json::json;
use wiremock::matchers::{body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn call_shape_without_extra_params() {
    let server = MockServer::start().await;
    let mut api = ApiClient::with_base_url(&server.uri());
    api.set_sid("test_sid".to_string());
    let seq = api.sequence_num();

    Mock::given(method("POST"))
        .and(path("/cs"))
        .and(query_param("id", seq.to_string()))
        .and(query_param("sid", "test_sid"))
        .and(body_string("[]"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{}, ""]"#))
        .expect(1)
        .mount(&server)
        .await;

    let resp = api.request_batch(&[]).await.unwrap();
    assert_eq!(resp, json!({}));
    assert_eq!(api.sequence_num(), seq.wrapping_add(1));
}

#[tokio::test]
async fn call_shape_with_extra_params() {
    let server = MockServer::start().await;
    let mut api = ApiClient::with_base_url(&server.uri());
    api.set_sid("test_sid".to_string());
    let seq = api.sequence_num();

    Mock::given(method("POST"))
        .and(path("/cs"))
        .and(query_param("id", seq.to_string()))
        .and(query_param("sid", "test_sid"))
        .and(query_param("foo", "bar"))
        .and(body_string("[]"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{}, ""]"#))
        .expect(1)
        .mount(&server)
        .await;

    let resp = api
        .request_with_params(&[], &[("foo", "bar")])
        .await
        .unwrap();
    assert_eq!(resp, json!({}));
}

#[tokio::test]
async fn sid_omitted_when_unauthenticated() {
    let server = MockServer::start().await;
    let mut api = ApiClient::with_base_url(&server.uri());
    let seq = api.sequence_num();

    Mock::given(method("POST"))
        .and(path("/cs"))
        .and(query_param("id", seq.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{}, ""]"#))
        .expect(1)
        .mount(&server)
        .await;

    api.request_batch(&[]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].url.query_pairs().any(|(k, _)| k == "sid"));
}

#[tokio::test]
async fn bare_error_code_surfaces_with_registry_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("-9"))
        .mount(&server)
        .await;

    let mut api = ApiClient::with_base_url(&server.uri());
    let err = api.request(json!({"a": "us"})).await.unwrap_err();
    assert_eq!(err.to_string(), "Logging error");
    assert_eq!(err.code(), Some(-9));
}

#[tokio::test]
async fn array_error_code_surfaces() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[-1]"))
        .mount(&server)
        .await;

    let mut api = ApiClient::with_base_url(&server.uri());
    let err = api.request(json!({"a": "ug"})).await.unwrap_err();
    assert_eq!(err.to_string(), "Internal error");
    assert_eq!(err.code(), Some(-1));
}

#[tokio::test]
async fn http_failure_maps_to_request_error_without_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut api = ApiClient::with_base_url(&server.uri());
    let err = api.request(json!({"a": "ug"})).await.unwrap_err();
    assert_eq!(err.code(), None);
    assert!(err.to_string().contains("HTTP error"));
}

#[tokio::test]
async fn malformed_body_maps_to_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let mut api = ApiClient::with_base_url(&server.uri());
    let err = api.request(json!({"a": "ug"})).await.unwrap_err();
    assert_eq!(err.code(), None);
}

#[tokio::test]
async fn sequence_increments_once_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"[{}, ""]"#))
        .mount(&server)
        .await;

    let mut api = ApiClient::with_base_url(&server.uri());
    let seq = api.sequence_num();
    api.request_batch(&[]).await.unwrap();
    api.request_batch(&[]).await.unwrap();
    assert_eq!(api.sequence_num(), seq.wrapping_add(2));

    let requests = server.received_requests().await.unwrap();
    let ids: Vec<String> = requests
        .iter()
        .map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "id")
                .map(|(_, v)| v.into_owned())
                .unwrap()
        })
        .collect();
    assert_eq!(ids, vec![seq.to_string(), seq.wrapping_add(1).to_string()]);
}
