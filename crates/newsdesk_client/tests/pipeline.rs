mod common;

use std::time::Duration;

use common::{harness, wait_for_release};
use futures_util::future::join_all;
use newsdesk_client::{
    ApiFailure, ApiRequest, Backend, Notifier, PERMISSION_DENIED_MESSAGE,
    SESSION_EXPIRED_MESSAGE,
};
use newsdesk_core::{Credentials, NotificationKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn stored_tokens_are_attached_to_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header("authorization", "Bearer access-1"))
        .and(header("x-access-token", "access-1"))
        .and(header("x-refresh-token", "refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "categories": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.credentials
        .set(&Credentials::new("access-1").with_refresh_token("refresh-1"));

    let body = h
        .client
        .send(ApiRequest::get("categories"))
        .await
        .expect("request ok");
    assert_eq!(body, json!({ "categories": [] }));
}

#[tokio::test]
async fn no_auth_headers_without_a_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.credentials.set(&Credentials::new(""));
    h.client
        .send(ApiRequest::get("states").query("page", 1))
        .await
        .expect("unauthenticated request still goes out");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert!(headers.get("authorization").is_none());
    assert!(headers.get("x-access-token").is_none());
    assert!(headers.get("x-refresh-token").is_none());
}

#[tokio::test]
async fn query_parameters_reach_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "articles": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.client
        .send(ApiRequest::get("/articles").query("page", 2).query("limit", 25))
        .await
        .expect("request ok");
}

#[tokio::test]
async fn plain_text_permission_denied_triggers_notification() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    let err = h
        .client
        .send(ApiRequest::delete("articles/7"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiFailure::HttpStatus(403));
    assert_eq!(err.message, "Permission denied");
    assert_eq!(
        h.notifier.shown(),
        vec![(PERMISSION_DENIED_MESSAGE.to_string(), NotificationKind::Error)]
    );
    assert!(h.latch.is_held());

    h.notifier.dismiss_all();
    wait_for_release(&h.latch).await;
}

#[tokio::test]
async fn permission_marker_inside_a_successful_json_body_still_notifies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Permission denied for this resource" })),
        )
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    let body = h
        .client
        .send(ApiRequest::get("advertisements"))
        .await
        .expect("success is passed through unchanged");

    assert_eq!(body, json!({ "message": "Permission denied for this resource" }));
    assert_eq!(h.notifier.shown().len(), 1);
}

#[tokio::test]
async fn unrelated_message_does_not_notify() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Permission OK" })))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    h.client.send(ApiRequest::get("users")).await.expect("ok");

    assert!(h.notifier.shown().is_empty());
    assert!(!h.latch.is_held());
}

#[tokio::test]
async fn concurrent_denials_show_a_single_notification_until_dismissed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&server)
        .await;

    let h = harness(&server.uri());
    let results = join_all((0..4).map(|_| h.client.send(ApiRequest::get("epapers")))).await;
    assert!(results.iter().all(Result::is_err));
    assert_eq!(h.notifier.shown().len(), 1);

    h.notifier.dismiss_all();
    wait_for_release(&h.latch).await;

    let _ = h.client.send(ApiRequest::get("epapers")).await;
    assert_eq!(h.notifier.shown().len(), 2);
}

#[tokio::test]
async fn concurrent_unauthorized_responses_expire_the_session_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "jwt expired" })),
        )
        .mount(&server)
        .await;

    let mut h = harness(&server.uri());
    h.credentials
        .set(&Credentials::new("stale").with_refresh_token("stale-refresh"));

    let results = join_all((0..5).map(|_| h.client.send(ApiRequest::get("cities")))).await;
    for result in &results {
        let err = result.as_ref().unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.message, "jwt expired");
    }

    assert_eq!(h.credentials.get(), Credentials::default());
    assert_eq!(
        h.notifier.shown(),
        vec![(SESSION_EXPIRED_MESSAGE.to_string(), NotificationKind::Error)]
    );
    // Navigation waits for the user to acknowledge the message.
    assert!(h.navigations.try_recv().is_err());

    h.notifier.dismiss_all();
    tokio::time::timeout(Duration::from_secs(1), h.navigations.recv())
        .await
        .expect("navigated in time")
        .expect("navigator alive");
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(h.navigations.try_recv().is_err());
    assert!(!h.latch.is_held());
}

#[tokio::test]
async fn unauthorized_behind_a_permission_notice_still_redirects_after_it_closes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/advertisements"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cities"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut h = harness(&server.uri());
    h.credentials.set(&Credentials::new("token"));

    let _ = h.client.send(ApiRequest::get("advertisements")).await;
    let err = h.client.send(ApiRequest::get("cities")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!h.credentials.get().is_signed_in());

    // The permission notice keeps the screen; no second modal stacks on it.
    assert_eq!(
        h.notifier.shown(),
        vec![(PERMISSION_DENIED_MESSAGE.to_string(), NotificationKind::Error)]
    );
    assert!(h.navigations.try_recv().is_err());

    h.notifier.dismiss_all();
    tokio::time::timeout(Duration::from_secs(1), h.navigations.recv())
        .await
        .expect("navigated in time")
        .expect("navigator alive");
    wait_for_release(&h.latch).await;
    assert!(h.navigations.try_recv().is_err());
}

#[tokio::test]
async fn permission_notice_alone_does_not_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&server)
        .await;

    let mut h = harness(&server.uri());
    let _ = h.client.send(ApiRequest::get("advertisements")).await;

    h.notifier.dismiss_all();
    wait_for_release(&h.latch).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(h.navigations.try_recv().is_err());
}

#[tokio::test]
async fn session_notice_closed_by_hide_still_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut h = harness(&server.uri());
    h.credentials.set(&Credentials::new("token"));
    let _ = h.client.send(ApiRequest::get("states")).await;
    assert!(h.navigations.try_recv().is_err());

    h.notifier.hide();
    tokio::time::timeout(Duration::from_secs(1), h.navigations.recv())
        .await
        .expect("navigated in time")
        .expect("navigator alive");
    wait_for_release(&h.latch).await;
}

#[tokio::test]
async fn unauthorized_with_denied_body_shows_only_the_session_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Permission denied"))
        .mount(&server)
        .await;

    let mut h = harness(&server.uri());
    h.credentials.set(&Credentials::new("token"));

    let err = h
        .client
        .send(ApiRequest::post("categories", json!({ "name": "x" }).into()))
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(401));
    assert!(!h.credentials.get().is_signed_in());
    assert_eq!(
        h.notifier.shown(),
        vec![(SESSION_EXPIRED_MESSAGE.to_string(), NotificationKind::Error)]
    );

    h.notifier.dismiss_all();
    tokio::time::timeout(Duration::from_secs(1), h.navigations.recv())
        .await
        .expect("navigated in time");
}

#[tokio::test]
async fn validation_errors_pass_through_without_side_effects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Title is required" })),
        )
        .mount(&server)
        .await;

    let mut h = harness(&server.uri());
    h.credentials.set(&Credentials::new("token"));

    let err = h
        .client
        .send(ApiRequest::post("articles", json!({}).into()))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiFailure::HttpStatus(422));
    assert_eq!(err.message, "Title is required");
    assert!(h.credentials.get().is_signed_in());
    assert!(h.notifier.shown().is_empty());
    assert!(h.navigations.try_recv().is_err());
}

#[tokio::test]
async fn transport_failure_is_reported_as_network_error() {
    // Nothing listens on this port once the listener is dropped.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        format!("http://{}", listener.local_addr().expect("addr"))
    };

    let h = harness(&uri);
    let err = h
        .client
        .send(ApiRequest::get("categories"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiFailure::Network);
    assert_eq!(err.status, None);
    assert!(h.notifier.shown().is_empty());
}
