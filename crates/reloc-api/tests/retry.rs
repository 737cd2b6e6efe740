//! Retry-queue behavior around the connectivity-restored flush.

use std::time::Duration;

use reloc_api::RetryQueue;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn queue(max_retries: u32) -> RetryQueue {
    RetryQueue::new(
        reqwest::Client::new(),
        max_retries,
        Duration::from_secs(300),
    )
}

#[tokio::test]
async fn flush_retries_each_queued_url_exactly_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vendors"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hospitals"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let retry = queue(3);
    retry.queue(format!("{}/vendors", server.uri()));
    retry.queue(format!("{}/hospitals", server.uri()));
    assert_eq!(retry.len(), 2);

    let report = retry.flush().await;
    assert_eq!(report.retried, 2);
    assert_eq!(report.recovered, 2);
    assert_eq!(report.dropped, 0);
    assert!(report.exhausted.is_empty());
    assert!(retry.is_empty());
}

#[tokio::test]
async fn entries_older_than_the_staleness_window_are_dropped_without_a_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let retry = queue(3);
    retry.queue_with_age(
        format!("{}/vendors", server.uri()),
        Duration::from_secs(301),
    );

    let report = retry.flush().await;
    assert_eq!(report.dropped, 1);
    assert_eq!(report.retried, 0);
    assert!(retry.is_empty());
}

#[tokio::test]
async fn a_fresh_entry_is_retried_and_a_stale_one_is_not() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let retry = queue(3);
    retry.queue(format!("{}/fresh", server.uri()));
    retry.queue_with_age(format!("{}/stale", server.uri()), Duration::from_secs(600));

    let report = retry.flush().await;
    assert_eq!(report.retried, 1);
    assert_eq!(report.recovered, 1);
    assert_eq!(report.dropped, 1);
}

#[tokio::test]
async fn an_http_error_status_still_counts_as_delivered() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/erroring"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let retry = queue(3);
    retry.queue(format!("{}/erroring", server.uri()));

    let report = retry.flush().await;
    assert_eq!(report.recovered, 1, "a 500 reached the backend");
    assert!(retry.is_empty());
}

#[tokio::test]
async fn unreachable_urls_requeue_until_attempts_exhaust() {
    let retry = queue(2);
    let dead_url = "http://127.0.0.1:9/unreachable";
    retry.queue(dead_url);

    let first = retry.flush().await;
    assert_eq!(first.retried, 1);
    assert_eq!(first.recovered, 0);
    assert!(first.exhausted.is_empty());
    assert_eq!(retry.len(), 1, "failed entry re-queues");

    let second = retry.flush().await;
    assert_eq!(second.exhausted, vec![dead_url.to_owned()]);
    assert!(retry.is_empty());

    // Exhausted URLs are not re-admitted.
    retry.queue(dead_url);
    assert!(retry.is_empty());
}
