use std::sync::atomic::Ordering;
use std::time::Duration;

use reqwest::Method;
use torrust_tracker_dashboard::core::api::Api;
use torrust_tracker_dashboard::core::transport::{Client, Options};

use super::Environment;

#[tokio::test]
async fn a_request_should_time_out_when_the_tracker_takes_too_long() {
    let env = Environment::start().await;
    *env.mock().stats_delay.lock().unwrap() = Some(Duration::from_secs(2));

    let client = Client::new(env.tracker.base_url(), Duration::from_millis(100)).unwrap();
    let mut diagnostics = client.diagnostics();

    let err = client.stats().await.unwrap_err();

    assert!(err.is_timeout());
    assert!(diagnostics.recv().await.unwrap().is_timeout());

    env.stop();
}

#[tokio::test]
async fn a_request_timeout_should_override_the_client_default() {
    let env = Environment::start().await;
    *env.mock().stats_delay.lock().unwrap() = Some(Duration::from_secs(2));

    let client = Client::new(env.tracker.base_url(), Duration::from_secs(30)).unwrap();

    let options = Options {
        timeout: Some(Duration::from_millis(100)),
    };

    let err = client
        .request(Method::GET, &["api", "tracker", "stats"], None, options)
        .await
        .unwrap_err();

    assert!(err.is_timeout());

    env.stop();
}

#[tokio::test]
async fn an_unsuccessful_response_should_carry_the_tracker_detail() {
    let env = Environment::start().await;
    env.mock().fail_stats.store(true, Ordering::SeqCst);

    let client = Client::new(env.tracker.base_url(), Duration::from_secs(5)).unwrap();
    let mut diagnostics = client.diagnostics();

    let err = client.stats().await.unwrap_err();

    assert_eq!(err.status().map(|status| status.as_u16()), Some(500));
    assert_eq!(err.detail(), Some("stats unavailable"));
    assert_eq!(diagnostics.recv().await.unwrap().detail(), Some("stats unavailable"));

    env.stop();
}

#[tokio::test]
async fn a_successful_request_should_not_publish_diagnostics() {
    let env = Environment::start().await;

    let client = Client::new(env.tracker.base_url(), Duration::from_secs(5)).unwrap();
    let mut diagnostics = client.diagnostics();

    client.torrents().await.unwrap();

    assert!(diagnostics.try_recv().is_err());

    env.stop();
}
