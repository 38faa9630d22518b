//! E2E tests for the feed endpoints without X API credentials

mod common;

use chrono::{DateTime, Utc};
use common::TestServer;
use serde_json::Value;

fn created_at(post: &Value) -> DateTime<Utc> {
    post["created_at"]
        .as_str()
        .unwrap()
        .parse::<DateTime<Utc>>()
        .unwrap()
}

#[tokio::test]
async fn test_all_posts_cover_every_account_sorted() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(&server.url("/tweets"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    let posts = json.as_array().unwrap();

    for account in xfeed::config::DEFAULT_ACCOUNTS {
        let count = posts.iter().filter(|p| p["account"] == account).count();
        assert!((3..=5).contains(&count), "{account} had {count} posts");
    }

    let times: Vec<_> = posts.iter().map(created_at).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_every_post_has_metrics_and_media_list() {
    let server = TestServer::new().await;

    let json: Value = server
        .client
        .get(&server.url("/tweets"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    for post in json.as_array().unwrap() {
        for key in ["like_count", "retweet_count", "reply_count"] {
            assert!(post["metrics"][key].is_u64(), "missing {key} in {post}");
        }
        assert!(post["media_urls"].is_array());
        assert!(post["id"].is_string());
        assert!(post["text"].is_string());
    }
}

#[tokio::test]
async fn test_reads_within_window_are_identical() {
    let server = TestServer::new().await;

    let first = server
        .client
        .get(&server.url("/tweets"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let fetched_at = server.state.aggregator.fetched_at().await;

    let second = server
        .client
        .get(&server.url("/tweets"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(server.state.aggregator.fetched_at().await, fetched_at);
}

#[tokio::test]
async fn test_invalidated_cache_rebuilds_sorted_feed() {
    let server = TestServer::new().await;

    server
        .client
        .get(&server.url("/tweets"))
        .send()
        .await
        .unwrap();
    let first_fetched_at = server.state.aggregator.fetched_at().await.unwrap();

    server.state.aggregator.invalidate().await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let json: Value = server
        .client
        .get(&server.url("/tweets"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let second_fetched_at = server.state.aggregator.fetched_at().await.unwrap();
    assert!(second_fetched_at > first_fetched_at);

    let times: Vec<_> = json.as_array().unwrap().iter().map(created_at).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_refresh_query_rebuilds_within_window() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(&server.url("/tweets"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let first_fetched_at = server.state.aggregator.fetched_at().await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let response = server
        .client
        .get(&server.url("/tweets?refresh=true"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();

    let second_fetched_at = server.state.aggregator.fetched_at().await.unwrap();
    assert!(second_fetched_at > first_fetched_at);

    let times: Vec<_> = json.as_array().unwrap().iter().map(created_at).collect();
    assert!(!times.is_empty());
    assert!(times.windows(2).all(|w| w[0] >= w[1]));

    // refresh=false behaves like a plain read
    server
        .client
        .get(&server.url("/tweets?refresh=false"))
        .send()
        .await
        .unwrap();
    assert_eq!(
        server.state.aggregator.fetched_at().await,
        Some(second_fetched_at)
    );
}

#[tokio::test]
async fn test_unknown_account_returns_404() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(&server.url("/tweets/unknown_handle"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let json: Value = response.json().await.unwrap();
    assert_eq!(json, serde_json::json!({ "error": "User not found" }));
}

#[tokio::test]
async fn test_saylor_without_credentials() {
    let server = TestServer::new().await;
    let pool = xfeed::service::fallback::sample_pool("saylor");

    let response = server
        .client
        .get(&server.url("/tweets/saylor"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let json: Value = response.json().await.unwrap();
    let posts = json.as_array().unwrap();

    assert!((3..=5).contains(&posts.len()));
    for post in posts {
        assert_eq!(post["account"], "saylor");
        assert_eq!(post["media_urls"], serde_json::json!([]));
        assert!(pool.contains(&post["text"].as_str().unwrap()));
    }
}

#[tokio::test]
async fn test_account_route_is_not_cached() {
    let server = TestServer::new().await;

    server
        .client
        .get(&server.url("/tweets/rektcapital"))
        .send()
        .await
        .unwrap();

    assert_eq!(server.state.aggregator.fetched_at().await, None);
}
