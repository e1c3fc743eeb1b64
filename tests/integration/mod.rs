//! Integration tests for the search proxy.
//!
//! The live tests require USDA_API_KEY / YOUTUBE_API_KEY environment variables.
//! Run with: cargo test --test integration -- --ignored
//!
//! Note: The live tests call the real USDA and YouTube APIs and spend quota.

use mockito::{Matcher, Server};
use serde_json::Value;
use tokio::net::TcpListener;

use search_proxy::api::{create_router, AppState};
use search_proxy::config::Config;
use search_proxy::food::{self, FoodSearchRequest, UsdaClient};
use search_proxy::upstream::build_http_client;
use search_proxy::video::{self, VideoSearchRequest, YouTubeClient};

/// Get a config from the environment.
fn live_config() -> Option<Config> {
    Config::load().ok()
}

/// Bind the router on an ephemeral port and return its base URL.
async fn spawn_proxy(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Serve over a real socket against mocked upstreams.
#[tokio::test]
async fn test_proxy_over_http() {
    let mut usda = Server::new_async().await;
    let _search = usda
        .mock("GET", "/foods/search")
        .match_query(Matcher::UrlEncoded("query".into(), "apple".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"foods": [{"fdcId": 1, "description": "Apples, raw", "dataType": "SR Legacy"}]}"#)
        .create_async()
        .await;
    let _details = usda
        .mock("GET", "/food/1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"foodNutrients": [
                {"nutrient": {"name": "Energy", "unitName": "kcal"}, "amount": 52},
                {"nutrient": {"name": "Fiber, total dietary", "unitName": "g"}, "amount": 2.4}
            ]}"#,
        )
        .create_async()
        .await;

    let http = build_http_client().unwrap();
    let state = AppState {
        usda: Some(UsdaClient::new(http.clone(), &usda.url(), "test-key")),
        youtube: None,
        metrics: None,
    };
    let base = spawn_proxy(state).await;

    let response = http
        .get(format!("{}/.netlify/functions/usda-search?q=apple", base))
        .header("Origin", "https://frontend.example")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["results"][0]["description"], "Apples, raw");
    assert_eq!(body["results"][0]["brandOwner"], Value::Null);
    assert_eq!(body["results"][0]["nutrients"]["Energy"], "52 kcal");
    assert!(body["results"][0]["nutrients"].get("Fiber, total dietary").is_none());

    let response = http
        .get(format!("{}/api/v1/youtube-search?q=lofi", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "YOUTUBE_API_KEY not configured");

    let response = http.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(response.status(), 200);
}

/// Search real FoodData Central.
#[tokio::test]
#[ignore = "requires USDA_API_KEY"]
async fn test_live_food_search() {
    let Some((config, key)) = live_config()
        .and_then(|c| c.usda_key().map(str::to_string).map(|k| (c, k)))
    else {
        println!("Skipping: USDA_API_KEY not set");
        return;
    };

    let client = UsdaClient::new(build_http_client().unwrap(), &config.usda_base_url, &key);
    let request = FoodSearchRequest::new("banana").with_limit(3);

    let results = food::search(&client, &request).await;
    assert!(results.is_ok(), "Food search failed: {:?}", results.err());

    let results = results.unwrap();
    assert!(!results.is_empty(), "Expected at least one food");
    assert!(results.len() <= 3);
    for item in &results {
        assert!(item.fdc_id.is_some());
        println!("{} ({}): {:?}", item.description, item.data_type, item.nutrients);
    }
}

/// Search real FoodData Central with a data type filter and no detail calls.
#[tokio::test]
#[ignore = "requires USDA_API_KEY"]
async fn test_live_food_search_without_details() {
    let Some((config, key)) = live_config()
        .and_then(|c| c.usda_key().map(str::to_string).map(|k| (c, k)))
    else {
        println!("Skipping: USDA_API_KEY not set");
        return;
    };

    let client = UsdaClient::new(build_http_client().unwrap(), &config.usda_base_url, &key);
    let request = FoodSearchRequest::new("cheddar cheese")
        .with_limit(2)
        .with_data_types(Some("Branded"))
        .with_details(false);

    let results = food::search(&client, &request).await.unwrap();
    for item in &results {
        assert_eq!(item.data_type, "Branded");
    }
}

/// Search real YouTube.
#[tokio::test]
#[ignore = "requires YOUTUBE_API_KEY"]
async fn test_live_video_search() {
    let Some((config, key)) = live_config()
        .and_then(|c| c.youtube_key().map(str::to_string).map(|k| (c, k)))
    else {
        println!("Skipping: YOUTUBE_API_KEY not set");
        return;
    };

    let client = YouTubeClient::new(build_http_client().unwrap(), &config.youtube_base_url, &key);
    let request = VideoSearchRequest::new("lofi").with_limit(2);

    let results = video::search(&client, &request).await;
    assert!(results.is_ok(), "Video search failed: {:?}", results.err());

    let results = results.unwrap();
    assert!(results.len() <= 2);
    for item in &results {
        assert!(!item.video_id.is_empty());
        assert!(item.thumbnail_url.starts_with("https://"));
        println!("{} [{}] views={}", item.title, item.video_id, item.view_count);
    }
}
