use std::sync::Arc;

use beanstore::InMemoryModelStore;
use serde_json::json;

use crate::support::{read, start_server, FailingStore};

#[tokio::test]
async fn unknown_path_is_502() {
    let base = start_server(Arc::new(InMemoryModelStore::new())).await;
    let resp = reqwest::get(format!("{base}/widgets")).await.unwrap();
    let (status, cors, body) = read(resp).await;
    assert_eq!(status, 502);
    assert_eq!(cors.as_deref(), Some("*"));
    assert_eq!(body, json!({ "message": "Not such endpoint" }));
}

#[tokio::test]
async fn unsupported_method_is_502() {
    let base = start_server(Arc::new(InMemoryModelStore::new())).await;
    let client = reqwest::Client::new();

    let resp = client.put(format!("{base}/products")).send().await.unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 502);
    assert_eq!(body["message"], "Not such endpoint");

    // Orders cannot be deleted.
    let resp = client.delete(format!("{base}/orders/o1")).send().await.unwrap();
    assert_eq!(resp.status(), 502);

    let resp = client.post(format!("{base}/carts/pending")).send().await.unwrap();
    assert_eq!(resp.status(), 502);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let base = start_server(Arc::new(InMemoryModelStore::new())).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/products"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    let (status, cors, body) = read(resp).await;
    assert_eq!(status, 400);
    assert_eq!(cors.as_deref(), Some("*"));
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Please provide body in format"));
}

#[tokio::test]
async fn bad_paging_parameters_are_400() {
    let base = start_server(Arc::new(InMemoryModelStore::new())).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/products"))
        .query(&[("pageSize", "0")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .get(format!("{base}/products"))
        .query(&[("pageSize", "2"), ("LastEvaluatedKey", "not a cursor!")])
        .send()
        .await
        .unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 400);
    assert!(body["message"].as_str().unwrap().contains("invalid scan cursor"));
}

#[tokio::test]
async fn oversized_body_is_400_with_cors() {
    let base = start_server(Arc::new(InMemoryModelStore::new())).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/products"))
        .header("content-type", "application/json")
        .body(vec![b' '; 3 * 1024 * 1024])
        .send()
        .await
        .unwrap();
    let (status, cors, body) = read(resp).await;
    assert_eq!(status, 400);
    assert_eq!(cors.as_deref(), Some("*"));
    assert!(body["message"].as_str().unwrap().contains("length limit"));
}

#[tokio::test]
async fn duplicate_query_parameter_is_400_with_cors() {
    let base = start_server(Arc::new(InMemoryModelStore::new())).await;
    let resp = reqwest::get(format!("{base}/products?pageSize=1&pageSize=2"))
        .await
        .unwrap();
    let (status, cors, body) = read(resp).await;
    assert_eq!(status, 400);
    assert_eq!(cors.as_deref(), Some("*"));
    assert!(body["message"].as_str().unwrap().contains("pageSize"));
}

#[tokio::test]
async fn undecodable_path_is_400_with_cors() {
    let base = start_server(Arc::new(InMemoryModelStore::new())).await;
    let resp = reqwest::get(format!("{base}/orders/%FF")).await.unwrap();
    let (status, cors, body) = read(resp).await;
    assert_eq!(status, 400);
    assert_eq!(cors.as_deref(), Some("*"));
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn store_failure_is_502() {
    let base = start_server(Arc::new(FailingStore)).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/products/p1")).send().await.unwrap();
    let (status, cors, body) = read(resp).await;
    assert_eq!(status, 502);
    assert_eq!(cors.as_deref(), Some("*"));
    assert_eq!(body, json!({ "error": "store unavailable: throttled" }));

    let resp = client
        .get(format!("{base}/orders"))
        .query(&[("search", "u1")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);
}
