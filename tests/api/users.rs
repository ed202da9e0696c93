use std::sync::Arc;

use beanstore::InMemoryModelStore;
use serde_json::{json, Value};

use crate::support::{read, start_server};

async fn with_users(ids: &[&str]) -> (String, reqwest::Client) {
    let base = start_server(Arc::new(InMemoryModelStore::new())).await;
    let client = reqwest::Client::new();
    for id in ids {
        let resp = client
            .post(format!("{base}/users"))
            .json(&json!({ "userData": { "id": id, "email": format!("{id}@example.com"), "name": "Ada" } }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }
    (base, client)
}

#[tokio::test]
async fn register_user() {
    let (base, client) = with_users(&[]).await;

    let resp = client
        .post(format!("{base}/users"))
        .json(&json!({ "userData": { "id": "u1", "email": "a@example.com", "name": "Ada" } }))
        .send()
        .await
        .unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 200);
    assert_eq!(
        body["user"],
        json!({ "id": "u1", "email": "a@example.com", "name": "Ada", "cart": [] })
    );
}

#[tokio::test]
async fn registration_needs_every_field() {
    let (base, client) = with_users(&[]).await;

    for user_data in [
        json!({ "id": "u1", "name": "Ada" }),
        json!({ "id": "", "email": "a@example.com", "name": "Ada" }),
    ] {
        let resp = client
            .post(format!("{base}/users"))
            .json(&json!({ "userData": user_data }))
            .send()
            .await
            .unwrap();
        let (status, _, body) = read(resp).await;
        assert_eq!(status, 400);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Please provide body in format"));
    }
}

#[tokio::test]
async fn update_profile() {
    let (base, client) = with_users(&["u1"]).await;

    let resp = client
        .patch(format!("{base}/users/u1"))
        .json(&json!({ "userData": { "name": "Ada L." } }))
        .send()
        .await
        .unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["name"], "Ada L.");
    assert_eq!(body["user"]["email"], "u1@example.com");

    let resp = client
        .patch(format!("{base}/users/ghost"))
        .json(&json!({ "userData": { "name": "Nobody" } }))
        .send()
        .await
        .unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "user": null, "message": "User not found" }));
}

#[tokio::test]
async fn cart_round_trip() {
    let (base, client) = with_users(&["u1"]).await;
    let cart = json!([{ "productId": "p1", "quantity": 3 }]);

    let resp = client.get(format!("{base}/users/u1/cart")).send().await.unwrap();
    let (_, _, body) = read(resp).await;
    assert_eq!(body["cart"], json!([]));

    let resp = client
        .patch(format!("{base}/users/u1/cart"))
        .json(&json!({ "newCart": cart }))
        .send()
        .await
        .unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 200);
    assert_eq!(body["cart"], cart);

    let resp = client.get(format!("{base}/users/u1/cart")).send().await.unwrap();
    let (_, _, body) = read(resp).await;
    assert_eq!(body["cart"], cart);
}

#[tokio::test]
async fn cart_of_missing_user() {
    let (base, client) = with_users(&[]).await;

    let resp = client.get(format!("{base}/users/ghost/cart")).send().await.unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 200);
    assert_eq!(body["cart"], Value::Null);

    let resp = client
        .patch(format!("{base}/users/ghost/cart"))
        .json(&json!({ "newCart": [] }))
        .send()
        .await
        .unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "cart": null, "message": "User not found" }));
}

#[tokio::test]
async fn pending_carts_lists_users_with_items() {
    let (base, client) = with_users(&["u1", "u2", "u3"]).await;
    client
        .patch(format!("{base}/users/u2/cart"))
        .json(&json!({ "newCart": [{ "productId": "p1", "quantity": 1 }] }))
        .send()
        .await
        .unwrap();

    let resp = client.get(format!("{base}/carts/pending")).send().await.unwrap();
    let (status, _, body) = read(resp).await;
    assert_eq!(status, 200);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], "u2");
}

#[tokio::test]
async fn list_users_in_pages() {
    let (base, client) = with_users(&["u1", "u2", "u3"]).await;

    let resp = client
        .get(format!("{base}/users"))
        .query(&[("pageSize", "2")])
        .send()
        .await
        .unwrap();
    let (_, _, body) = read(resp).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
    assert!(body["LastEvaluatedKey"].is_string());
}
