use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use server::{build_router, config::Config, state::State, store::MemoryStore};
use tokio::net::TcpListener;

async fn spawn_server() -> String {
    let config = Config {
        port: 0,
        redis_url: None,
    };
    let state = State::with_store(config, Arc::new(MemoryStore::new()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    format!("http://{address}")
}

fn ann(email: &str) -> Value {
    json!({
        "firstName": "Ann",
        "lastName": "Lee",
        "email": email,
        "certification": "PMP",
    })
}

async fn list(client: &Client, base: &str) -> Vec<Value> {
    let response = client.get(format!("{base}/api/rsvps")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    response.json().await.unwrap()
}

#[tokio::test]
async fn test_empty_listing() {
    let base = spawn_server().await;

    assert!(list(&Client::new(), &base).await.is_empty());
}

#[tokio::test]
async fn test_submit_list_and_reject_duplicate() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/api/rsvp"))
        .json(&ann("alee@bu.edu"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "RSVP submitted successfully");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["firstName"], "Ann");
    assert_eq!(body["data"]["lastName"], "Lee");
    assert_eq!(body["data"]["email"], "alee@bu.edu");
    assert_eq!(body["data"]["certification"], "PMP");
    assert!(
        chrono::DateTime::parse_from_rfc3339(body["data"]["createdAt"].as_str().unwrap()).is_ok()
    );

    let response = client
        .post(format!("{base}/api/rsvp"))
        .json(&ann("ALEE@bu.edu"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "message": "You have already RSVP'd with this email address" })
    );

    let rsvps = list(&client, &base).await;
    assert_eq!(rsvps.len(), 1);
    assert_eq!(rsvps[0]["id"], 1);
    assert_eq!(rsvps[0]["email"], "alee@bu.edu");
}

#[tokio::test]
async fn test_ids_follow_submission_order() {
    let base = spawn_server().await;
    let client = Client::new();

    for (i, email) in ["a@bu.edu", "b@bu.edu", "c@bu.edu"].iter().enumerate() {
        let body: Value = client
            .post(format!("{base}/api/rsvp"))
            .json(&ann(email))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["data"]["id"], i as u64 + 1);
    }

    let emails: Vec<Value> = list(&client, &base)
        .await
        .into_iter()
        .map(|rsvp| rsvp["email"].clone())
        .collect();
    assert_eq!(emails, ["a@bu.edu", "b@bu.edu", "c@bu.edu"]);
}

#[tokio::test]
async fn test_validation_errors() {
    let base = spawn_server().await;
    let client = Client::new();

    let mut wrong_certification = ann("alee@bu.edu");
    wrong_certification["certification"] = json!("ITIL");

    for payload in [
        ann("alee@gmail.com"),
        ann("not an email"),
        wrong_certification,
        json!({ "firstName": "Ann" }),
    ] {
        let response = client
            .post(format!("{base}/api/rsvp"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "Validation error");
        assert!(!body["errors"].as_array().unwrap().is_empty());
    }

    assert!(list(&client, &base).await.is_empty());
}

#[tokio::test]
async fn test_domain_error_names_the_field() {
    let base = spawn_server().await;

    let body: Value = Client::new()
        .post(format!("{base}/api/rsvp"))
        .json(&ann("alee@gmail.com"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body["errors"],
        json!([{
            "code": "custom",
            "message": "Email must be a Boston University email address (@bu.edu)",
            "path": ["email"],
        }])
    );
}

#[tokio::test]
async fn test_malformed_json() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{base}/api/rsvp"))
        .header("content-type", "application/json")
        .body("{\"firstName\":")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["errors"][0]["code"], "invalid_json");

    assert!(list(&client, &base).await.is_empty());
}
