//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:3000";

/// Client with a cookie jar so the session cookie survives across calls
fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client")
}

/// Unique username per test run to keep reruns independent
fn unique_username(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_nanos();
    format!("{}_{}", prefix, nanos)
}

/// Sign up and log in a fresh user, returning the authenticated client
async fn signup_and_login(prefix: &str) -> (Client, String) {
    let client = session_client();
    let username = unique_username(prefix);

    let response = client
        .post(format!("{}/api/auth/signup", BASE_URL))
        .json(&json!({ "username": username, "password": "pw1234" }))
        .send()
        .await
        .expect("Failed to send signup request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/api/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "pw1234" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), 200);

    (client, username)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_signup_rejects_duplicate_username() {
    let client = session_client();
    let username = unique_username("dup");

    let first = client
        .post(format!("{}/api/auth/signup", BASE_URL))
        .json(&json!({ "username": username, "password": "pw1234" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/api/auth/signup", BASE_URL))
        .json(&json!({ "username": username, "password": "other" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Signup failed");
}

#[tokio::test]
#[ignore]
async fn test_login_unknown_user() {
    let client = session_client();

    let response = client
        .post(format!("{}/api/auth/login", BASE_URL))
        .json(&json!({ "username": unique_username("ghost"), "password": "pw1234" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
#[ignore]
async fn test_login_wrong_password() {
    let client = session_client();
    let username = unique_username("pwcheck");

    let response = client
        .post(format!("{}/api/auth/signup", BASE_URL))
        .json(&json!({ "username": username, "password": "pw1234" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/api/auth/login", BASE_URL))
        .json(&json!({ "username": username, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Incorrect password");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/api/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Not logged in");
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let (client, _) = signup_and_login("alice").await;

    // Create with an explicit ISBN so the test does not depend on the
    // external resolver
    let response = client
        .post(format!("{}/api/books", BASE_URL))
        .json(&json!({
            "title": "Dune",
            "author": "Herbert",
            "isbn": "9780441013593",
            "rating": 5,
            "status": "Read",
            "genre": "Science Fiction"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book ID");
    assert_eq!(book["isbn"], "9780441013593");
    assert_eq!(book["status"], "Read");

    // Listed
    let response = client
        .get(format!("{}/api/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let books: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["isbn"], "9780441013593");

    // Conjunctive filters match
    let response = client
        .get(format!(
            "{}/api/books?search=dune&rating=5&status=Read",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");
    let books: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(books.len(), 1);

    // A filter that does not match excludes the book
    let response = client
        .get(format!("{}/api/books?rating=1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let books: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert!(books.is_empty());

    // Delete, then the list is empty
    let response = client
        .delete(format!("{}/api/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let books: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert!(books.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_delete_is_owner_scoped() {
    let (owner, _) = signup_and_login("owner").await;
    let (intruder, _) = signup_and_login("intruder").await;

    let response = owner
        .post(format!("{}/api/books", BASE_URL))
        .json(&json!({ "title": "Emma", "author": "Austen", "isbn": "9780141439587" }))
        .send()
        .await
        .expect("Failed to send request");
    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_i64().expect("No book ID");

    // Foreign delete is a silent no-op with a success-shaped response
    let response = intruder
        .delete(format!("{}/api/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    // The owner still sees the book
    let response = owner
        .get(format!("{}/api/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let books: Vec<Value> = response.json().await.expect("Failed to parse response");
    assert_eq!(books.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_sort_highest_puts_unrated_last() {
    let (client, _) = signup_and_login("sorter").await;

    for (title, rating) in [
        ("Middling", Some(3)),
        ("Favourite", Some(5)),
        ("Unrated", None),
    ] {
        let mut body = json!({ "title": title, "author": "A", "isbn": "x" });
        if let Some(rating) = rating {
            body["rating"] = json!(rating);
        }
        let response = client
            .post(format!("{}/api/books", BASE_URL))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
    }

    let response = client
        .get(format!("{}/api/books?sort=highest", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let books: Vec<Value> = response.json().await.expect("Failed to parse response");

    let titles: Vec<&str> = books.iter().filter_map(|b| b["title"].as_str()).collect();
    assert_eq!(titles, vec!["Favourite", "Middling", "Unrated"]);
}

#[tokio::test]
#[ignore]
async fn test_logout_ends_session() {
    let (client, _) = signup_and_login("leaver").await;

    let response = client
        .post(format!("{}/api/auth/logout", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/api/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}
