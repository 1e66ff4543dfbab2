use serde_json::{json, Value};
use sqlx::Row;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{count_rows, spawn_app};

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn contact_submission_is_saved_in_postgres() {
    let test_app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let response = test_app
        .post(
            "/api/contact",
            &json!({
                "firstName": "John",
                "lastName": "Doe",
                "email": "john@x.com",
                "serviceInterest": "mfs",
                "message": "Hi",
            }),
        )
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let contact_id = body["contactId"].as_str().unwrap().to_string();

    let saved = sqlx::query("SELECT id::text AS id, email FROM contacts")
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Failed to fetch saved contact");
    assert_eq!(contact_id, saved.get::<String, _>("id"));
    assert_eq!("john@x.com", saved.get::<String, _>("email"));
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn newsletter_duplicate_returns_a_409_against_postgres() {
    let test_app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    let first = test_app
        .post("/api/newsletter", &json!({ "email": "jane@example.com" }))
        .await;
    assert_eq!(200, first.status().as_u16());

    let second = test_app
        .post("/api/newsletter", &json!({ "email": "JANE@example.com" }))
        .await;
    assert_eq!(409, second.status().as_u16());

    assert_eq!(1, count_rows(&test_app.db_pool, "newsletter_subscriptions").await);
}
