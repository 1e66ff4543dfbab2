use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Paragraph;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use serde_json::{json, Value};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{spawn_app, spawn_app_with_credentials, CONTACT_MAILBOX};

fn valid_contact() -> Value {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email: String = SafeEmail().fake();
    let message: String = Paragraph(1..3).fake();
    json!({
        "firstName": first_name,
        "lastName": last_name,
        "email": email,
        "phone": "+1 (555) 123-4567",
        "company": "Acme",
        "serviceInterest": "dfs",
        "message": message,
    })
}

async fn mount_mail_ok(test_app: &crate::helpers::TestApp) {
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&test_app.email_server)
        .await;
}

#[tokio::test]
async fn contact_returns_a_200_with_an_id_for_the_john_doe_scenario() {
    let test_app = spawn_app().await;
    mount_mail_ok(&test_app).await;

    let body = json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "john@x.com",
        "serviceInterest": "mfs",
        "message": "Hi",
    });
    let response = test_app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(Some(true), body["success"].as_bool());
    assert_eq!("Contact form submitted successfully", body["message"]);
    let contact_id = body["contactId"].as_str().unwrap();
    assert!(!contact_id.is_empty());

    let contacts = test_app.store.contacts();
    assert_eq!(1, contacts.len());
    assert_eq!(contact_id, contacts[0].id.to_string());
    assert_eq!("John Doe", contacts[0].contact.full_name());
}

#[tokio::test]
async fn contact_persists_exactly_one_record_per_valid_submission() {
    let test_app = spawn_app().await;
    mount_mail_ok(&test_app).await;

    for _ in 0..3 {
        let response = test_app.post_contact(&valid_contact()).await;
        assert_eq!(200, response.status().as_u16());
    }

    assert_eq!(3, test_app.store.contacts().len());
}

#[tokio::test]
async fn contact_sends_one_notification_to_the_operations_mailbox() {
    let test_app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&test_app.email_server)
        .await;

    test_app.post_contact(&valid_contact()).await;

    let requests = test_app.email_server.received_requests().await.unwrap();
    let mail: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(CONTACT_MAILBOX, mail["To"]);
    assert_eq!("New Contact Form Submission - dfs", mail["Subject"]);
}

#[tokio::test]
async fn contact_returns_a_400_when_required_fields_are_missing() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    for field in ["firstName", "email", "serviceInterest", "message"] {
        let mut body = valid_contact();
        body.as_object_mut().unwrap().remove(field);

        let response = test_app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was missing {}.",
            field
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(Some(false), body["success"].as_bool());
        assert!(body["message"].as_str().unwrap().contains(field));
        assert_eq!(field, body["errors"][0]["field"]);
    }

    assert!(test_app.store.contacts().is_empty());
}

#[tokio::test]
async fn contact_returns_a_400_when_fields_are_present_but_invalid() {
    let test_app = spawn_app().await;

    let test_cases = [
        ("email", json!("definitely-not-an-email"), "invalid email"),
        ("message", json!("   "), "blank message"),
        ("serviceInterest", json!("consulting"), "unknown service interest"),
        ("firstName", json!(""), "empty first name"),
        ("phone", json!("5".repeat(65)), "overlong phone"),
    ];

    for (field, value, description) in test_cases {
        let mut body = valid_contact();
        body[field] = value;

        let response = test_app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload had an {}.",
            description
        );
    }

    assert!(test_app.store.contacts().is_empty());
}

#[tokio::test]
async fn contact_reports_a_field_with_the_wrong_json_type() {
    let test_app = spawn_app().await;

    let mut body = valid_contact();
    body["phone"] = json!(5551234);

    let response = test_app.post_contact(&body).await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(Some(false), body["success"].as_bool());
    assert_eq!(1, body["errors"].as_array().unwrap().len());
    assert_eq!("phone", body["errors"][0]["field"]);
    assert_eq!("Expected string", body["errors"][0]["message"]);
    assert!(test_app.store.contacts().is_empty());
}

#[tokio::test]
async fn contact_accepts_free_form_names_and_phone_numbers() {
    let test_app = spawn_app().await;
    mount_mail_ok(&test_app).await;

    let mut body = valid_contact();
    body["firstName"] = json!("Mary (MJ)");
    body["phone"] = json!("555-1234 ext. 2");

    let response = test_app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());
    let contacts = test_app.store.contacts();
    assert_eq!(1, contacts.len());
    assert_eq!("555-1234 ext. 2", contacts[0].contact.phone.as_ref().unwrap().as_ref());
    assert_eq!("Mary (MJ)", contacts[0].contact.first_name.as_ref());
}

#[tokio::test]
async fn contact_returns_a_400_for_a_body_that_is_not_json() {
    let test_app = spawn_app().await;

    let response = test_app
        .client
        .post(test_app.with_path("/api/contact"))
        .header("Content-Type", "application/json")
        .body("firstName=John")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(Some(false), body["success"].as_bool());
}

#[tokio::test]
async fn contact_keeps_the_record_when_the_notification_fails() {
    let test_app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&valid_contact()).await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(Some(false), body["success"].as_bool());
    assert_eq!("Failed to submit contact form", body["message"]);
    assert_eq!(1, test_app.store.contacts().len());
}

#[tokio::test]
async fn contact_notification_fails_without_mail_credentials() {
    let test_app = spawn_app_with_credentials(false).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&test_app.email_server)
        .await;

    let response = test_app.post_contact(&valid_contact()).await;

    assert_eq!(500, response.status().as_u16());
    assert_eq!(1, test_app.store.contacts().len());
}
