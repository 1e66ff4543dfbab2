use claim::{assert_matches, assert_none, assert_ok, assert_some};
use libbeyondx::domain::{ContactEmail, ContactSubmission, NewContact, NewSubscription};
use libbeyondx::store::{SubmissionStore, SubscriptionOutcome};
use sqlx::Row;

use crate::helpers::{count_rows, fresh_store};

fn contact(phone: Option<&str>, company: Option<&str>) -> NewContact {
    NewContact::try_from(ContactSubmission {
        first_name: Some("John".into()),
        last_name: Some("Doe".into()),
        email: Some("john@x.com".into()),
        phone: phone.map(Into::into),
        company: company.map(Into::into),
        service_interest: Some("booking".into()),
        message: Some("Line one\nLine two".into()),
    })
    .unwrap()
}

fn subscription(email: &str) -> NewSubscription {
    NewSubscription::parse(Some(email.into())).unwrap()
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn create_contact_stores_every_field() {
    let (store, db_pool) = fresh_store().await;

    let record = assert_ok!(
        store
            .create_contact(&contact(Some("555-1234 ext. 2"), Some("Acme")))
            .await
    );

    let row = sqlx::query(
        "SELECT first_name, last_name, email, phone, company, service_interest, message \
         FROM contacts WHERE id = $1",
    )
    .bind(record.id)
    .fetch_one(&db_pool)
    .await
    .expect("Failed to fetch saved contact");

    assert_eq!("John", row.get::<String, _>("first_name"));
    assert_eq!("Doe", row.get::<String, _>("last_name"));
    assert_eq!("john@x.com", row.get::<String, _>("email"));
    assert_eq!(Some("555-1234 ext. 2".to_string()), row.get::<Option<String>, _>("phone"));
    assert_eq!(Some("Acme".to_string()), row.get::<Option<String>, _>("company"));
    assert_eq!("booking", row.get::<String, _>("service_interest"));
    assert_eq!("Line one\nLine two", row.get::<String, _>("message"));
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn absent_optional_contact_fields_are_stored_as_null() {
    let (store, db_pool) = fresh_store().await;

    let record = assert_ok!(store.create_contact(&contact(None, None)).await);

    let row = sqlx::query("SELECT phone, company FROM contacts WHERE id = $1")
        .bind(record.id)
        .fetch_one(&db_pool)
        .await
        .expect("Failed to fetch saved contact");
    assert_none!(row.get::<Option<String>, _>("phone"));
    assert_none!(row.get::<Option<String>, _>("company"));
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn repeated_contacts_get_their_own_rows() {
    let (store, db_pool) = fresh_store().await;

    let first = assert_ok!(store.create_contact(&contact(None, None)).await);
    let second = assert_ok!(store.create_contact(&contact(None, None)).await);

    assert_ne!(first.id, second.id);
    assert_eq!(2, count_rows(&db_pool, "contacts").await);
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn second_subscription_with_the_same_email_is_refused() {
    let (store, db_pool) = fresh_store().await;

    let created = assert_ok!(
        store
            .create_subscription_if_absent(&subscription("jane@example.com"))
            .await
    );
    assert_matches!(created, SubscriptionOutcome::Created(_));

    let repeated = assert_ok!(
        store
            .create_subscription_if_absent(&subscription("Jane@Example.com"))
            .await
    );
    assert_matches!(repeated, SubscriptionOutcome::AlreadySubscribed);
    assert_eq!(1, count_rows(&db_pool, "newsletter_subscriptions").await);
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn concurrent_duplicate_subscriptions_store_a_single_row() {
    let (store, db_pool) = fresh_store().await;
    let jane = subscription("jane@example.com");

    let (first, second) = tokio::join!(
        store.create_subscription_if_absent(&jane),
        store.create_subscription_if_absent(&jane),
    );

    let created = [assert_ok!(first), assert_ok!(second)]
        .iter()
        .filter(|outcome| matches!(outcome, SubscriptionOutcome::Created(_)))
        .count();
    assert_eq!(1, created);
    assert_eq!(1, count_rows(&db_pool, "newsletter_subscriptions").await);
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn subscriptions_are_found_by_email() {
    let (store, _db_pool) = fresh_store().await;
    let jane = subscription("jane@example.com");

    let created = match assert_ok!(store.create_subscription_if_absent(&jane).await) {
        SubscriptionOutcome::Created(record) => record,
        SubscriptionOutcome::AlreadySubscribed => panic!("The first subscription was refused"),
    };

    let found = assert_some!(assert_ok!(store.find_subscription_by_email(&jane.email).await));
    assert_eq!(created.id, found.id);
    assert_eq!("jane@example.com", found.email.as_ref());

    let stranger = ContactEmail::parse("nobody@example.com".to_string()).unwrap();
    assert_none!(assert_ok!(store.find_subscription_by_email(&stranger).await));
}
