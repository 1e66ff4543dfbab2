use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::{
    ContactRecord, StoreError, SubmissionStore, SubscriptionOutcome, SubscriptionRecord,
};
use crate::domain::{ContactEmail, NewContact, NewSubscription};

#[derive(Debug, Clone)]
pub struct PostgresStore {
    db_pool: PgPool,
}

impl PostgresStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .map_err(StoreError::from)
    }
}

#[async_trait]
impl SubmissionStore for PostgresStore {
    #[tracing::instrument(name = "Saving contact submission in the database", skip_all)]
    async fn create_contact(&self, contact: &NewContact) -> Result<ContactRecord, StoreError> {
        let id = Uuid::new_v4();
        let submitted_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO contacts
                (id, first_name, last_name, email, phone, company,
                 service_interest, message, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id)
        .bind(contact.first_name.as_ref())
        .bind(contact.last_name.as_ref())
        .bind(contact.email.as_ref())
        .bind(contact.phone.as_ref().map(AsRef::<str>::as_ref))
        .bind(contact.company.as_ref().map(AsRef::<str>::as_ref))
        .bind(contact.service_interest.code())
        .bind(contact.message.as_ref())
        .bind(submitted_at)
        .execute(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

        Ok(ContactRecord {
            id,
            contact: contact.clone(),
            submitted_at,
        })
    }

    #[tracing::instrument(
        name = "Saving newsletter subscription in the database",
        skip_all,
        fields(subscriber_email = %subscription.email)
    )]
    async fn create_subscription_if_absent(
        &self,
        subscription: &NewSubscription,
    ) -> Result<SubscriptionOutcome, StoreError> {
        let id = Uuid::new_v4();
        let subscribed_at = Utc::now();

        // The UNIQUE constraint on `email` turns a concurrent duplicate into a no-op.
        let inserted = sqlx::query(
            r#"
            INSERT INTO newsletter_subscriptions (id, email, subscribed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(id)
        .bind(subscription.email.as_ref())
        .bind(subscribed_at)
        .execute(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?
        .rows_affected();

        if inserted == 0 {
            return Ok(SubscriptionOutcome::AlreadySubscribed);
        }

        Ok(SubscriptionOutcome::Created(SubscriptionRecord {
            id,
            email: subscription.email.clone(),
            subscribed_at,
        }))
    }

    #[tracing::instrument(name = "Looking up newsletter subscription", skip(self))]
    async fn find_subscription_by_email(
        &self,
        email: &ContactEmail,
    ) -> Result<Option<SubscriptionRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, subscribed_at
            FROM newsletter_subscriptions
            WHERE email = $1
            "#,
        )
        .bind(email.as_ref())
        .fetch_optional(&self.db_pool)
        .await?;

        row.map(|row| -> Result<SubscriptionRecord, StoreError> {
            let id: Uuid = row.try_get("id")?;
            let subscribed_at: DateTime<Utc> = row.try_get("subscribed_at")?;
            Ok(SubscriptionRecord {
                id,
                email: email.clone(),
                subscribed_at,
            })
        })
        .transpose()
    }
}
