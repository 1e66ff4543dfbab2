//! Persistence for contact submissions and newsletter subscriptions.

mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ContactEmail, NewContact, NewSubscription};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

#[derive(Debug, Clone)]
pub struct ContactRecord {
    pub id: Uuid,
    pub contact: NewContact,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SubscriptionRecord {
    pub id: Uuid,
    pub email: ContactEmail,
    pub subscribed_at: DateTime<Utc>,
}

/// Result of an insert-if-absent on the subscription email.
#[derive(Debug)]
pub enum SubscriptionOutcome {
    Created(SubscriptionRecord),
    AlreadySubscribed,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database query failed")]
    Database(#[from] sqlx::Error),
    #[error("database migration failed")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("in-memory store lock was poisoned")]
    Poisoned,
}

/// Append-only record keeper shared by all request handlers.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn create_contact(&self, contact: &NewContact) -> Result<ContactRecord, StoreError>;

    /// Inserts the subscription unless its email is already on record.
    /// Check and insert happen as a single operation.
    async fn create_subscription_if_absent(
        &self,
        subscription: &NewSubscription,
    ) -> Result<SubscriptionOutcome, StoreError>;

    async fn find_subscription_by_email(
        &self,
        email: &ContactEmail,
    ) -> Result<Option<SubscriptionRecord>, StoreError>;
}
