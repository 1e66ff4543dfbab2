use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{
    ContactRecord, StoreError, SubmissionStore, SubscriptionOutcome, SubscriptionRecord,
};
use crate::domain::{ContactEmail, NewContact, NewSubscription};

/// Process-local store for development and tests. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    contacts: Mutex<Vec<ContactRecord>>,
    subscriptions: Mutex<HashMap<String, SubscriptionRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts(&self) -> Vec<ContactRecord> {
        self.contacts
            .lock()
            .map(|contacts| contacts.clone())
            .unwrap_or_default()
    }

    pub fn subscriptions(&self) -> Vec<SubscriptionRecord> {
        self.subscriptions
            .lock()
            .map(|subscriptions| subscriptions.values().cloned().collect())
            .unwrap_or_default()
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Poisoned
}

#[async_trait]
impl SubmissionStore for InMemoryStore {
    #[tracing::instrument(name = "Saving contact submission in memory", skip_all)]
    async fn create_contact(&self, contact: &NewContact) -> Result<ContactRecord, StoreError> {
        let record = ContactRecord {
            id: Uuid::new_v4(),
            contact: contact.clone(),
            submitted_at: Utc::now(),
        };
        self.contacts.lock().map_err(poisoned)?.push(record.clone());
        Ok(record)
    }

    #[tracing::instrument(
        name = "Saving newsletter subscription in memory",
        skip_all,
        fields(subscriber_email = %subscription.email)
    )]
    async fn create_subscription_if_absent(
        &self,
        subscription: &NewSubscription,
    ) -> Result<SubscriptionOutcome, StoreError> {
        let mut subscriptions = self.subscriptions.lock().map_err(poisoned)?;
        let key = subscription.email.as_ref();
        if subscriptions.contains_key(key) {
            return Ok(SubscriptionOutcome::AlreadySubscribed);
        }

        let record = SubscriptionRecord {
            id: Uuid::new_v4(),
            email: subscription.email.clone(),
            subscribed_at: Utc::now(),
        };
        subscriptions.insert(key.to_string(), record.clone());
        Ok(SubscriptionOutcome::Created(record))
    }

    async fn find_subscription_by_email(
        &self,
        email: &ContactEmail,
    ) -> Result<Option<SubscriptionRecord>, StoreError> {
        let subscriptions = self.subscriptions.lock().map_err(poisoned)?;
        Ok(subscriptions.get(email.as_ref()).cloned())
    }
}
