use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use uuid::Uuid;

use crate::domain::{NewSubscription, SubmittedValue, ValidationError};
use crate::email_client::{EmailClient, MailDeliveryFault};
use crate::notifications::welcome_message;
use crate::routes::error_chain_fmt;
use crate::store::{SubmissionStore, SubscriptionOutcome};
use crate::utils::failure_response;

const SUBSCRIBED: &str = "Successfully subscribed to newsletter";
const ALREADY_SUBSCRIBED: &str = "Email already subscribed";
const FAILED: &str = "Failed to subscribe to newsletter";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(crate) struct NewsletterPayload {
    email: Option<SubmittedValue>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionResponse {
    success: bool,
    message: &'static str,
    subscription_id: Uuid,
}

#[tracing::instrument(
    name = "Subscribing to the newsletter",
    skip(body, store, email_client),
    fields(
        subscriber_email = tracing::field::Empty,
        subscription_id = tracing::field::Empty
    )
)]
pub(crate) async fn subscribe(
    body: web::Json<NewsletterPayload>,
    store: web::Data<dyn SubmissionStore>,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, NewsletterError> {
    let subscription = NewSubscription::parse(body.into_inner().email)?;
    tracing::Span::current().record(
        "subscriber_email",
        &tracing::field::display(&subscription.email),
    );

    let outcome = store
        .create_subscription_if_absent(&subscription)
        .await
        .context("Failed to store the newsletter subscription")?;
    let record = match outcome {
        SubscriptionOutcome::Created(record) => record,
        SubscriptionOutcome::AlreadySubscribed => return Err(NewsletterError::AlreadySubscribed),
    };
    tracing::Span::current().record("subscription_id", &tracing::field::display(record.id));

    let welcome =
        welcome_message(&subscription).context("Failed to render the welcome email")?;
    if let Err(source) = email_client.send(&welcome).await {
        tracing::error!(
            subscription_id = %record.id,
            "Subscription stored but the welcome email was not delivered"
        );
        return Err(NewsletterError::Notification {
            subscription_id: record.id,
            source,
        });
    }

    Ok(HttpResponse::Ok().json(SubscriptionResponse {
        success: true,
        message: SUBSCRIBED,
        subscription_id: record.id,
    }))
}

#[derive(thiserror::Error)]
pub(crate) enum NewsletterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", ALREADY_SUBSCRIBED)]
    AlreadySubscribed,
    #[error("Failed to send the welcome email for subscription {subscription_id}")]
    Notification {
        subscription_id: Uuid,
        #[source]
        source: MailDeliveryFault,
    },
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for NewsletterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for NewsletterError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::AlreadySubscribed => StatusCode::CONFLICT,
            Self::Notification { .. } | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Validation(err) => {
                failure_response(self.status_code(), &err.to_string(), Some(err.errors()))
            }
            Self::AlreadySubscribed => {
                failure_response(self.status_code(), ALREADY_SUBSCRIBED, None)
            }
            Self::Notification { .. } | Self::Unexpected(_) => {
                failure_response(self.status_code(), FAILED, None)
            }
        }
    }
}
