use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use uuid::Uuid;

use crate::domain::{ContactSubmission, NewContact, SubmittedValue, ValidationError};
use crate::email_client::{EmailClient, MailDeliveryFault};
use crate::notifications::contact_notification;
use crate::routes::error_chain_fmt;
use crate::startup::ContactMailbox;
use crate::store::SubmissionStore;
use crate::utils::failure_response;

const SUBMITTED: &str = "Contact form submitted successfully";
const FAILED: &str = "Failed to submit contact form";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ContactPayload {
    first_name: Option<SubmittedValue>,
    last_name: Option<SubmittedValue>,
    email: Option<SubmittedValue>,
    phone: Option<SubmittedValue>,
    company: Option<SubmittedValue>,
    service_interest: Option<SubmittedValue>,
    message: Option<SubmittedValue>,
}

impl From<ContactPayload> for ContactSubmission {
    fn from(payload: ContactPayload) -> Self {
        ContactSubmission {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            company: payload.company,
            service_interest: payload.service_interest,
            message: payload.message,
        }
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactResponse {
    success: bool,
    message: &'static str,
    contact_id: Uuid,
}

#[tracing::instrument(
    name = "Submitting the contact form",
    skip(body, store, email_client, mailbox),
    fields(
        contact_email = tracing::field::Empty,
        contact_id = tracing::field::Empty
    )
)]
pub(crate) async fn submit_contact(
    body: web::Json<ContactPayload>,
    store: web::Data<dyn SubmissionStore>,
    email_client: web::Data<EmailClient>,
    mailbox: web::Data<ContactMailbox>,
) -> Result<HttpResponse, ContactError> {
    let contact = NewContact::try_from(ContactSubmission::from(body.into_inner()))?;
    tracing::Span::current().record("contact_email", &tracing::field::display(&contact.email));

    let record = store
        .create_contact(&contact)
        .await
        .context("Failed to store the contact submission")?;
    tracing::Span::current().record("contact_id", &tracing::field::display(record.id));

    let notification = contact_notification(&contact, &mailbox.0)
        .context("Failed to render the contact notification")?;
    if let Err(source) = email_client.send(&notification).await {
        tracing::error!(
            contact_id = %record.id,
            "Contact submission stored but the notification email was not delivered"
        );
        return Err(ContactError::Notification {
            contact_id: record.id,
            source,
        });
    }

    Ok(HttpResponse::Ok().json(ContactResponse {
        success: true,
        message: SUBMITTED,
        contact_id: record.id,
    }))
}

#[derive(thiserror::Error)]
pub(crate) enum ContactError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to send the notification for contact {contact_id}")]
    Notification {
        contact_id: Uuid,
        #[source]
        source: MailDeliveryFault,
    },
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Notification { .. } | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Validation(err) => {
                failure_response(self.status_code(), &err.to_string(), Some(err.errors()))
            }
            Self::Notification { .. } | Self::Unexpected(_) => {
                failure_response(self.status_code(), FAILED, None)
            }
        }
    }
}
