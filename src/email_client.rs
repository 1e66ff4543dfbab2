use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};

use crate::domain::ContactEmail;

/// A message ready to hand to the mail provider. The sender is fixed by the client.
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: ContactEmail,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum MailDeliveryFault {
    #[error("mail transport credentials are not configured")]
    MissingCredentials,
    #[error("failed to reach the mail provider")]
    Transport(#[source] reqwest::Error),
    #[error("the mail provider did not answer in time")]
    Timeout(#[source] reqwest::Error),
    #[error("the mail provider rejected the message with status {0}")]
    Rejected(StatusCode),
    #[error("invalid mail provider endpoint")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl MailDeliveryFault {
    fn is_retryable(&self) -> bool {
        match self {
            Self::MissingCredentials | Self::InvalidEndpoint(_) => false,
            Self::Transport(_) | Self::Timeout(_) => true,
            Self::Rejected(status) => status.is_server_error(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: Url,
    sender: ContactEmail,
    authorization_token: Option<Secret<String>>,
    retry_policy: RetryPolicy,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: Url,
        sender: ContactEmail,
        authorization_token: Option<Secret<String>>,
        timeout: Duration,
        retry_policy: RetryPolicy,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
            retry_policy,
        })
    }

    #[tracing::instrument(
        name = "Sending email",
        skip(self, message),
        fields(recipient = %message.to, subject = %message.subject)
    )]
    pub async fn send(&self, message: &MailMessage) -> Result<(), MailDeliveryFault> {
        let mut attempt = 0;
        loop {
            match self.try_send(message).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_retryable() && attempt < self.retry_policy.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        error.message = %err,
                        attempt,
                        "Mail delivery failed, retrying"
                    );
                    tokio::time::sleep(self.retry_policy.backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_send(&self, message: &MailMessage) -> Result<(), MailDeliveryFault> {
        let token = self
            .authorization_token
            .as_ref()
            .ok_or(MailDeliveryFault::MissingCredentials)?;
        let url = self.base_url.join("email")?;

        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: message.to.as_ref(),
            subject: &message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
        };

        let response = self
            .http_client
            .post(url)
            .header("X-Postmark-Server-Token", token.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    MailDeliveryFault::Timeout(err)
                } else {
                    MailDeliveryFault::Transport(err)
                }
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(MailDeliveryFault::Rejected(status))
        }
    }
}
