//! Notification emails sent after a submission has been stored.

use askama::Template;

use crate::domain::{ContactEmail, NewContact, NewSubscription};
use crate::email_client::MailMessage;

const NOT_PROVIDED: &str = "Not provided";
const WELCOME_SUBJECT: &str = "Welcome to BeyondxIT Newsletter";
const WELCOME_TOPICS: [&str; 4] = [
    "Product updates and new features",
    "Industry insights and trends",
    "Educational content about fintech",
    "Company news and announcements",
];

#[derive(Template)]
#[template(path = "emails/contact-notification.html")]
struct ContactNotificationHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    interest_label: &'a str,
    interest_code: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/contact-notification.txt")]
struct ContactNotificationText<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    interest_label: &'a str,
    interest_code: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "emails/welcome.html")]
struct WelcomeHtml<'a> {
    topics: &'a [&'a str],
}

#[derive(Template)]
#[template(path = "emails/welcome.txt")]
struct WelcomeText<'a> {
    topics: &'a [&'a str],
}

/// Notification for the operations mailbox about a new contact submission.
///
/// User input is HTML-escaped in the HTML body and kept verbatim in the text body.
pub fn contact_notification(
    contact: &NewContact,
    mailbox: &ContactEmail,
) -> Result<MailMessage, askama::Error> {
    let name = contact.full_name();
    let phone = contact.phone.as_ref().map_or(NOT_PROVIDED, |value| value.as_ref());
    let company = contact.company.as_ref().map_or(NOT_PROVIDED, |value| value.as_ref());

    let html_body = ContactNotificationHtml {
        name: &name,
        email: contact.email.as_ref(),
        phone,
        company,
        interest_label: contact.service_interest.label(),
        interest_code: contact.service_interest.code(),
        message: contact.message.as_ref(),
    }
    .render()?;
    let text_body = ContactNotificationText {
        name: &name,
        email: contact.email.as_ref(),
        phone,
        company,
        interest_label: contact.service_interest.label(),
        interest_code: contact.service_interest.code(),
        message: contact.message.as_ref(),
    }
    .render()?;

    Ok(MailMessage {
        to: mailbox.clone(),
        subject: format!(
            "New Contact Form Submission - {}",
            contact.service_interest.code()
        ),
        html_body,
        text_body,
    })
}

/// Welcome message for a new newsletter subscriber.
pub fn welcome_message(subscription: &NewSubscription) -> Result<MailMessage, askama::Error> {
    let html_body = WelcomeHtml {
        topics: &WELCOME_TOPICS,
    }
    .render()?;
    let text_body = WelcomeText {
        topics: &WELCOME_TOPICS,
    }
    .render()?;

    Ok(MailMessage {
        to: subscription.email.clone(),
        subject: WELCOME_SUBJECT.to_string(),
        html_body,
        text_body,
    })
}
