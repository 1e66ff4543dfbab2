use super::contact_email::ContactEmail;
use super::free_text::{CompanyName, ContactMessage, PhoneNumber};
use super::person_name::PersonName;
use super::service_interest::ServiceInterest;
use super::validation::{FieldErrors, SubmittedValue, ValidationError};

/// Contact form fields as received, before any validation.
#[derive(Debug, Default, Clone)]
pub struct ContactSubmission {
    pub first_name: Option<SubmittedValue>,
    pub last_name: Option<SubmittedValue>,
    pub email: Option<SubmittedValue>,
    pub phone: Option<SubmittedValue>,
    pub company: Option<SubmittedValue>,
    pub service_interest: Option<SubmittedValue>,
    pub message: Option<SubmittedValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: ContactEmail,
    pub phone: Option<PhoneNumber>,
    pub company: Option<CompanyName>,
    pub service_interest: ServiceInterest,
    pub message: ContactMessage,
}

impl NewContact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.as_ref(), self.last_name.as_ref())
    }
}

impl TryFrom<ContactSubmission> for NewContact {
    type Error = ValidationError;

    fn try_from(submission: ContactSubmission) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();

        let first_name = errors
            .required("firstName", submission.first_name)
            .and_then(|name| errors.check("firstName", PersonName::parse(name)));
        let last_name = errors
            .required("lastName", submission.last_name)
            .and_then(|name| errors.check("lastName", PersonName::parse(name)));
        let email = errors
            .required("email", submission.email)
            .and_then(|email| errors.check("email", ContactEmail::parse(email)));
        let phone = errors
            .optional("phone", submission.phone)
            .and_then(|phone| match phone {
                Some(phone) => errors.check("phone", PhoneNumber::parse(phone)).map(Some),
                None => Some(None),
            });
        let company = errors
            .optional("company", submission.company)
            .and_then(|company| match company {
                Some(company) => errors.check("company", CompanyName::parse(company)).map(Some),
                None => Some(None),
            });
        let service_interest = errors
            .required("serviceInterest", submission.service_interest)
            .and_then(|code| errors.check("serviceInterest", ServiceInterest::parse(&code)));
        let message = errors
            .required("message", submission.message)
            .and_then(|message| errors.check("message", ContactMessage::parse(message)));

        match (first_name, last_name, email, phone, company, service_interest, message) {
            (
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(phone),
                Some(company),
                Some(service_interest),
                Some(message),
            ) => Ok(Self {
                first_name,
                last_name,
                email,
                phone,
                company,
                service_interest,
                message,
            }),
            _ => Err(errors.into_error()),
        }
    }
}
