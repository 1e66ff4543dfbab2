use super::contact_email::ContactEmail;
use super::validation::{FieldErrors, SubmittedValue, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub email: ContactEmail,
}

impl NewSubscription {
    /// The stored email is lower-cased so duplicates are caught regardless of case.
    pub fn parse(email: Option<SubmittedValue>) -> Result<Self, ValidationError> {
        let mut errors = FieldErrors::default();
        let email = errors
            .required("email", email)
            .and_then(|email| errors.check("email", ContactEmail::parse_normalized(email)));

        match email {
            Some(email) => Ok(Self { email }),
            None => Err(errors.into_error()),
        }
    }
}
