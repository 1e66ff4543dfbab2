use validator::validate_email;

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    const MAX_LENGTH: usize = 254;

    pub fn parse(email: String) -> Result<Self, EmailParseError> {
        let email = email.trim();
        if email.is_empty() {
            Err(EmailParseError::Empty)
        } else if email.len() > Self::MAX_LENGTH {
            Err(EmailParseError::TooLong)
        } else if !validate_email(email) {
            Err(EmailParseError::Invalid)
        } else {
            Ok(Self(email.to_string()))
        }
    }

    /// Parses and lower-cases the address, used as a uniqueness key.
    pub fn parse_normalized(email: String) -> Result<Self, EmailParseError> {
        Self::parse(email.to_lowercase())
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmailParseError {
    #[error("Required")]
    Empty,
    #[error("Email must be at most {} characters", ContactEmail::MAX_LENGTH)]
    TooLong,
    #[error("Invalid email")]
    Invalid,
}
