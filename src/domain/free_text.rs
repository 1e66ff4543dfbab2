//! Free-form text fields of a contact submission.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, thiserror::Error)]
pub enum TextParseError {
    #[error("Required")]
    Empty,
    #[error("Must be at most {0} characters")]
    TooLong(usize),
}

fn bounded(value: String, max_graphemes: usize) -> Result<String, TextParseError> {
    let value = value.trim();
    if value.is_empty() {
        Err(TextParseError::Empty)
    } else if value.graphemes(true).count() > max_graphemes {
        Err(TextParseError::TooLong(max_graphemes))
    } else {
        Ok(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    const MAX_GRAPHEMES: usize = 5000;

    pub fn parse(message: String) -> Result<Self, TextParseError> {
        bounded(message, Self::MAX_GRAPHEMES).map(Self)
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MAX_GRAPHEMES: usize = 64;

    /// Any free-form text is accepted, only the length is bounded.
    pub fn parse(phone: String) -> Result<Self, TextParseError> {
        bounded(phone, Self::MAX_GRAPHEMES).map(Self)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyName(String);

impl CompanyName {
    const MAX_GRAPHEMES: usize = 256;

    pub fn parse(company: String) -> Result<Self, TextParseError> {
        bounded(company, Self::MAX_GRAPHEMES).map(Self)
    }
}

impl AsRef<str> for CompanyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
