use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_GRAPHEMES: usize = 256;

    pub fn parse(name: String) -> Result<Self, PersonNameParseError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(PersonNameParseError::Empty);
        }
        if name.graphemes(true).count() > Self::MAX_GRAPHEMES {
            return Err(PersonNameParseError::TooLong);
        }

        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersonNameParseError {
    #[error("Required")]
    Empty,
    #[error("Name must be at most {} characters", PersonName::MAX_GRAPHEMES)]
    TooLong,
}
