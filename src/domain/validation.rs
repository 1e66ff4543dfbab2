use std::fmt::Display;

/// A single violated field, named the way the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// A field as it arrived in the JSON body. Non-string values are kept apart so they
/// surface as a field error instead of rejecting the whole body.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum SubmittedValue {
    Text(String),
    NotText(serde::de::IgnoredAny),
}

impl From<String> for SubmittedValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SubmittedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

const EXPECTED_STRING: &str = "Expected string";

/// Every field that failed validation for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Validation error: ")?;
        for (idx, err) in self.errors.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} at \"{}\"", err.message, err.field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Accumulates field errors so a submission reports all of them at once.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub(crate) fn check<T, E>(&mut self, field: &'static str, result: Result<T, E>) -> Option<T>
    where
        E: Display,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(field, err.to_string());
                None
            }
        }
    }

    /// Missing and blank values are both reported as `Required`.
    pub(crate) fn required(
        &mut self,
        field: &'static str,
        value: Option<SubmittedValue>,
    ) -> Option<String> {
        match value {
            Some(SubmittedValue::Text(value)) if !value.trim().is_empty() => Some(value),
            Some(SubmittedValue::NotText(_)) => {
                self.push(field, EXPECTED_STRING.to_string());
                None
            }
            _ => {
                self.push(field, "Required".to_string());
                None
            }
        }
    }

    /// `Some(None)` when the field is absent or blank, `None` when it has the wrong type.
    pub(crate) fn optional(
        &mut self,
        field: &'static str,
        value: Option<SubmittedValue>,
    ) -> Option<Option<String>> {
        match value {
            Some(SubmittedValue::Text(value)) if !value.trim().is_empty() => Some(Some(value)),
            Some(SubmittedValue::NotText(_)) => {
                self.push(field, EXPECTED_STRING.to_string());
                None
            }
            _ => Some(None),
        }
    }

    pub(crate) fn push(&mut self, field: &'static str, message: String) {
        self.0.push(FieldError { field, message });
    }

    pub(crate) fn into_error(self) -> ValidationError {
        ValidationError { errors: self.0 }
    }
}
