use std::fmt;

use thiserror::Error;

/// Error for RequiredText validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequiredTextError {
    #[error("must not be blank")]
    Blank,
}

/// Trimmed text that is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn new(text: &str) -> Result<Self, RequiredTextError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RequiredTextError::Blank);
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trim optional text, treating blank as absent.
pub fn optional_text(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
