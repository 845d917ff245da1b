use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Basic email shape check: something before the `@`, a host, and a dot.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// Validation failures carry the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    EmptyName,
    #[error("Please enter your email address")]
    EmptyEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a subject")]
    EmptySubject,
    #[error("Please enter a message")]
    EmptyMessage,
}

/// The four fields a contact submission carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Checks fields in form order; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmptyEmail);
        }
        if !email_regex().is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(())
    }
}
