use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Requires a dotted domain, so `local@domain` without a TLD is rejected.
pub static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// One contact-form submission. Lives for a single request; it is turned
/// into an outbound email and dropped, never stored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ContactSubmission {
    #[validate(custom(function = "not_blank"), length(max = 100, message = "must be at most 100 characters"))]
    pub name: String,

    #[validate(custom(function = "not_blank"), regex(path = *EMAIL_RE, message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(max = 30, message = "must be at most 30 characters"))]
    pub phone: Option<String>,

    #[validate(custom(function = "not_blank"), length(max = 200, message = "must be at most 200 characters"))]
    pub subject: String,

    #[validate(custom(function = "not_blank"), length(max = 5000, message = "must be at most 5000 characters"))]
    pub message: String,
}

impl ContactSubmission {
    /// Trims every field and canonicalizes the email (domain lower-cased).
    /// Run before validation so whitespace-only input counts as empty.
    pub fn normalized(self) -> Self {
        ContactSubmission {
            name: self.name.trim().to_string(),
            email: normalize_email(self.email.trim()),
            phone: self.phone.map(|p| p.trim().to_string()),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

impl Default for ContactSubmission {
    // absent JSON keys deserialize to empty strings, so validation can name
    // the missing field instead of the extractor rejecting the body
    fn default() -> Self {
        ContactSubmission {
            name: String::new(),
            email: String::new(),
            phone: None,
            subject: String::new(),
            message: String::new(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> ContactSubmission {
        ContactSubmission {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: Some("4045551234".into()),
            subject: "Hello".into(),
            message: "Hi there".into(),
        }
    }

    #[test]
    fn accepts_a_valid_submission() {
        assert!(valid_submission().normalized().validate().is_ok());
    }

    #[test]
    fn rejects_whitespace_only_required_fields() {
        let mut form = valid_submission();
        form.name = "   ".into();
        let errors = form.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn rejects_email_without_tld() {
        let mut form = valid_submission();
        form.email = "jane@example".into();
        let errors = form.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn rejects_overlong_message() {
        let mut form = valid_submission();
        form.message = "x".repeat(5001);
        let errors = form.normalized().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("message"));
    }

    #[test]
    fn lowercases_the_email_domain_only() {
        let mut form = valid_submission();
        form.email = "  Jane@EXAMPLE.Com ".into();
        assert_eq!(form.normalized().email, "Jane@example.com");
    }
}
