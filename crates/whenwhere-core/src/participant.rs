//! Participant identity and welcome-form validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Syntactic email check only: local-part, "@", domain with at least one
/// dot. No deliverability check.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Who is taking the study. Created at the welcome step and immutable
/// for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantIdentity {
    pub name: String,
    pub email: String,
}

/// Field-level validation errors for the welcome form.
///
/// Shown next to the offending field; the step does not advance while
/// any error is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFieldErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl IdentityFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl ParticipantIdentity {
    /// Validates and constructs an identity from raw form input.
    ///
    /// Both fields are trimmed. Name must be non-empty; email must match
    /// the syntactic pattern. On failure, returns errors for every
    /// offending field at once.
    pub fn validate(name: &str, email: &str) -> Result<Self, IdentityFieldErrors> {
        let name = name.trim();
        let email = email.trim();

        let mut errors = IdentityFieldErrors::default();
        if name.is_empty() {
            errors.name = Some("Please enter your name".to_string());
        }
        if email.is_empty() {
            errors.email = Some("Please enter your email".to_string());
        } else if !EMAIL_PATTERN.is_match(email) {
            errors.email = Some("Please enter a valid email".to_string());
        }

        if errors.is_empty() {
            Ok(Self {
                name: name.to_string(),
                email: email.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identity_is_trimmed() {
        let identity = ParticipantIdentity::validate("  Ann ", " ann@example.com ").unwrap();
        assert_eq!(identity.name, "Ann");
        assert_eq!(identity.email, "ann@example.com");
    }

    #[test]
    fn test_empty_name_reports_name_field_only() {
        let errors = ParticipantIdentity::validate("", "a@b.com").unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.email.is_none());
    }

    #[test]
    fn test_bad_email_reports_email_field_only() {
        let errors = ParticipantIdentity::validate("Ann", "not-an-email").unwrap_err();
        assert!(errors.name.is_none());
        assert!(errors.email.is_some());
    }

    #[test]
    fn test_both_fields_reported_at_once() {
        let errors = ParticipantIdentity::validate("   ", "").unwrap_err();
        assert!(errors.name.is_some());
        assert!(errors.email.is_some());
    }

    #[test]
    fn test_email_requires_dot_in_domain() {
        assert!(ParticipantIdentity::validate("Ann", "ann@localhost").is_err());
        assert!(ParticipantIdentity::validate("Ann", "ann@example.co").is_ok());
    }

    #[test]
    fn test_email_rejects_whitespace() {
        assert!(ParticipantIdentity::validate("Ann", "a nn@example.com").is_err());
    }
}
