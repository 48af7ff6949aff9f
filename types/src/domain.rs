use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Normalised outcome of a call to the authentication backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success { data: Value },
    Failure { error: String },
}

impl SubmissionResult {
    pub fn failure(error: impl Into<String>) -> Self {
        SubmissionResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionResult::Success { .. } => None,
            SubmissionResult::Failure { error } => Some(error),
        }
    }
}

/// Who is shown in the header after a successful sign in.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedInUser {
    pub name: String,
    pub email: String,
}

impl SignedInUser {
    pub fn from_email(email: &str) -> Self {
        Self {
            name: crate::form::display_name(email),
            email: email.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_failure_exposes_error() {
        let result = SubmissionResult::failure("Invalid credentials");
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("Invalid credentials"));
    }

    #[test]
    fn test_success_has_no_error() {
        let result = SubmissionResult::Success {
            data: json!({"id": "1"}),
        };
        assert!(result.is_success());
        assert_eq!(result.error(), None);
    }

    #[test]
    fn test_create_account_request_body() {
        let request = CreateAccountRequest {
            name: "Jo".to_string(),
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"name": "Jo", "email": "a@b.com", "password": "secret"})
        );
    }

    #[test]
    fn test_signed_in_user_uses_email_prefix() {
        let user = SignedInUser::from_email("jane.doe@example.com");
        assert_eq!(user.name, "jane.doe");
        assert_eq!(user.email, "jane.doe@example.com");
    }
}
