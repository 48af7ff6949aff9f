use std::borrow::Cow;
use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{CreateAccountRequest, LoginRequest};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_NAME_LENGTH: usize = 2;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern");
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    fn from_struct_field(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "password" => Some(Field::Password),
            "confirm_password" => Some(Field::ConfirmPassword),
            _ => None,
        }
    }
}

/// Validation messages keyed by field. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(report: ValidationErrors) -> Self {
        let mut field_errors = FieldErrors::default();
        for (name, errors) in report.field_errors() {
            let Some(field) = Field::from_struct_field(&name) else {
                continue;
            };
            // one message per field, the first rule that failed
            if let Some(error) = errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |message| message.to_string());
                field_errors.insert(field, message);
            }
        }
        field_errors
    }
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Length is counted in `char`s, not bytes or UTF-16 units.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Placeholder identity: everything before the first `@`.
pub fn display_name(email: &str) -> String {
    email
        .split_once('@')
        .map_or(email, |(local, _)| local)
        .to_string()
}

fn check_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(rule("required", "Name is required"));
    }
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(rule("length", "Name must be at least 2 characters"));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(rule("required", "Email is required"));
    }
    if !validate_email(email) {
        return Err(rule("email", "Please enter a valid email address"));
    }
    Ok(())
}

fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(rule("required", "Password is required"));
    }
    if !validate_password(password) {
        return Err(rule("length", "Password must be at least 6 characters"));
    }
    Ok(())
}

fn check_password_present(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(rule("required", "Password is required"));
    }
    Ok(())
}

fn check_confirmation(password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    if confirm_password.is_empty() {
        return Err(rule("required", "Please confirm your password"));
    }
    if password != confirm_password {
        return Err(rule("must_match", "Passwords do not match"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct SignUpForm {
    #[validate(custom(function = "check_name"))]
    pub name: String,
    #[validate(custom(function = "check_email"))]
    pub email: String,
    #[validate(custom(function = "check_password"))]
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate_form(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(errors) => errors.into(),
        };
        if let Err(error) = check_confirmation(&self.password, &self.confirm_password) {
            if let Some(message) = error.message {
                errors.insert(Field::ConfirmPassword, message);
            }
        }
        errors
    }

    pub fn to_request(&self) -> CreateAccountRequest {
        CreateAccountRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct SignInForm {
    #[validate(custom(function = "check_email"))]
    pub email: String,
    #[validate(custom(function = "check_password_present"))]
    pub password: String,
}

impl SignInForm {
    pub fn validate_form(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(errors) => errors.into(),
        }
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn sign_up(name: &str, email: &str, password: &str, confirm_password: &str) -> SignUpForm {
        SignUpForm {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    fn sign_in(email: &str, password: &str) -> SignInForm {
        SignInForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[rstest]
    #[case("plainaddress")]
    #[case("no-at.example.com")]
    #[case("user@localhost")]
    #[case("user@domain.")]
    #[case("@example.com")]
    #[case("user@@example.com")]
    #[case("us er@example.com")]
    #[case("user@exa mple.com")]
    #[case("a@b@c.com")]
    #[case("")]
    fn test_email_rejected(#[case] email: &str) {
        assert!(!validate_email(email));
    }

    #[rstest]
    #[case("a@b.com")]
    #[case("jane.doe@example.co.uk")]
    #[case("first+tag@sub.domain.io")]
    fn test_email_accepted(#[case] email: &str) {
        assert!(validate_email(email));
    }

    #[rstest]
    #[case("", false)]
    #[case("abc", false)]
    #[case("abcde", false)]
    #[case("secret", true)]
    #[case("      ", true)]
    #[case("a much longer passphrase", true)]
    #[case("ééééé", false)]
    #[case("🔒🔒🔒🔒🔒🔒", true)]
    fn test_password_length(#[case] password: &str, #[case] valid: bool) {
        assert_eq!(validate_password(password), valid);
    }

    #[test]
    fn test_valid_sign_up_has_no_errors() {
        let form = sign_up("Jo", "a@b.com", "secret", "secret");
        let errors = form.validate_form();
        assert!(errors.is_valid());
    }

    #[test]
    fn test_short_password_reported() {
        let form = sign_up("Jo", "a@b.com", "abc", "abc");
        let errors = form.validate_form();
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_empty_sign_up_reports_required_fields() {
        let errors = SignUpForm::default().validate_form();
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some("Please confirm your password")
        );
    }

    #[rstest]
    #[case("   ", "Name is required")]
    #[case("J", "Name must be at least 2 characters")]
    #[case(" J ", "Name must be at least 2 characters")]
    fn test_name_rules(#[case] name: &str, #[case] message: &str) {
        let errors = sign_up(name, "a@b.com", "secret", "secret").validate_form();
        assert_eq!(errors.get(Field::Name), Some(message));
    }

    #[rstest]
    #[case("   ", "Email is required")]
    #[case("not-an-email", "Please enter a valid email address")]
    fn test_email_rules(#[case] email: &str, #[case] message: &str) {
        let errors = sign_up("Jo", email, "secret", "secret").validate_form();
        assert_eq!(errors.get(Field::Email), Some(message));
    }

    #[rstest]
    #[case("secret", "Secret")]
    #[case("secret", "secret ")]
    #[case("secret1", "secret")]
    fn test_mismatched_confirmation(#[case] password: &str, #[case] confirm: &str) {
        let errors = sign_up("Jo", "a@b.com", password, confirm).validate_form();
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_sign_in_does_not_check_length() {
        let errors = sign_in("a@b.com", "abc").validate_form();
        assert!(errors.is_valid());
    }

    #[test]
    fn test_sign_in_requires_fields() {
        let errors = sign_in("", "").validate_form();
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec![Field::Email, Field::Password]
        );
    }

    #[test]
    fn test_validation_leaves_form_untouched() {
        let form = sign_up(" Jo ", "a@b.com", "secret", "secret");
        let before = form.clone();
        let _ = form.validate_form();
        assert_eq!(form, before);
    }

    #[test]
    fn test_field_wire_names() {
        assert_eq!(Field::ConfirmPassword.as_ref(), "confirmPassword");
        assert_eq!(Field::Email.as_ref(), "email");
    }

    #[rstest]
    #[case("jane@example.com", "jane")]
    #[case("no-at-sign", "no-at-sign")]
    #[case("@example.com", "")]
    fn test_display_name(#[case] email: &str, #[case] expected: &str) {
        assert_eq!(display_name(email), expected);
    }
}
