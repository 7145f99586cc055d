//! Sign-up form validation and input sanitisation.
//!
//! Every rule is checked against the raw submitted values and all failures
//! are collected, so the form can show the complete list at once. Values
//! that survive validation are sanitised before they reach the store.

use crate::domain::user::{NewUser, SignUpForm};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NAME_LEN: usize = 30;

lazy_static! {
    /// Local part, then a domain with at least one dot-separated label after
    /// the host (a TLD is required).
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"
    ).unwrap();
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Trims the value and HTML-escapes the characters that are meaningful in
/// markup or attribute values.
pub fn sanitize(value: &str) -> String {
    let trimmed = value.trim();
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// The form in which emails are stored and looked up.
pub fn canonical_email(email: &str) -> String {
    sanitize(email).to_lowercase()
}

fn check_name(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: &str,
    missing: &str,
    not_alphanumeric: &str,
) {
    if value.is_empty() {
        errors.push(FieldError::new(field, missing));
    }
    if !is_alphanumeric(value) {
        errors.push(FieldError::new(field, not_alphanumeric));
    }
    if value.chars().count() > MAX_NAME_LEN {
        errors.push(FieldError {
            field,
            message: format!("{} must be at most {} characters", label(field), MAX_NAME_LEN),
        });
    }
}

fn label(field: &str) -> &'static str {
    match field {
        "first_name" => "First name",
        "surname" => "Surname",
        _ => "Field",
    }
}

pub fn validate_sign_up(form: &SignUpForm) -> Result<NewUser, Vec<FieldError>> {
    let mut errors = Vec::new();

    check_name(
        &mut errors,
        "first_name",
        &form.first_name,
        "First name must be specified",
        "First name must be alphanumeric",
    );
    check_name(
        &mut errors,
        "surname",
        &form.surname,
        "Surname must be specified",
        "Surname must be alphanumeric",
    );

    if !is_valid_email(&form.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if form.confirm_email != form.email {
        errors.push(FieldError::new("confirm_email", "Email addresses do not match"));
    }

    if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Invalid password! Password must be a minimum of 6 characters",
        ));
    }
    if form.confirm_password != form.password {
        errors.push(FieldError::new("confirm_password", "Passwords do not match"));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Passwords go to the hasher untouched; escaping them would make the
    // stored credential differ from what the user types at login.
    Ok(NewUser {
        first_name: sanitize(&form.first_name),
        surname: sanitize(&form.surname),
        email: canonical_email(&form.email),
        password: form.password.clone(),
        is_admin: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignUpForm {
        SignUpForm {
            first_name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            email: "Ada@Example.com".to_string(),
            confirm_email: "Ada@Example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    fn messages(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_valid_form_produces_new_user() {
        let user = validate_sign_up(&valid_form()).unwrap();
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.surname, "Lovelace");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.password, "secret1");
        assert!(!user.is_admin);
    }

    #[test]
    fn test_empty_form_collects_every_error() {
        let errors = validate_sign_up(&SignUpForm::default()).unwrap_err();
        let msgs = messages(&errors);
        assert!(msgs.contains(&"First name must be specified"));
        assert!(msgs.contains(&"First name must be alphanumeric"));
        assert!(msgs.contains(&"Surname must be specified"));
        assert!(msgs.contains(&"Surname must be alphanumeric"));
        assert!(msgs.contains(&"Invalid email address"));
        assert!(msgs.contains(&"Invalid password! Password must be a minimum of 6 characters"));
        // Empty confirmations match empty originals.
        assert!(!msgs.contains(&"Email addresses do not match"));
        assert!(!msgs.contains(&"Passwords do not match"));
    }

    #[test]
    fn test_mismatched_email_rejected() {
        let mut form = valid_form();
        form.confirm_email = "other@example.com".to_string();
        let errors = validate_sign_up(&form).unwrap_err();
        assert_eq!(messages(&errors), vec!["Email addresses do not match"]);
        assert_eq!(errors[0].field, "confirm_email");
    }

    #[test]
    fn test_mismatched_password_rejected() {
        let mut form = valid_form();
        form.confirm_password = "secret2".to_string();
        let errors = validate_sign_up(&form).unwrap_err();
        assert_eq!(messages(&errors), vec!["Passwords do not match"]);
    }

    #[test]
    fn test_short_password_rejected() {
        let mut form = valid_form();
        form.password = "abc".to_string();
        form.confirm_password = "abc".to_string();
        let errors = validate_sign_up(&form).unwrap_err();
        assert_eq!(
            messages(&errors),
            vec!["Invalid password! Password must be a minimum of 6 characters"]
        );
    }

    #[test]
    fn test_non_alphanumeric_names_rejected() {
        let mut form = valid_form();
        form.first_name = "Ada-Marie".to_string();
        form.surname = "<b>".to_string();
        let errors = validate_sign_up(&form).unwrap_err();
        assert_eq!(
            messages(&errors),
            vec!["First name must be alphanumeric", "Surname must be alphanumeric"]
        );
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut form = valid_form();
        form.surname = "a".repeat(MAX_NAME_LEN + 1);
        let errors = validate_sign_up(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "surname");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("guest@hotel.co.uk"));
        assert!(is_valid_email("first.last+tag@example.org"));
        assert!(!is_valid_email("guest@localhost"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_sanitize_trims_and_escapes() {
        assert_eq!(sanitize("  plain  "), "plain");
        assert_eq!(
            sanitize("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(sanitize("a & b"), "a &amp; b");
    }

    #[test]
    fn test_canonical_email_lowercases() {
        assert_eq!(canonical_email(" Guest@Example.COM "), "guest@example.com");
    }
}
