//! Input rules for auth and report requests.
//!
//! Each check returns every failing field at once so clients can show all
//! problems together.

use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;
pub const MAX_SESSION_ID_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration request after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Credentials after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub fn validate_registration(input: &RegisterInput) -> Result<Registration, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let email = normalize_email(&input.email);
    if email.is_none() {
        issues.push(FieldIssue::new("email", "Please provide a valid email"));
    }

    let password = &input.password;
    if password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(FieldIssue::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    } else if !(password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit()))
    {
        issues.push(FieldIssue::new(
            "password",
            "Password must contain at least one lowercase letter, one uppercase letter, and one number",
        ));
    }

    let name = input.name.trim();
    let name_len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&name_len) {
        issues.push(FieldIssue::new(
            "name",
            "Name must be between 2 and 50 characters",
        ));
    } else if !name.chars().all(|c| c.is_ascii_alphabetic() || c.is_whitespace()) {
        issues.push(FieldIssue::new(
            "name",
            "Name can only contain letters and spaces",
        ));
    }

    match email {
        Some(email) if issues.is_empty() => Ok(Registration {
            email,
            password: password.clone(),
            name: name.to_string(),
        }),
        _ => Err(issues),
    }
}

pub fn validate_login(input: &LoginInput) -> Result<Credentials, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let email = normalize_email(&input.email);
    if email.is_none() {
        issues.push(FieldIssue::new("email", "Please provide a valid email"));
    }
    if input.password.is_empty() {
        issues.push(FieldIssue::new("password", "Password is required"));
    }

    match email {
        Some(email) if issues.is_empty() => Ok(Credentials {
            email,
            password: input.password.clone(),
        }),
        _ => Err(issues),
    }
}

pub fn validate_session_id(session_id: &str) -> Result<(), Vec<FieldIssue>> {
    let len = session_id.chars().count();
    if len == 0 || len > MAX_SESSION_ID_LEN {
        return Err(vec![FieldIssue::new(
            "session_id",
            "Session ID must be between 1 and 100 characters",
        )]);
    }
    Ok(())
}

/// Trimmed, lowercased address, or `None` if it does not look like one.
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim();
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return None;
    }

    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.contains('@') {
        return None;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return None;
    }

    Some(email.to_lowercase())
}
