//! Client-side form validation, surfaced inline before any network call.

use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    require(email, "Email")?;
    require(password, "Password")?;
    Ok(())
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<(), ValidationError> {
    require(username, "Username")?;
    require(email, "Email")?;
    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    require(password, "Password")?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_new_book(title: &str, author: &str, content: &str) -> Result<(), ValidationError> {
    require(title, "Title")?;
    require(author, "Author")?;
    require(content, "Content")?;
    Ok(())
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

/// Strength score in `[0, 100]`: 25 points each for length >= 6,
/// length >= 8, an uppercase letter, and a digit.
pub fn password_strength(password: &str) -> u8 {
    let len = password.chars().count();
    let mut strength = 0;
    if len >= 6 {
        strength += 25;
    }
    if len >= 8 {
        strength += 25;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        strength += 25;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 25;
    }
    strength
}

pub fn strength_label(strength: u8) -> &'static str {
    match strength {
        0..=25 => "Weak",
        26..=50 => "Fair",
        51..=75 => "Good",
        _ => "Strong",
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordRequirement {
    pub text: &'static str,
    pub met: bool,
}

/// The checklist shown next to the register form.
pub fn password_requirements(password: &str) -> [PasswordRequirement; 4] {
    let len = password.chars().count();
    [
        PasswordRequirement {
            text: "At least 6 characters",
            met: len >= 6,
        },
        PasswordRequirement {
            text: "At least 8 characters",
            met: len >= 8,
        },
        PasswordRequirement {
            text: "Contains uppercase letter",
            met: password.chars().any(|c| c.is_ascii_uppercase()),
        },
        PasswordRequirement {
            text: "Contains number",
            met: password.chars().any(|c| c.is_ascii_digit()),
        },
    ]
}
