//! Request validation failures rendered as `invalid_request` payloads.
//!
//! Every payload carries `details: {field, code}` so clients can point at
//! the offending input.

use serde_json::json;

use crate::domain::{CredentialsValidationError, Error};

/// Machine-readable reason attached to a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidEmail,
    EmptyField,
    PasswordTooShort,
    PasswordMissingDigit,
    PasswordMissingUppercase,
    PasswordMissingLowercase,
    InvalidCredentials,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::EmptyField => "empty_field",
            Self::PasswordTooShort => "password_too_short",
            Self::PasswordMissingDigit => "password_missing_digit",
            Self::PasswordMissingUppercase => "password_missing_uppercase",
            Self::PasswordMissingLowercase => "password_missing_lowercase",
            Self::InvalidCredentials => "invalid_credentials",
        }
    }
}

pub(crate) fn validation_error(
    field: &str,
    code: ValidationCode,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Reject a blank required text field.
pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(validation_error(
            field,
            ValidationCode::EmptyField,
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}

pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let code = match err {
        CredentialsValidationError::InvalidEmail => ValidationCode::InvalidEmail,
        CredentialsValidationError::EmptyFirstName => ValidationCode::EmptyField,
        CredentialsValidationError::PasswordTooShort => ValidationCode::PasswordTooShort,
        CredentialsValidationError::PasswordMissingDigit => ValidationCode::PasswordMissingDigit,
        CredentialsValidationError::PasswordMissingUppercase => {
            ValidationCode::PasswordMissingUppercase
        }
        CredentialsValidationError::PasswordMissingLowercase => {
            ValidationCode::PasswordMissingLowercase
        }
        CredentialsValidationError::InvalidSignIn => ValidationCode::InvalidCredentials,
    };
    validation_error(err.field(), code, err.to_string())
}
