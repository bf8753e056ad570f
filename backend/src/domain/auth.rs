//! Sign-up and sign-in inputs, plus the per-request identity context.
//!
//! Constructors validate raw strings before a handler talks to a port, so
//! services only ever see well-formed inputs. Passwords are wrapped in
//! [`Zeroizing`] and wiped when dropped.

use zeroize::Zeroizing;

use super::{Credential, CredentialType, EmailAddress, ServiceError, User, UserId};

/// Shortest password accepted anywhere.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Reasons a sign-up or sign-in payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// Email failed the address pattern.
    #[error("invalid email")]
    InvalidEmail,
    /// First name was blank.
    #[error("first name must not be empty")]
    EmptyFirstName,
    /// Password shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("invalid password, too short")]
    PasswordTooShort,
    /// Password lacks a digit.
    #[error("invalid password, no numbers")]
    PasswordMissingDigit,
    /// Password lacks an uppercase letter.
    #[error("invalid password, no uppercase letters")]
    PasswordMissingUppercase,
    /// Password lacks a lowercase letter.
    #[error("invalid password, no lowercase letters")]
    PasswordMissingLowercase,
    /// Sign-in pre-check failed; deliberately vague.
    #[error("invalid username or password")]
    InvalidSignIn,
}

impl CredentialsValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "email",
            Self::EmptyFirstName => "first_name",
            Self::PasswordTooShort
            | Self::PasswordMissingDigit
            | Self::PasswordMissingUppercase
            | Self::PasswordMissingLowercase => "password",
            Self::InvalidSignIn => "user_mail",
        }
    }
}

fn check_password_strength(password: &str) -> Result<(), CredentialsValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CredentialsValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(CredentialsValidationError::PasswordMissingDigit);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(CredentialsValidationError::PasswordMissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(CredentialsValidationError::PasswordMissingLowercase);
    }
    Ok(())
}

/// Validated registration payload.
///
/// # Examples
/// ```
/// use thing_repository::domain::SignUpData;
///
/// let data = SignUpData::try_from_parts("A", "", "a@x.com", "Secret123").unwrap();
/// assert_eq!(data.email().as_ref(), "a@x.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpData {
    first_name: String,
    last_name: String,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SignUpData {
    /// Validate raw registration fields.
    pub fn try_from_parts(
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(CredentialsValidationError::EmptyFirstName);
        }
        let email =
            EmailAddress::new(email).map_err(|_| CredentialsValidationError::InvalidEmail)?;
        check_password_strength(password)?;

        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: last_name.trim().to_owned(),
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name, possibly empty.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plain-text password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-in payload.
///
/// Only the cheap pre-checks run here: a blank mail or a short password is
/// rejected with the same vague error the service uses for a wrong password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Validate raw sign-in fields.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = email.trim();
        if email.is_empty() || password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CredentialsValidationError::InvalidSignIn);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the user lookup.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plain-text password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Result of a successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Profile of the authenticated user.
    pub user: User,
    /// Signed bearer token.
    pub token: String,
}

/// Identity attached to a request by the bearer-token extractor.
///
/// Both parts are optional so that a wiring mistake (a handler reached
/// without authentication) surfaces as [`ServiceError::InvalidContext`]
/// rather than a panic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user_id: Option<UserId>,
    credentials: Option<Vec<Credential>>,
}

impl AuthContext {
    /// Context for an authenticated user.
    #[must_use]
    pub fn authenticated(user_id: UserId, credentials: Vec<Credential>) -> Self {
        Self {
            user_id: Some(user_id),
            credentials: Some(credentials),
        }
    }

    /// Context with nothing attached.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Acting user id.
    pub fn user_id(&self) -> Result<UserId, ServiceError> {
        self.user_id.ok_or(ServiceError::InvalidContext)
    }

    /// Credential snapshot taken when the token was issued.
    pub fn credentials(&self) -> Result<&[Credential], ServiceError> {
        self.credentials
            .as_deref()
            .ok_or(ServiceError::InvalidContext)
    }

    /// Fail with [`ServiceError::BadPermissions`] unless the snapshot holds
    /// `credential_type` on `object_id`.
    pub fn require(
        &self,
        credential_type: CredentialType,
        object_id: i64,
    ) -> Result<(), ServiceError> {
        let held = self
            .credentials()?
            .iter()
            .any(|grant| grant.grants(credential_type, object_id));
        if held {
            Ok(())
        } else {
            Err(ServiceError::BadPermissions)
        }
    }
}
