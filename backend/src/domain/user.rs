//! User records, profiles and partial updates.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CompanyId, DepartmentId, UserId};

/// Validation errors for user-supplied identity fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email does not look like `local@domain.tld`.
    #[error("invalid email address")]
    InvalidEmail,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Anchored at the start only; trailing characters after the TLD are tolerated.
        let pattern = r"^[^\[\]\\;,\s]*@[^\[\]\\;,\s]*\.[^\[\]\\;,\s]*";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address accepted at sign-up and sign-in.
///
/// # Examples
/// ```
/// use thing_repository::domain::EmailAddress;
///
/// assert!(EmailAddress::new("a@x.com").is_ok());
/// assert!(EmailAddress::new("not an email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an email address. Surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public user profile. Never carries secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Given name.
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Login email, unique across users.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: String,
    /// Avatar location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Owning company, set together with `department_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<CompanyId>,
    /// Department inside `company_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    /// Whether the email address has been confirmed.
    pub email_is_validated: bool,
    /// Vacation window start, unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacation_time_start: Option<i64>,
    /// Vacation window end, unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacation_time_end: Option<i64>,
}

impl User {
    /// Whether the user is placed in a company or department.
    ///
    /// Either field being set counts; the schema keeps them in lockstep but
    /// a half-placed row must still block reassignment.
    #[must_use]
    pub fn is_affiliated(&self) -> bool {
        self.company_id.is_some() || self.department_id.is_some()
    }
}

/// Stored user row: the profile plus its secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Public part of the record.
    pub profile: User,
    /// Salted password digest.
    pub password_hash: String,
    /// Pending email confirmation token.
    pub email_validation_token: Option<String>,
}

/// Data needed to insert a user at sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: EmailAddress,
    /// Salted password digest.
    pub password_hash: String,
}

/// Company and department a user is placed into. Always set as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Target company.
    pub company_id: CompanyId,
    /// Target department inside the company.
    pub department_id: DepartmentId,
}

/// Partial update of a user row. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New avatar location.
    pub image_url: Option<String>,
    /// New company and department.
    pub placement: Option<Placement>,
}

impl UserPatch {
    /// Patch that only places the user into a company department.
    #[must_use]
    pub fn placement(company_id: CompanyId, department_id: DepartmentId) -> Self {
        Self {
            placement: Some(Placement {
                company_id,
                department_id,
            }),
            ..Self::default()
        }
    }

    /// True when no field would be written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.image_url.is_none()
            && self.placement.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@x.com")]
    #[case("  first.last@sub.example.org ")]
    #[case("weird+tag@host.io")]
    fn accepts_plausible_emails(#[case] raw: &str) {
        let email = EmailAddress::new(raw).expect("valid email");
        assert_eq!(email.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("")]
    #[case("no-at-sign.com")]
    #[case("a@nodot")]
    #[case("a b@x.com")]
    #[case("semi;colon@x.com")]
    fn rejects_malformed_emails(#[case] raw: &str) {
        assert_eq!(EmailAddress::new(raw), Err(UserValidationError::InvalidEmail));
    }

    #[rstest]
    fn conversion_from_string_shares_the_email_check() {
        let err = EmailAddress::try_from("nope".to_owned()).expect_err("no at sign");
        assert_eq!(err.to_string(), "invalid email address");
        let email = EmailAddress::try_from(" a@x.com".to_owned()).expect("valid email");
        assert_eq!(String::from(email), "a@x.com");
    }

    #[rstest]
    fn empty_patch_is_detected() {
        assert!(UserPatch::default().is_empty());
        assert!(!UserPatch::placement(CompanyId::new(1), DepartmentId::new(2)).is_empty());
    }

    #[rstest]
    fn profile_hides_unset_optionals() {
        let user = User {
            id: UserId::new(1),
            first_name: "A".into(),
            last_name: String::new(),
            email: "a@x.com".into(),
            image_url: None,
            company_id: None,
            department_id: None,
            email_is_validated: false,
            vacation_time_start: None,
            vacation_time_end: None,
        };
        let value = serde_json::to_value(&user).expect("serialise");
        assert!(value.get("company_id").is_none());
        assert!(value.get("password_hash").is_none());
        assert!(!user.is_affiliated());
    }
}
