//! User accounts and registration input.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::UserId;

/// Maximum length of a user name.
pub const USERNAME_MAX: usize = 30;
/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 254;

/// Profile text fields with a storage limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FirstName,
    LastName,
    Country,
    Dob,
    ContactNumber,
}

impl ProfileField {
    /// Largest number of characters the field may hold.
    pub const fn max_len(self) -> usize {
        match self {
            Self::FirstName | Self::LastName => 100,
            Self::Country => 60,
            Self::Dob | Self::ContactNumber => 30,
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Country => "country",
            Self::Dob => "date of birth",
            Self::ContactNumber => "contact number",
        })
    }
}

/// Validation errors raised while building user values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user name must not be empty")]
    EmptyUsername,
    #[error("user name must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("user name may only contain letters, numbers, '_', '.' or '-'")]
    UsernameInvalidCharacters,
    #[error("email address must not be empty")]
    EmptyEmail,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("first name must not be empty")]
    EmptyFirstName,
    #[error("last name must not be empty")]
    EmptyLastName,
    #[error("{field} must be at most {max} characters")]
    ProfileFieldTooLong { field: ProfileField, max: usize },
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("unknown user role: {0}")]
    UnknownRole(String),
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("user name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Username;
    ///
    /// assert!(Username::new("ada.l").is_ok());
    /// assert!(Username::new("ada lovelace").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique contact email, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(value: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.len() > EMAIL_MAX || !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
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

/// Authorisation role attached to every account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// May delete users and any question or answer.
    Admin,
    /// Regular member.
    NonAdmin,
}

impl UserRole {
    /// Storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::NonAdmin => "nonadmin",
        }
    }

    /// Whether the role grants administrative rights.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "nonadmin" => Ok(Self::NonAdmin),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Stored password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Personal details shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub about_me: Option<String>,
    pub dob: Option<String>,
    pub contact_number: Option<String>,
}

impl UserProfile {
    /// Build a profile, requiring both names.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let first_name = first_name.into().trim().to_owned();
        if first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        let last_name = last_name.into().trim().to_owned();
        if last_name.is_empty() {
            return Err(UserValidationError::EmptyLastName);
        }
        let first_name = within_limit(first_name, ProfileField::FirstName)?;
        let last_name = within_limit(last_name, ProfileField::LastName)?;
        Ok(Self {
            first_name,
            last_name,
            ..Self::default()
        })
    }

    /// Attach the optional fields, dropping blank ones.
    ///
    /// `about_me` is unbounded; the others are length checked.
    pub fn with_details(
        mut self,
        country: Option<String>,
        about_me: Option<String>,
        dob: Option<String>,
        contact_number: Option<String>,
    ) -> Result<Self, UserValidationError> {
        self.country = non_blank(country)
            .map(|v| within_limit(v, ProfileField::Country))
            .transpose()?;
        self.about_me = non_blank(about_me);
        self.dob = non_blank(dob)
            .map(|v| within_limit(v, ProfileField::Dob))
            .transpose()?;
        self.contact_number = non_blank(contact_number)
            .map(|v| within_limit(v, ProfileField::ContactNumber))
            .transpose()?;
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn within_limit(value: String, field: ProfileField) -> Result<String, UserValidationError> {
    let max = field.max_len();
    if value.chars().count() > max {
        return Err(UserValidationError::ProfileFieldTooLong { field, max });
    }
    Ok(value)
}

/// Persisted account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub profile: UserProfile,
    pub role: UserRole,
    pub password_hash: PasswordDigest,
    pub created_at: DateTime<Utc>,
}

/// Validated signup input, before the password has been hashed.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: Username,
    pub email: EmailAddress,
    pub profile: UserProfile,
    password: Zeroizing<String>,
}

impl Registration {
    /// Combine validated parts with the caller's plaintext password.
    pub fn new(
        username: Username,
        email: EmailAddress,
        profile: UserProfile,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            email,
            profile,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Plaintext password, wiped on drop.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
