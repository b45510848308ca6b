//! Credentials carried by the `authorization` header.
//!
//! Sign-in sends `Basic base64(username:password)`; every other protected
//! call sends the access token issued at sign-in, optionally prefixed with
//! `Bearer `.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use zeroize::Zeroizing;

/// Reasons a credential header could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Header did not use the `Basic` scheme.
    #[error("authorization header must use the Basic scheme")]
    NotBasic,
    /// Payload was not valid base64 or UTF-8.
    #[error("authorization header is not valid base64")]
    MalformedEncoding,
    /// Decoded payload had no `:` separator.
    #[error("authorization header must encode username:password")]
    MissingSeparator,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// // base64("ada:pw")
/// let creds = LoginCredentials::from_basic_header("Basic YWRhOnB3").unwrap();
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username and password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Decode a `Basic` authorization header value.
    ///
    /// The scheme keyword is matched case-insensitively. Only the first `:`
    /// splits the pair, so passwords may contain colons.
    pub fn from_basic_header(value: &str) -> Result<Self, LoginValidationError> {
        let value = value.trim();
        let (scheme, encoded) = value
            .split_once(' ')
            .ok_or(LoginValidationError::NotBasic)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(LoginValidationError::NotBasic);
        }
        let decoded = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|_| LoginValidationError::MalformedEncoding)?,
        );
        let text =
            std::str::from_utf8(&decoded).map_err(|_| LoginValidationError::MalformedEncoding)?;
        let (username, password) = text
            .split_once(':')
            .ok_or(LoginValidationError::MissingSeparator)?;
        Self::try_from_parts(username, password)
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque access token presented on protected calls.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

/// Raised when the `authorization` header holds no token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("access token must not be empty")]
pub struct EmptyAccessToken;

impl AccessToken {
    /// Parse a header value, stripping an optional `Bearer ` prefix.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::AccessToken;
    ///
    /// let token = AccessToken::from_header("Bearer abc.def.ghi").unwrap();
    /// assert_eq!(token.as_str(), "abc.def.ghi");
    /// assert_eq!(AccessToken::from_header("abc").unwrap().as_str(), "abc");
    /// ```
    pub fn from_header(value: &str) -> Result<Self, EmptyAccessToken> {
        let trimmed = value.trim();
        let token = match trimmed.split_once(' ') {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
            None if trimmed.eq_ignore_ascii_case("bearer") => "",
            _ => trimmed,
        };
        if token.is_empty() {
            return Err(EmptyAccessToken);
        }
        Ok(Self(token.to_owned()))
    }

    /// Wrap a freshly issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn basic(pair: &str) -> String {
        format!("Basic {}", STANDARD.encode(pair))
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_parts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case(&basic("ada:secret"), "ada", "secret")]
    #[case(&basic("ada:with:colons"), "ada", "with:colons")]
    #[case(&format!("basic {}", STANDARD.encode(" ada :pw")), "ada", "pw")]
    fn decodes_basic_headers(#[case] header: &str, #[case] user: &str, #[case] password: &str) {
        let creds = LoginCredentials::from_basic_header(header).expect("valid header");
        assert_eq!(creds.username(), user);
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("Bearer abc", LoginValidationError::NotBasic)]
    #[case("YWRhOnB3", LoginValidationError::NotBasic)]
    #[case("Basic !!!", LoginValidationError::MalformedEncoding)]
    #[case(&basic("no-separator"), LoginValidationError::MissingSeparator)]
    #[case(&basic(":pw"), LoginValidationError::EmptyUsername)]
    #[case(&basic("ada:"), LoginValidationError::EmptyPassword)]
    fn rejects_bad_basic_headers(#[case] header: &str, #[case] expected: LoginValidationError) {
        assert_eq!(
            LoginCredentials::from_basic_header(header).expect_err("must fail"),
            expected
        );
    }

    #[rstest]
    fn debug_output_hides_password() {
        let creds = LoginCredentials::try_from_parts("ada", "hunter2").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("ada"));
        assert!(!rendered.contains("hunter2"));
    }

    #[rstest]
    #[case("Bearer tok", "tok")]
    #[case("bearer   tok ", "tok")]
    #[case("tok", "tok")]
    fn access_token_strips_bearer_prefix(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(
            AccessToken::from_header(header).expect("token").as_str(),
            expected
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("Bearer ")]
    fn access_token_rejects_blank_values(#[case] header: &str) {
        assert_eq!(AccessToken::from_header(header), Err(EmptyAccessToken));
    }
}
