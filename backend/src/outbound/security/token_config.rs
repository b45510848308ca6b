//! Access-token signing configuration.
//!
//! The HMAC key is read from a file so it can be mounted as a secret. Debug
//! builds fall back to a random key with a warning; release builds refuse to
//! start without a key of at least [`TOKEN_KEY_MIN_LEN`] bytes.

pub mod fingerprint;

use std::path::PathBuf;

use chrono::Duration;
use mockable::Env;
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

const TOKEN_KEY_DEFAULT_PATH: &str = "/var/run/secrets/token_key";
/// Minimum key length accepted in release builds.
pub const TOKEN_KEY_MIN_LEN: usize = 64;
const TOKEN_TTL_DEFAULT_HOURS: i64 = 8;
const KEY_FILE_ENV: &str = "TOKEN_KEY_FILE";
const TTL_HOURS_ENV: &str = "TOKEN_TTL_HOURS";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const HOURS_EXPECTED: &str = "a positive whole number of hours";

/// Build mode for token configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing key file.
    Debug,
    /// Release builds require an explicit, long enough key.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use backend::outbound::security::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated token settings.
pub struct TokenSettings {
    /// HMAC signing secret, wiped on drop.
    pub key: Zeroizing<Vec<u8>>,
    /// Lifetime of issued tokens and their session rows.
    pub ttl: Duration,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("key", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read token key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use backend::outbound::security::token_config::{BuildMode, token_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("token_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
///
/// let key_path = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_KEY_FILE" => Some(key_path.clone()),
///     "TOKEN_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     "TOKEN_TTL_HOURS" => Some("2".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.ttl, chrono::Duration::hours(2));
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let ttl = ttl_from_env(env)?;
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let key = token_key_from_env(env, mode, allow_ephemeral)?;
    Ok(TokenSettings { key, ttl })
}

fn ttl_from_env<E: Env>(env: &E) -> Result<Duration, TokenConfigError> {
    let Some(value) = env.string(TTL_HOURS_ENV) else {
        return Ok(Duration::hours(TOKEN_TTL_DEFAULT_HOURS));
    };
    match value.trim().parse::<i64>() {
        Ok(hours) if hours > 0 => Ok(Duration::hours(hours)),
        _ => Err(TokenConfigError::InvalidEnv {
            name: TTL_HOURS_ENV,
            value,
            expected: HOURS_EXPECTED,
        }),
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    match env.string(ALLOW_EPHEMERAL_ENV) {
        Some(value) => match parse_bool(&value) {
            Some(true) if mode.is_debug() => Ok(true),
            Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
            Some(false) => Ok(false),
            None if mode.is_debug() => {
                warn!(
                    value = %value,
                    "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled"
                );
                Ok(false)
            }
            None => Err(TokenConfigError::InvalidEnv {
                name: ALLOW_EPHEMERAL_ENV,
                value,
                expected: BOOL_EXPECTED,
            }),
        },
        None if mode.is_debug() => Ok(false),
        None => Err(TokenConfigError::MissingEnv {
            name: ALLOW_EPHEMERAL_ENV,
        }),
    }
}

fn token_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Zeroizing<Vec<u8>>, TokenConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| TOKEN_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < TOKEN_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(TokenConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: TOKEN_KEY_MIN_LEN,
                });
            }
            Ok(Zeroizing::new(bytes))
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token key (dev only); tokens will not survive a restart"
            );
            let bytes: [u8; TOKEN_KEY_MIN_LEN] = std::array::from_fn(|_| rand::random());
            Ok(Zeroizing::new(bytes.to_vec()))
        }
        Err(error) => Err(TokenConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
