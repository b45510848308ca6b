//! Credential adapters: password hashing, signed access tokens, and the
//! signing key configuration.

mod argon2_password_hasher;
mod jwt_access_tokens;
pub mod token_config;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_access_tokens::{JwtAccessTokens, TOKEN_ISSUER};
