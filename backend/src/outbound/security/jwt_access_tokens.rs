//! HMAC-SHA512 JWT implementation of the `AccessTokenIssuer` port.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{AccessTokenError, AccessTokenIssuer, IssuedToken};
use crate::domain::{AccessToken, UserId};

/// Value of the `iss` claim on every token.
pub const TOKEN_ISSUER: &str = "quora-backend";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Signs and verifies bearer tokens with a shared secret.
///
/// `verify` checks the signature and issuer only. Whether a token is still
/// usable is decided by its session row, so `exp` is informational here.
#[derive(Clone)]
pub struct JwtAccessTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtAccessTokens {
    /// Build an issuer from the HMAC secret and token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = false;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl AccessTokenIssuer for JwtAccessTokens {
    fn issue(
        &self,
        user_id: &UserId,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AccessTokenError> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            iss: TOKEN_ISSUER.to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)
            .map_err(|err| AccessTokenError::signing(err.to_string()))?;
        Ok(IssuedToken {
            token: AccessToken::new(token),
            expires_at,
        })
    }

    fn verify(&self, token: &AccessToken) -> Result<UserId, AccessTokenError> {
        let data = decode::<Claims>(token.as_str(), &self.decoding, &self.validation)
            .map_err(|err| AccessTokenError::invalid(err.to_string()))?;
        UserId::new(&data.claims.sub).map_err(|err| AccessTokenError::invalid(err.to_string()))
    }
}
