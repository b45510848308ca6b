//! Wiring of PostgreSQL repositories and credential adapters into the HTTP
//! state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use backend::inbound::http::state::{Adapters, HttpState};
use backend::outbound::persistence::{
    DbPool, DieselAnswerRepository, DieselQuestionRepository, DieselSessionRepository,
    DieselUserRepository,
};
use backend::outbound::security::token_config::TokenSettings;
use backend::outbound::security::token_config::fingerprint::key_fingerprint;
use backend::outbound::security::{Argon2PasswordHasher, JwtAccessTokens};

/// Build the handler state over `pool`, signing tokens with `tokens.key`.
pub(crate) fn build_http_state(pool: &DbPool, tokens: &TokenSettings) -> web::Data<HttpState> {
    info!(
        key_fingerprint = %key_fingerprint(&tokens.key),
        ttl_hours = tokens.ttl.num_hours(),
        "access token signing configured"
    );
    let state = HttpState::from_adapters(Adapters {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        sessions: Arc::new(DieselSessionRepository::new(pool.clone())),
        questions: Arc::new(DieselQuestionRepository::new(pool.clone())),
        answers: Arc::new(DieselAnswerRepository::new(pool.clone())),
        hasher: Arc::new(Argon2PasswordHasher::default()),
        tokens: Arc::new(JwtAccessTokens::new(&tokens.key, tokens.ttl)),
        clock: Arc::new(DefaultClock),
    });
    web::Data::new(state)
}
