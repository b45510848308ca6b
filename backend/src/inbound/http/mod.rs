//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers decode headers and bodies, call a driving port from
//! [`state::HttpState`], and map the result back to JSON. Authorization and
//! business rules live in the domain services.

pub mod admin;
pub mod answers;
pub mod auth;
pub mod error;
pub mod health;
pub mod profile;
pub mod questions;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Mount every Q&A endpoint on `cfg`.
///
/// The caller provides `web::Data<HttpState>`; health probes are registered
/// separately because they carry their own state. JSON bodies that fail to
/// decode are answered with the usual error envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(backend::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(validation::json_payload_error))
        .service(users::signup)
        .service(users::signin)
        .service(users::signout)
        .service(profile::user_profile)
        .service(admin::delete_user)
        .service(questions::create_question)
        .service(questions::all_questions)
        .service(questions::edit_question)
        .service(questions::delete_question)
        .service(questions::questions_by_user)
        .service(answers::create_answer)
        .service(answers::edit_answer)
        .service(answers::delete_answer)
        .service(answers::answers_to_question);
}
