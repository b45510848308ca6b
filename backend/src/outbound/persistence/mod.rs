//! PostgreSQL adapters for the repository ports.
//!
//! Built on Diesel with `diesel-async` over a `bb8` pool. Row structs
//! (`models.rs`) and table definitions (`schema.rs`) stay private to this
//! module; repositories convert rows into domain types and Diesel failures
//! into the port error enums.
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselAnswerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/quora")).await?;
//! let answers = DieselAnswerRepository::new(pool);
//! ```

mod diesel_answer_repository;
mod diesel_error_mapping;
mod diesel_question_repository;
mod diesel_session_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_answer_repository::DieselAnswerRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_session_repository::DieselSessionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
