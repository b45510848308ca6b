//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel.
//! - **security**: Argon2id password hashing and HS512 access tokens.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They hold no business rules.

pub mod persistence;
pub mod security;
