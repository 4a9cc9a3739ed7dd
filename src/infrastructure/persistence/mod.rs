//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters. Schema lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User accounts
//! - [`PgLinkRepository`] - Links and click counters

pub mod pg_link_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
