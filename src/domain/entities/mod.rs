//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account
//! - [`Link`] - A shortened URL owned by a user
//!
//! # Design Pattern
//!
//! Separate structs describe records that do not exist yet:
//! - `NewUser`, `NewLink` - For inserting new records
//! - `NewAccount`, `LoginAttempt` - Validated credential input

pub mod link;
pub mod user;

pub use link::{Link, NewLink};
pub use user::{LoginAttempt, NewAccount, NewUser, User, normalize_email};
