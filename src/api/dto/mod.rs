//! Data Transfer Objects for API requests and responses.
//!
//! Request and response bodies use camelCase field names. Input validation
//! happens in the domain layer, so request DTOs only carry raw strings.

pub mod auth;
pub mod health;
pub mod link;
