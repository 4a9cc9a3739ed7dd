//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_normalizer`] - Destination URL normalization
//! - [`password`] - Argon2 password hashing

pub mod code_generator;
pub mod password;
pub mod url_normalizer;
