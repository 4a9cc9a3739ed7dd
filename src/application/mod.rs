//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation, and business rules, and
//! give HTTP handlers a small API to call.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login, token checks
//! - [`services::link_service::LinkService`] - Short link creation, listing, resolution
//! - [`services::token_service::TokenService`] - Session token signing and verification

pub mod services;
