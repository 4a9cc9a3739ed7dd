//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};
use crate::domain::repositories::{LinkRepository, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<dyn UserRepository>>,
    pub link_service: Arc<LinkService<dyn LinkRepository, dyn UserRepository>>,
}
