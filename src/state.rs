//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AuthService, ShortenerService};

#[derive(Clone)]
pub struct AppState {
    pub shortener_service: Arc<ShortenerService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(shortener_service: Arc<ShortenerService>, auth_service: Arc<AuthService>) -> Self {
        Self {
            shortener_service,
            auth_service,
        }
    }
}
