//! Business logic services for the application layer.

pub mod auth_service;
pub mod shortener_service;

pub use auth_service::AuthService;
pub use shortener_service::{Availability, Deletion, ShortenInput, ShortenerService};
