//! Application layer services implementing business logic.
//!
//! Services consume domain traits (record store, token authority) and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Short URL lifecycle
//! - [`services::auth_service::AuthService`] - Bearer token access control

pub mod services;
