//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`auth`] - Signed token issuing and verification
//! - [`persistence`] - PostgreSQL and in-memory record stores

pub mod auth;
pub mod persistence;
