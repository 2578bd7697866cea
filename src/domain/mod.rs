//! Domain layer containing business entities and contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository and token authority traits define contracts that the
//! infrastructure layer implements.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`token_authority`] - Signed token verification contract and claims
//! - [`access_policy`] - Operation → allowed roles mapping

pub mod access_policy;
pub mod entities;
pub mod repositories;
pub mod token_authority;
