//! Core domain entities.
//!
//! Entities are plain data structures; creation and partial updates use
//! dedicated input types:
//!
//! - [`ShortUrl`] - A persisted short code → long URL mapping
//! - [`NewShortUrl`] - Input for inserting a record
//! - [`ShortUrlPatch`] - Partial update

pub mod short_url;

pub use short_url::{NewShortUrl, SYSTEM_CREATOR, ShortUrl, ShortUrlPatch};
