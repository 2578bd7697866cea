//! HTTP middleware for request processing and protection.
//!
//! Provides the role-based access guard and request tracing.

pub mod access_guard;
pub mod tracing;
