//! Utility functions for code generation and input validation.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Long URL validation
//! - [`datetime`] - Expiry date parsing

pub mod code_generator;
pub mod datetime;
pub mod url_validator;
