//! Token authority implementations.

pub mod jwt_token_authority;

pub use jwt_token_authority::JwtTokenAuthority;
