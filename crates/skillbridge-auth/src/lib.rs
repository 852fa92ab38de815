//! Authentication primitives for SkillBridge.
//!
//! Claims and HS256 token helpers. HTTP extraction of the identity lives in
//! the API crate's middleware.

pub mod claims;
pub mod jwt;

pub use claims::{Claims, TokenKind};
pub use jwt::{
    TokenPair, create_access_token, create_refresh_token, create_token_pair, verify_access_token,
    verify_refresh_token,
};
