//! # SkillBridge Core
//!
//! Core types, errors, and utilities for the SkillBridge API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-based pagination parameters and metadata
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Query-string deserialization helpers
//! - [`file_storage`]: Storage abstraction for uploaded receipts
//!
//! # Example
//!
//! ```ignore
//! use skillbridge_core::errors::AppError;
//! use skillbridge_core::pagination::{PageParams, PageMeta};
//! use skillbridge_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//!
//! let hash = hash_password("secure_password")?;
//!
//! let params = PageParams::default();
//! let meta = PageMeta::new(params.page(), params.limit_or(10), 42);
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use pagination::{PageMeta, PageParams};
pub use password::{hash_password, verify_password};
