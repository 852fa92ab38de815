//! # SkillBridge CLI
//!
//! Database seeding utilities for SkillBridge development and demos.
//!
//! ## Usage
//!
//! ```ignore
//! use skillbridge_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(6); // 6 categories with defaults
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
