//! # SkillBridge API
//!
//! REST backend for the SkillBridge e-learning platform, built with Axum and
//! PostgreSQL.
//!
//! - **Authentication**: JWT access/refresh tokens for admins, instructors and students
//! - **Courses**: courses with ordered modules, lessons, learning outcomes and
//!   prerequisites, written atomically
//! - **Enrollment**: student applications with optional payment receipt upload
//! - **Back office**: categories, instructors, admins, settings, dashboard,
//!   notifications, search and contact messages
//!
//! ## Layout
//!
//! ```text
//! src/
//! ├── middleware/       # JWT extraction and role gates
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Registration, login, refresh, /me
//! │   ├── courses/      # Courses and curriculum sub-resources
//! │   ├── applications/ # Enrollment applications and receipts
//! │   └── ...
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing subscriber and request logging
//! ├── metrics.rs        # Prometheus recorder and business counters
//! ├── router.rs         # Route tree and global layers
//! └── state.rs          # Shared application state
//! ```
//!
//! Each feature module has the same shape: `controller.rs` (handlers),
//! `service.rs` (SQL and business rules), `model.rs` (re-exported DTOs from
//! `skillbridge-models`) and `router.rs`.
//!
//! ## Roles
//!
//! | Role | Tier |
//! |------|------|
//! | SUPER_ADMIN, ADMIN, SUPPORT | admin tier (back office) |
//! | INSTRUCTOR | staff, together with the admin tier |
//! | STUDENT | self-registered learners |
//!
//! ## API documentation
//!
//! - Swagger UI: `http://localhost:3000/api-docs`
//! - Scalar: `http://localhost:3000/scalar`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use skillbridge_auth;
pub use skillbridge_config;
pub use skillbridge_core;
pub use skillbridge_db;
pub use skillbridge_models;
