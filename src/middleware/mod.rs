//! Middleware for authentication and role gating.
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::require_auth`] verifies the access token and stores the
//!    [`auth::AuthUser`] in request extensions
//! 3. A role gate from [`role`] checks the caller's role against an allow-list
//! 4. The handler runs, extracting `AuthUser` when it needs the identity
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//! use crate::middleware::{auth::require_auth, role::require_admin};
//!
//! let admin_routes = Router::new()
//!     .route("/", get(list_admins))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
//! ```

pub mod auth;
pub mod role;
