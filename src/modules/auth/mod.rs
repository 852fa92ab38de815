pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::init_auth_router;
pub use service::AuthService;
