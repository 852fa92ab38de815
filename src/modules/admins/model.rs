pub use skillbridge_models::admins::*;
pub use skillbridge_models::{AdminProfile, MessageResponse, User, UserRole, UserStatus};
