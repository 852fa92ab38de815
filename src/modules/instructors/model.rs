pub use skillbridge_models::instructors::*;
pub use skillbridge_models::{InstructorProfile, MessageResponse, UserSummary};
