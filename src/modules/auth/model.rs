pub use skillbridge_models::auth::*;
pub use skillbridge_models::{
    AdminProfile, InstructorProfile, MessageResponse, Profile, StudentProfile, User,
    UserCredentials, UserRole, UserStatus, UserSummary, UserWithProfile,
};
