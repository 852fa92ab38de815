pub use skillbridge_models::applications::ApplicationStatus;
pub use skillbridge_models::courses::CourseStatus;
pub use skillbridge_models::search::*;
