pub use skillbridge_models::SuccessResponse;
pub use skillbridge_models::dashboard::*;
