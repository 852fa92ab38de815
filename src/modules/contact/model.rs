pub use skillbridge_models::contact::*;
pub use skillbridge_models::{MessageResponse, SuccessResponse};
