pub use skillbridge_models::MessageResponse;
pub use skillbridge_models::courses::*;
