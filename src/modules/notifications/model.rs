pub use skillbridge_models::notifications::*;
