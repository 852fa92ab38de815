pub use skillbridge_models::categories::*;
