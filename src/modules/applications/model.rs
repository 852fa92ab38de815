pub use skillbridge_models::applications::*;
