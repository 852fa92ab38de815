//! Receipt upload configuration.
//!
//! - `UPLOAD_DIR`: directory receipts are written under (default `./uploads`)
//! - `UPLOAD_BASE_URL`: public prefix the directory is served at
//!   (default `http://localhost:3000/uploads`)
//! - `UPLOAD_MAX_SIZE`: per-file cap in bytes (default 5 MB)

use std::env;
use std::path::PathBuf;

use crate::env_or;

pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub base_url: String,
    pub max_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            base_url: "http://localhost:3000/uploads".to_string(),
            max_size: DEFAULT_MAX_UPLOAD_SIZE,
        }
    }
}

impl UploadConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            dir: env::var("UPLOAD_DIR").map(PathBuf::from).unwrap_or(defaults.dir),
            base_url: env::var("UPLOAD_BASE_URL").unwrap_or(defaults.base_url),
            max_size: env_or("UPLOAD_MAX_SIZE", defaults.max_size),
        }
    }

    /// Request body limit for multipart routes: the file cap plus room for text fields.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        self.max_size + 1024 * 1024
    }
}
