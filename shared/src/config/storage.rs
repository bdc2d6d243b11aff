//! Uploaded image storage configuration

use serde::{Deserialize, Serialize};

/// Local asset storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory uploaded images are written to
    #[serde(default = "default_root")]
    pub root_dir: String,

    /// Public URL prefix the directory is served under
    #[serde(default = "default_public_url")]
    pub public_base_url: String,

    /// Largest accepted upload in bytes
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root(),
            public_base_url: default_public_url(),
            max_upload_bytes: default_max_upload(),
        }
    }
}

fn default_root() -> String {
    String::from("uploads")
}

fn default_public_url() -> String {
    String::from("http://localhost:8080/uploads")
}

fn default_max_upload() -> usize {
    5 * 1024 * 1024
}
