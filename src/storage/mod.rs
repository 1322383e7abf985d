//! Photo Storage Layer Abstraction
//!
//! This module provides an abstraction over photo storage backends,
//! allowing the system to use different storage implementations (local
//! filesystem, in-memory, etc.) without affecting higher-level services.

pub mod content_type;
pub mod local_store;
pub mod mock_store;
pub mod path_guard;

use actix_web::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored photo, derived from the filesystem entry on every listing
/// request. Nothing is persisted beyond the file itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoEntry {
    /// File name within the storage root
    pub filename: String,
    /// Relative path clients pass back to retrieve the photo; equals the
    /// file name since the store holds no subdirectories
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

/// Trait defining the photo storage interface
pub trait PhotoStorage: Send + Sync {
    /// Enumerate stored photos, most recently created first. Only files
    /// carrying a recognized image extension are included.
    fn list_photos(&self) -> Result<Vec<PhotoEntry>, Error>;

    /// Persist a payload under the given file name, overwriting any
    /// existing file of the same name. Returns the stored name.
    fn save_photo(&self, name: &str, data: &[u8]) -> Result<String, Error>;

    /// Read back the full contents of a stored file. The name is validated
    /// before it touches the filesystem.
    fn load_photo(&self, name: &str) -> Result<Vec<u8>, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_entry_serializes_with_api_field_names() {
        let entry = PhotoEntry {
            filename: "cat.png".to_string(),
            path: "cat.png".to_string(),
            size: 42,
            created: Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["filename"], "cat.png");
        assert_eq!(json["path"], "cat.png");
        assert_eq!(json["size"], 42);
        assert!(json["created"].is_string());
    }
}
