//! Mock implementation of PhotoStorage for testing

use crate::storage::content_type::is_image_file;
use crate::storage::path_guard;
use crate::storage::{PhotoEntry, PhotoStorage};
use actix_web::error::{ErrorBadRequest, ErrorNotFound};
use actix_web::Error;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct StoredPhoto {
    data: Vec<u8>,
    created: DateTime<Utc>,
}

/// Mock implementation of PhotoStorage for testing. Applies the same
/// syntactic name validation as the filesystem backend.
pub struct MockPhotoStore {
    photos: Arc<Mutex<HashMap<String, StoredPhoto>>>,
}

impl MockPhotoStore {
    pub fn new() -> Self {
        Self {
            photos: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the number of photos in the store
    pub fn photo_count(&self) -> usize {
        let photos = self.photos.lock().unwrap();
        photos.len()
    }

    /// Check if a photo exists in the store
    pub fn photo_exists(&self, name: &str) -> bool {
        let photos = self.photos.lock().unwrap();
        photos.contains_key(name)
    }

    /// Clear all photos from the store
    pub fn clear(&self) {
        let mut photos = self.photos.lock().unwrap();
        photos.clear();
    }
}

impl Default for MockPhotoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoStorage for MockPhotoStore {
    fn list_photos(&self) -> Result<Vec<PhotoEntry>, Error> {
        let photos = self.photos.lock().unwrap();

        let mut entries: Vec<PhotoEntry> = photos
            .iter()
            .filter(|(name, _)| is_image_file(name))
            .map(|(name, photo)| PhotoEntry {
                filename: name.clone(),
                path: name.clone(),
                size: photo.data.len() as u64,
                created: photo.created,
            })
            .collect();

        entries.sort_by(|a, b| b.created.cmp(&a.created));

        info!("Mock: Found {} photos", entries.len());
        Ok(entries)
    }

    fn save_photo(&self, name: &str, data: &[u8]) -> Result<String, Error> {
        path_guard::validate_name(name).map_err(|reason| {
            warn!("Mock: Rejected upload file name {:?}: {}", name, reason);
            ErrorBadRequest("Invalid file path")
        })?;

        let mut photos = self.photos.lock().unwrap();
        // Overwriting keeps the original creation time, matching the
        // filesystem backend.
        let created = photos
            .get(name)
            .map(|photo| photo.created)
            .unwrap_or_else(Utc::now);
        photos.insert(
            name.to_string(),
            StoredPhoto {
                data: data.to_vec(),
                created,
            },
        );

        info!("Mock: Saved photo {} ({} bytes)", name, data.len());
        Ok(name.to_string())
    }

    fn load_photo(&self, name: &str) -> Result<Vec<u8>, Error> {
        path_guard::validate_name(name).map_err(|reason| {
            warn!("Mock: Rejected photo request {:?}: {}", name, reason);
            ErrorBadRequest("Invalid file path")
        })?;

        let photos = self.photos.lock().unwrap();
        photos
            .get(name)
            .map(|photo| photo.data.clone())
            .ok_or_else(|| ErrorNotFound("File not found"))
    }
}
