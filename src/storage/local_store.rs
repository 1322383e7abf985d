//! Local filesystem photo storage implementation

use crate::config::StorageConfig;
use crate::storage::content_type::is_image_file;
use crate::storage::path_guard;
use crate::storage::{PhotoEntry, PhotoStorage};
use actix_web::error::{ErrorBadRequest, ErrorInternalServerError, ErrorNotFound};
use actix_web::Error;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::{info, warn};
use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::UNIX_EPOCH;

// Global mutex to synchronize concurrent writes to storage files
lazy_static! {
    static ref PHOTO_WRITE_LOCK: Mutex<()> = Mutex::new(());
}

fn get_storage_directory(config: Option<&StorageConfig>) -> PathBuf {
    // Try to get the storage directory from configuration first
    if let Some(cfg) = config {
        let path = PathBuf::from(&cfg.root_path);
        if !path.exists() {
            fs::create_dir_all(&path).expect("Failed to create configured storage directory");
        }
        info!("Using configured storage directory: {}", path.display());
        return path;
    }

    // Try to get the storage directory from environment variable
    match env::var("STORAGE_DIRECTORY") {
        Ok(dir) => {
            let path = PathBuf::from(dir);
            if !path.exists() {
                fs::create_dir_all(&path).expect("Failed to create storage directory");
            }
            info!("Using storage directory from environment: {}", path.display());
            path
        }
        Err(_) => {
            warn!("Storage directory not defined in environment");
            let default_path = PathBuf::from("uploads");
            if !default_path.exists() {
                fs::create_dir_all(&default_path)
                    .expect("Failed to create default storage directory");
            }
            info!("Using default storage directory: {}", default_path.display());
            default_path
        }
    }
}

/// Local filesystem photo storage implementation. All files live as direct
/// children of the storage root; the root is created at startup and never
/// changes afterwards.
pub struct LocalPhotoStore {
    root: PathBuf,
}

impl LocalPhotoStore {
    pub fn new(config: Option<&StorageConfig>) -> Self {
        Self {
            root: get_storage_directory(config),
        }
    }

    /// Storage root this store reads from and writes to
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn entry_from_metadata(&self, filename: String, metadata: &fs::Metadata) -> PhotoEntry {
        // Not every filesystem reports a creation time; fall back to the
        // modification time when it doesn't.
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(UNIX_EPOCH);

        PhotoEntry {
            path: filename.clone(),
            filename,
            size: metadata.len(),
            created: DateTime::<Utc>::from(created),
        }
    }
}

impl PhotoStorage for LocalPhotoStore {
    fn list_photos(&self) -> Result<Vec<PhotoEntry>, Error> {
        let dir = fs::read_dir(&self.root).map_err(|e| {
            ErrorInternalServerError(format!("Error retrieving photos: {}", e))
        })?;

        let mut photos = Vec::new();
        for entry in dir {
            let entry = entry.map_err(|e| {
                ErrorInternalServerError(format!("Error retrieving photos: {}", e))
            })?;
            let filename = entry.file_name().to_string_lossy().into_owned();
            if !is_image_file(&filename) {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| {
                ErrorInternalServerError(format!("Error retrieving photos: {}", e))
            })?;
            if !metadata.is_file() {
                continue;
            }

            photos.push(self.entry_from_metadata(filename, &metadata));
        }

        // Most recent first; the sort is stable, so entries created at the
        // same instant keep their enumeration order.
        photos.sort_by(|a, b| b.created.cmp(&a.created));

        info!("Found {} photos in storage directory", photos.len());
        Ok(photos)
    }

    fn save_photo(&self, name: &str, data: &[u8]) -> Result<String, Error> {
        let path = path_guard::resolve_under_root(&self.root, name).map_err(|reason| {
            warn!("Rejected upload file name {:?}: {}", name, reason);
            ErrorBadRequest("Invalid file path")
        })?;

        // Acquire global lock to synchronize concurrent writes
        let _lock = PHOTO_WRITE_LOCK.lock().unwrap();

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(ErrorInternalServerError)?;

        file.write_all(data).map_err(ErrorInternalServerError)?;
        file.flush().map_err(ErrorInternalServerError)?;

        info!("Saved photo {} ({} bytes)", name, data.len());
        Ok(name.to_string())
    }

    fn load_photo(&self, name: &str) -> Result<Vec<u8>, Error> {
        let path = path_guard::resolve_under_root(&self.root, name).map_err(|reason| {
            warn!("Rejected photo request {:?}: {}", name, reason);
            ErrorBadRequest("Invalid file path")
        })?;

        if !path.is_file() {
            return Err(ErrorNotFound("File not found"));
        }

        let data = fs::read(&path).map_err(ErrorInternalServerError)?;
        info!("Serving photo {} ({} bytes)", name, data.len());
        Ok(data)
    }
}
