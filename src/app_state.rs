//! Application State Management
//!
//! This module provides the application state that contains the photo
//! service and its dependencies, following the dependency injection pattern.

use std::sync::Arc;
use log::info;

use crate::config::{AppConfig, StorageBackend};
use crate::service::PhotoService;
use crate::storage::{local_store::LocalPhotoStore, mock_store::MockPhotoStore, PhotoStorage};

/// Application state containing the photo service and its dependencies
#[derive(Clone)]
pub struct AppState {
    pub photo_service: Arc<PhotoService>,
    pub config: AppConfig,
}

impl AppState {
    /// Create a new application state with services configured from YAML config
    pub fn new() -> Self {
        let config = AppConfig::load().expect("Failed to load configuration");
        Self::from_config(config)
    }

    /// Create application state from configuration
    pub fn from_config(config: AppConfig) -> Self {
        info!("Initializing application state with configuration");

        let storage_backend: Arc<dyn PhotoStorage> = match config.storage.backend {
            StorageBackend::Local => {
                info!(
                    "Using local storage backend with root_path: {}",
                    config.storage.root_path
                );
                Arc::new(LocalPhotoStore::new(Some(&config.storage)))
            }
            StorageBackend::Mock => {
                info!("Using mock storage backend");
                Arc::new(MockPhotoStore::new())
            }
        };

        let photo_service = Arc::new(PhotoService::new(storage_backend));

        info!("Application state initialized successfully");
        Self {
            photo_service,
            config,
        }
    }

    /// Create application state for testing with a mock backend
    pub fn new_for_testing() -> Self {
        let config = AppConfig::default();
        let storage_backend: Arc<dyn PhotoStorage> = Arc::new(MockPhotoStore::new());
        let photo_service = Arc::new(PhotoService::new(storage_backend));

        Self {
            photo_service,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_mock_config() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Mock;

        let state = AppState::from_config(config);
        assert!(state.photo_service.list_photos().unwrap().is_empty());
    }

    #[test]
    fn test_testing_state_starts_empty() {
        let state = AppState::new_for_testing();
        assert!(state.photo_service.list_photos().unwrap().is_empty());
    }
}
