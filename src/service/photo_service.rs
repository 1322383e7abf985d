//! Photo service layer that provides a clean interface to the storage abstraction

use crate::storage::content_type::content_type_for;
use crate::storage::{PhotoEntry, PhotoStorage};
use actix_web::error::ErrorBadRequest;
use actix_web::Error;
use std::sync::Arc;

/// Photo service that provides a clean interface to the storage abstraction
pub struct PhotoService {
    storage: Arc<dyn PhotoStorage>,
}

impl PhotoService {
    /// Create a new photo service with injected storage backend
    pub fn new(storage: Arc<dyn PhotoStorage>) -> Self {
        Self { storage }
    }

    /// Enumerate stored photos, most recently created first
    pub fn list_photos(&self) -> Result<Vec<PhotoEntry>, Error> {
        self.storage.list_photos()
    }

    /// Persist an uploaded payload under the declared file name
    pub fn save_photo(&self, name: &str, data: &[u8]) -> Result<String, Error> {
        if data.is_empty() {
            return Err(ErrorBadRequest("No file provided or file is empty"));
        }
        self.storage.save_photo(name, data)
    }

    /// Read back a stored file together with its resolved content type
    pub fn get_photo(&self, name: &str) -> Result<(Vec<u8>, &'static str), Error> {
        let data = self.storage.load_photo(name)?;
        Ok((data, content_type_for(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::mock_store::MockPhotoStore;
    use actix_web::http::StatusCode;

    fn service() -> PhotoService {
        PhotoService::new(Arc::new(MockPhotoStore::new()))
    }

    #[test]
    fn test_save_then_get_round_trip() {
        let service = service();
        service.save_photo("cat.png", b"bytes").unwrap();

        let (data, content_type) = service.get_photo("cat.png").unwrap();
        assert_eq!(data, b"bytes");
        assert_eq!(content_type, "image/png");
    }

    #[test]
    fn test_save_rejects_empty_payload() {
        let service = service();
        let err = service.save_photo("cat.png", b"").unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_get_resolves_fallback_content_type() {
        let service = service();
        service.save_photo("blob.bin", b"bytes").unwrap();

        let (_, content_type) = service.get_photo("blob.bin").unwrap();
        assert_eq!(content_type, "application/octet-stream");
    }

    #[test]
    fn test_list_photos_delegates_to_storage() {
        let service = service();
        service.save_photo("a.png", b"a").unwrap();
        service.save_photo("b.jpg", b"b").unwrap();

        let photos = service.list_photos().unwrap();
        assert_eq!(photos.len(), 2);
    }
}
