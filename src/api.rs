//! HTTP request handlers for the image store API

use actix_multipart::Multipart;
use actix_web::error::ErrorBadRequest;
use actix_web::{get, post, web, Error, HttpResponse};
use bytes::BytesMut;
use chrono::Utc;
use futures::TryStreamExt;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::storage::PhotoEntry;

#[derive(Serialize)]
struct PhotoListResponse {
    message: String,
    #[serde(rename = "totalPhotos")]
    total_photos: usize,
    photos: Vec<PhotoEntry>,
}

#[derive(Serialize)]
struct SavePhotoResponse {
    path: String,
}

#[derive(Deserialize)]
pub struct PhotoQuery {
    path: Option<String>,
}

#[get("/")]
pub async fn list_photos(app_state: web::Data<AppState>) -> HttpResponse {
    debug!("GET / - Retrieving photo list");

    match app_state.photo_service.list_photos() {
        Ok(photos) => {
            debug!("Found {} photos in storage", photos.len());
            HttpResponse::Ok().json(PhotoListResponse {
                message: "Image Service - Saved Photos".to_string(),
                total_photos: photos.len(),
                photos,
            })
        }
        Err(e) => {
            error!("Failed to retrieve photos: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[post("/savephoto")]
pub async fn save_photo(
    mut payload: Multipart,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    debug!("POST /savephoto - Received file upload request");

    while let Some(mut field) = payload.try_next().await? {
        // The upload is carried by the first field that declares a file name;
        // plain form fields are skipped.
        let filename = match field.content_disposition().get_filename() {
            Some(name) => name.to_string(),
            None => continue,
        };
        log_mdc::insert("photo", &filename);

        let mut data = BytesMut::new();
        while let Some(chunk) = field.try_next().await? {
            data.extend_from_slice(&chunk);
        }

        let stored = app_state.photo_service.save_photo(&filename, &data)?;
        info!("Successfully saved file: {}", stored);
        return Ok(HttpResponse::Ok().json(SavePhotoResponse { path: stored }));
    }

    debug!("No file provided in upload request");
    Err(ErrorBadRequest("No file provided or file is empty"))
}

#[get("/getphoto")]
pub async fn get_photo(
    query: web::Query<PhotoQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let path = query.path.clone().unwrap_or_default();
    debug!("GET /getphoto - Requested path: {}", path);

    if path.is_empty() {
        return Err(ErrorBadRequest("Path parameter is required"));
    }
    log_mdc::insert("photo", &path);

    let (data, content_type) = app_state.photo_service.get_photo(&path)?;
    Ok(HttpResponse::Ok().content_type(content_type).body(data))
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "service": "image-service",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
