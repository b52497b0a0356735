//! Profile photo uploads, stored as files under the upload directory.

use actix_multipart::form::{bytes::Bytes, MultipartForm, MultipartFormConfig};
use actix_web::{
    HttpResponse, get, post,
    web::{self, Data, Path, ServiceConfig, scope},
};
use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::api::auth::CurrentUser;
use crate::api::error::ServiceError;

pub const MAX_PHOTO_SIZE: usize = 2 * 1024 * 1024;
const PUBLIC_PREFIX: &str = "/uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoKind {
    Png,
    Jpeg,
    Webp,
}

impl PhotoKind {
    pub fn from_mime(essence: &str) -> Option<Self> {
        match essence {
            "image/png" => Some(PhotoKind::Png),
            "image/jpeg" | "image/jpg" => Some(PhotoKind::Jpeg),
            "image/webp" => Some(PhotoKind::Webp),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" => Some(PhotoKind::Png),
            "jpg" => Some(PhotoKind::Jpeg),
            "webp" => Some(PhotoKind::Webp),
            _ => None,
        }
    }

    /// Identify the format from the file's leading bytes
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(PhotoKind::Png)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(PhotoKind::Jpeg)
        } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            Some(PhotoKind::Webp)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            PhotoKind::Png => "png",
            PhotoKind::Jpeg => "jpg",
            PhotoKind::Webp => "webp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            PhotoKind::Png => "image/png",
            PhotoKind::Jpeg => "image/jpeg",
            PhotoKind::Webp => "image/webp",
        }
    }
}

/// Split a stored file name into its kind, rejecting anything we did not write
fn parse_stored_name(name: &str) -> Option<PhotoKind> {
    let (stem, ext) = name.split_once('.')?;
    if stem.is_empty() || !stem.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    PhotoKind::from_extension(ext)
}

/// Directory-backed photo storage
pub struct PhotoStorage {
    dir: PathBuf,
}

impl PhotoStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the photo under a fresh random name and return its public URL
    pub async fn save(&self, kind: PhotoKind, data: Vec<u8>) -> Result<String, ServiceError> {
        let stem: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect();
        let name = format!("{}.{}", stem, kind.extension());
        let dir = self.dir.clone();
        let path = dir.join(&name);

        web::block(move || {
            std::fs::create_dir_all(&dir)?;
            std::fs::write(path, data)
        })
        .await
        .map_err(|e| ServiceError::Internal(format!("upload task failed: {}", e)))?
        .map_err(|e| ServiceError::Internal(format!("failed to store photo: {}", e)))?;

        Ok(format!("{}/{}", PUBLIC_PREFIX, name))
    }

    /// Read a previously stored photo
    pub async fn load(&self, name: &str) -> Result<(PhotoKind, Vec<u8>), ServiceError> {
        let not_found = || ServiceError::NotFound("Photo".to_string());
        let kind = parse_stored_name(name).ok_or_else(not_found)?;
        let path = self.dir.join(name);

        let data = web::block(move || std::fs::read(path))
            .await
            .map_err(|e| ServiceError::Internal(format!("upload task failed: {}", e)))?
            .map_err(|_| not_found())?;

        Ok((kind, data))
    }
}

#[derive(MultipartForm)]
pub struct PhotoUpload {
    #[multipart(limit = "2MiB")]
    photo: Bytes,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Validate an uploaded photo: declared type, size and actual content must agree
pub fn check_photo(declared: Option<&str>, data: &[u8]) -> Result<PhotoKind, ServiceError> {
    if data.is_empty() {
        return Err(ServiceError::BadRequest("Photo is empty".to_string()));
    }
    if data.len() > MAX_PHOTO_SIZE {
        return Err(ServiceError::BadRequest("Photo must be 2 MB or smaller".to_string()));
    }

    let sniffed = PhotoKind::sniff(data)
        .ok_or_else(|| ServiceError::BadRequest("Photo must be a PNG, JPEG or WebP image".to_string()))?;

    match declared.and_then(PhotoKind::from_mime) {
        Some(kind) if kind == sniffed => Ok(kind),
        None if declared.is_none() => Ok(sniffed),
        _ => Err(ServiceError::BadRequest(
            "Photo content does not match its declared type".to_string(),
        )),
    }
}

#[post("/photo")]
async fn upload_photo(
    storage: Data<PhotoStorage>,
    caller: CurrentUser,
    MultipartForm(form): MultipartForm<PhotoUpload>,
) -> Result<HttpResponse, ServiceError> {
    let declared = form.photo.content_type.as_ref().map(|mime| mime.essence_str());
    let kind = match check_photo(declared, &form.photo.data) {
        Ok(kind) => kind,
        Err(e) => {
            warn!("Rejected photo upload from profile {}", caller.id());
            return Err(e);
        }
    };

    let url = storage.save(kind, form.photo.data.to_vec()).await?;
    info!("Profile {} uploaded photo {}", caller.id(), url);
    Ok(HttpResponse::Created().json(UploadResponse { url }))
}

#[get("/{name}")]
async fn serve_photo(storage: Data<PhotoStorage>, path: Path<String>) -> Result<HttpResponse, ServiceError> {
    let (kind, data) = storage.load(&path).await?;
    Ok(HttpResponse::Ok().content_type(kind.content_type()).body(data))
}

/// Multipart limits plus the project-wide error body for malformed uploads
pub fn multipart_config(total_limit: usize) -> MultipartFormConfig {
    MultipartFormConfig::default()
        .total_limit(total_limit)
        .error_handler(|err, _req| {
            warn!("Multipart error: {}", err);
            ServiceError::BadRequest(format!("Invalid upload: {}", err)).into()
        })
}

pub fn upload_config(config: &mut ServiceConfig) {
    config
        .service(scope("/api/uploads").service(upload_photo))
        .service(scope(PUBLIC_PREFIX).service(serve_photo));
}
