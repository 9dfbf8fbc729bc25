//! Object paths and public URLs for externally-stored binary content.
//!
//! The blobs themselves live in an external object store; this module
//! only derives deterministic paths and read-time public URLs. URLs are
//! never persisted verbatim.

use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Object path for an event photo: `{event_id}/{unix_millis}.{ext}`.
pub fn photo_object_path(event_id: Uuid, filename: &str) -> Result<String> {
    let ext = file_extension(filename)?;
    Ok(format!("{}/{}.{}", event_id, Utc::now().timestamp_millis(), ext))
}

/// Object path for a user avatar: `{user_id}-{random}.{ext}`.
pub fn avatar_object_path(user_id: Uuid, filename: &str) -> Result<String> {
    let ext = file_extension(filename)?;
    Ok(format!("{}-{}.{}", user_id, Uuid::new_v4().simple(), ext))
}

/// Public URL for a stored photo, derived from config at read time.
pub fn public_photo_url(config: &Config, storage_path: &str) -> Option<String> {
    config
        .storage_base_url
        .as_deref()
        .map(|base| format!("{}/{}/{}", base.trim_end_matches('/'), config.photo_bucket, storage_path))
}

fn file_extension(filename: &str) -> Result<String> {
    let ext = filename
        .rsplit('.')
        .next()
        .map(|e| e.to_lowercase())
        .filter(|e| ALLOWED_EXTENSIONS.contains(&e.as_str()))
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Unsupported file type; allowed: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;
    Ok(ext)
}
