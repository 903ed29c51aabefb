use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;

use crate::config::Environment;
use crate::models::{ServiceError, UploadRequest};
use crate::storage::{content_type_for, object_key, ObjectStorage};

pub struct UploadService {
    storage: Option<ObjectStorage>,
    environment: Environment,
}

impl UploadService {
    pub fn new(storage: Option<ObjectStorage>, environment: Environment) -> Self {
        Self {
            storage,
            environment,
        }
    }

    /// Decodes the payload, stores it and returns the object's public URL.
    pub async fn upload(&self, request: UploadRequest) -> Result<String, ServiceError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| ServiceError::Configuration("Storage not configured".to_string()))?;

        let (payload, filename) = match (request.file_base64, request.filename) {
            (Some(payload), Some(filename)) if !payload.is_empty() && !filename.trim().is_empty() => {
                (payload, filename)
            }
            _ => {
                return Err(ServiceError::ValidationError(
                    "fileBase64 and filename required".to_string(),
                ))
            }
        };

        let bytes = decode_payload(&payload)?;
        let key = object_key(&filename, Utc::now());
        let content_type = content_type_for(&filename);

        let url = storage
            .upload(&key, content_type, bytes)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, bucket = storage.bucket(), key = %key, "Upload failed");
                ServiceError::Upstream {
                    message: "Failed to upload file".to_string(),
                    detail: (!self.environment.is_production()).then(|| err.to_string()),
                }
            })?;

        tracing::info!(bucket = storage.bucket(), key = %key, "Stored upload");
        Ok(url)
    }
}

/// Accepts raw base64 or a data URL; everything up to the first comma is a prefix.
fn decode_payload(payload: &str) -> Result<Vec<u8>, ServiceError> {
    let encoded = payload
        .split_once(',')
        .map(|(_, data)| data)
        .unwrap_or(payload);
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    STANDARD
        .decode(compact)
        .map_err(|_| ServiceError::ValidationError("Invalid base64 payload".to_string()))
}
