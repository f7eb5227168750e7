//! Object-store access for uploaded résumés.
//!
//! Résumés live in a single bucket as `{file_id}.pdf`. This module is the
//! only S3 touchpoint; everything else in the service handles plain bytes.

use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// Uploads PDF bytes under a fresh file id and returns the id.
pub async fn upload_resume(s3: &S3Client, bucket: &str, contents: Bytes) -> Result<Uuid, AppError> {
    let file_id = Uuid::new_v4();
    s3.put_object()
        .bucket(bucket)
        .key(object_key(file_id))
        .content_type("application/pdf")
        .body(ByteStream::from(contents))
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("upload of {file_id} failed: {e}")))?;
    info!("resume uploaded: {file_id}");
    Ok(file_id)
}

/// Downloads a previously uploaded résumé as raw bytes.
pub async fn download_resume(s3: &S3Client, bucket: &str, file_id: Uuid) -> Result<Bytes, AppError> {
    let object = s3
        .get_object()
        .bucket(bucket)
        .key(object_key(file_id))
        .send()
        .await
        .map_err(|_| AppError::NotFound(format!("resume {file_id} not found")))?;

    let data = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::Storage(format!("reading {file_id} failed: {e}")))?;
    Ok(data.into_bytes())
}

fn object_key(file_id: Uuid) -> String {
    format!("{file_id}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        let id = Uuid::nil();
        assert_eq!(
            object_key(id),
            "00000000-0000-0000-0000-000000000000.pdf"
        );
    }
}
