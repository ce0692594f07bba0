//! Binary attachment storage backed by GridFS

use async_trait::async_trait;
use futures_util::io::{AsyncReadExt, AsyncWriteExt};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::gridfs::GridFsBucket;
use mongodb::options::{GridFsBucketOptions, GridFsUploadOptions};
use mongodb::Database;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};

/// Bucket name for product images
const IMAGE_BUCKET: &str = "images";

/// A stored attachment read back from the bucket
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Store for chunked binary attachments
///
/// Implementations generate the attachment identifier; callers address
/// attachments only through the returned identifier string.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store a blob and return its generated identifier
    ///
    /// Either the full buffer is durable under the returned identifier,
    /// or an error is raised and no partial file is visible to readers.
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> CatalogResult<String>;

    /// Read a blob back by identifier
    ///
    /// A missing or malformed identifier yields `AttachmentNotFound`.
    async fn read(&self, id: &str) -> CatalogResult<StoredImage>;

    /// Delete a blob and all its chunks
    async fn delete(&self, id: &str) -> CatalogResult<()>;
}

/// GridFS implementation of the AttachmentStore
pub struct GridFsAttachmentStore {
    bucket: GridFsBucket,
}

impl GridFsAttachmentStore {
    /// Create a store over the `images` bucket of the given database
    pub fn new(db: &Database) -> Self {
        let bucket = db.gridfs_bucket(
            GridFsBucketOptions::builder()
                .bucket_name(IMAGE_BUCKET.to_string())
                .build(),
        );
        Self { bucket }
    }

    fn parse_id(id: &str) -> CatalogResult<ObjectId> {
        // Malformed identifiers cannot name a stored file
        ObjectId::parse_str(id).map_err(|_| CatalogError::AttachmentNotFound(id.to_string()))
    }
}

#[async_trait]
impl AttachmentStore for GridFsAttachmentStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn store(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> CatalogResult<String> {
        let options = GridFsUploadOptions::builder()
            .metadata(doc! { "contentType": content_type })
            .build();

        let mut stream = self
            .bucket
            .open_upload_stream(filename)
            .with_options(options)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;

        let id = match stream.id() {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };

        if let Err(e) = stream.write_all(&bytes).await {
            // Abort so no partial file is visible
            if let Err(abort_err) = stream.abort().await {
                tracing::warn!(error = %abort_err, "Failed to abort GridFS upload");
            }
            return Err(CatalogError::Storage(e.to_string()));
        }

        if let Err(e) = stream.close().await {
            return Err(CatalogError::Storage(e.to_string()));
        }

        tracing::info!(attachment_id = %id, "Attachment stored");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn read(&self, id: &str) -> CatalogResult<StoredImage> {
        let oid = Self::parse_id(id)?;

        // Look the file up first to distinguish "missing" from driver errors
        let mut cursor = self
            .bucket
            .find(doc! { "_id": oid })
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;
        let file = cursor
            .try_next()
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?
            .ok_or_else(|| CatalogError::AttachmentNotFound(id.to_string()))?;

        let mut stream = self
            .bucket
            .open_download_stream(Bson::ObjectId(oid))
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;

        let mut bytes = Vec::with_capacity(file.length as usize);
        stream
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;

        let content_type = file
            .metadata
            .as_ref()
            .and_then(|m| m.get_str("contentType").ok())
            .map(str::to_string);

        Ok(StoredImage {
            filename: file.filename.unwrap_or_default(),
            content_type,
            bytes,
        })
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> CatalogResult<()> {
        let oid = Self::parse_id(id)?;
        self.bucket
            .delete(Bson::ObjectId(oid))
            .await
            .map_err(|e| CatalogError::Storage(e.to_string()))?;

        tracing::info!(attachment_id = %id, "Attachment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_malformed_identifier() {
        let err = GridFsAttachmentStore::parse_id("not-an-object-id").unwrap_err();
        assert!(matches!(err, CatalogError::AttachmentNotFound(_)));
    }

    #[test]
    fn test_parse_id_accepts_hex_object_id() {
        let oid = ObjectId::new();
        let parsed = GridFsAttachmentStore::parse_id(&oid.to_hex()).unwrap();
        assert_eq!(parsed, oid);
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_store_read_round_trip() {
        let mongo_url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&mongo_url).await.unwrap();
        let store = GridFsAttachmentStore::new(&client.database("catalog_test"));

        let payload = vec![0xFFu8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let id = store
            .store("round-trip.jpg", "image/jpeg", payload.clone())
            .await
            .unwrap();

        let image = store.read(&id).await.unwrap();
        assert_eq!(image.bytes, payload);
        assert_eq!(image.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(image.filename, "round-trip.jpg");

        store.delete(&id).await.unwrap();
        let err = store.read(&id).await.unwrap_err();
        assert!(matches!(err, CatalogError::AttachmentNotFound(_)));
    }
}
