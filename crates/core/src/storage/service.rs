//! Storage service implementation using Apache OpenDAL.

use opendal::{ErrorKind, Operator, services};

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Metadata about a stored object.
#[derive(Debug, Clone)]
pub struct ObjectMetadata {
    /// Storage key.
    pub storage_key: String,
    /// File size in bytes.
    pub file_size: u64,
    /// Content type.
    pub content_type: Option<String>,
}

/// Storage service for document attachments.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Write an object to storage.
    ///
    /// Size and MIME type are validated before any network interaction.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.validate_upload(content_type, bytes.len() as u64)?;

        self.operator
            .write_with(key, bytes)
            .content_type(content_type)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    /// Durable public URL for a stored object.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            key
        )
    }

    /// Fetch metadata for a stored object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not exist or cannot be accessed.
    pub async fn stat(&self, key: &str) -> Result<ObjectMetadata, StorageError> {
        let meta = self.operator.stat(key).await.map_err(StorageError::from)?;

        Ok(ObjectMetadata {
            storage_key: key.to_string(),
            file_size: meta.content_length(),
            content_type: meta.content_type().map(String::from),
        })
    }

    /// Delete an object from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if an object exists in storage.
    pub async fn exists(&self, key: &str) -> bool {
        match self.operator.stat(key).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(_) => false,
        }
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

/// Sanitize a filename fragment for use inside a storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and
/// underscores; everything else becomes an underscore.
#[must_use]
pub(crate) fn sanitize_key_fragment(fragment: &str) -> String {
    fragment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_config() -> StorageConfig {
        StorageConfig::new(
            StorageProvider::local_fs("./test-storage"),
            "http://localhost:8080/files",
        )
    }

    #[test]
    fn test_sanitize_key_fragment() {
        assert_eq!(sanitize_key_fragment("oficio.pdf"), "oficio.pdf");
        assert_eq!(sanitize_key_fragment("mi oficio (1).pdf"), "mi_oficio__1_.pdf");
        assert_eq!(sanitize_key_fragment("año2026.docx"), "a_o2026.docx");
    }

    #[test]
    fn test_public_url_joins_base_and_key() {
        let service = StorageService::from_config(local_config()).expect("should create service");
        assert_eq!(
            service.public_url("abc-123.pdf"),
            "http://localhost:8080/files/abc-123.pdf"
        );
    }

    #[test]
    fn test_public_url_trims_trailing_slash() {
        let config = StorageConfig::new(
            StorageProvider::local_fs("./test-storage"),
            "http://localhost:8080/files/",
        );
        let service = StorageService::from_config(config).expect("should create service");
        assert_eq!(
            service.public_url("abc-123.pdf"),
            "http://localhost:8080/files/abc-123.pdf"
        );
    }

    #[test]
    fn test_validate_upload_size() {
        let config = local_config().with_max_file_size(1024);
        let service = StorageService::from_config(config).expect("should create service");

        assert!(service.validate_upload("application/pdf", 512).is_ok());

        let err = service
            .validate_upload("application/pdf", 2048)
            .unwrap_err();
        assert!(matches!(err, StorageError::FileTooLarge { .. }));
    }

    #[test]
    fn test_validate_upload_mime_type() {
        let service = StorageService::from_config(local_config()).expect("should create service");

        assert!(service.validate_upload("application/pdf", 1024).is_ok());
        assert!(service.validate_upload("application/msword", 1024).is_ok());

        let err = service.validate_upload("text/plain", 1024).unwrap_err();
        assert!(matches!(err, StorageError::InvalidMimeType { .. }));
    }
}
