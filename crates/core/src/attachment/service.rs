//! Attachment service implementation.

use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;
use tracing::warn;
use uuid::Uuid;

use super::error::AttachmentError;
use super::types::{ALLOWED_MIME_TYPES, UploadInput};
use super::view_url::view_url;
use crate::numbering::AttachmentRef;
use crate::storage::{StorageError, sanitize_key_fragment};

/// Length of the random storage-key suffix.
const KEY_SUFFIX_LEN: usize = 8;

/// Blob storage consumed by the attachment service.
///
/// Implemented by `storage::StorageService`; kept as a trait so the
/// upload path can be tested without touching real storage.
pub trait BlobStore: Send + Sync {
    /// Store bytes under a key.
    fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Durable public URL for a stored key.
    fn public_url(&self, key: &str) -> String;
}

impl BlobStore for crate::storage::StorageService {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        // Inherent method; resolves ahead of the trait method.
        self.put(key, bytes, content_type).await
    }

    fn public_url(&self, key: &str) -> String {
        self.public_url(key)
    }
}

/// Repository trait for the attachment side of document persistence.
pub trait AttachmentRepository: Send + Sync {
    /// Check that the owning document exists.
    fn document_exists(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<bool, AttachmentError>> + Send;

    /// Set or replace the document's attachment reference.
    fn set_attachment(
        &self,
        id: Uuid,
        attachment: AttachmentRef,
    ) -> impl std::future::Future<Output = Result<(), AttachmentError>> + Send;

    /// Current attachment reference of a document, if any.
    ///
    /// Fails with `DocumentNotFound` when the document is missing.
    fn attachment_of(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<AttachmentRef>, AttachmentError>> + Send;
}

/// Attachment service for uploading and resolving document files.
pub struct AttachmentService<R: AttachmentRepository, B: BlobStore> {
    repo: Arc<R>,
    blobs: Arc<B>,
}

impl<R: AttachmentRepository, B: BlobStore> AttachmentService<R, B> {
    /// Create a new attachment service.
    #[must_use]
    pub fn new(repo: Arc<R>, blobs: Arc<B>) -> Self {
        Self { repo, blobs }
    }

    /// Upload a file and associate it with a document.
    ///
    /// Sequencing: the blob write completes first, then the document row
    /// is updated with the public URL. A failed row update leaves an
    /// orphan blob behind (logged, acceptable); the row never references
    /// a URL that was not stored.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFileType` before any I/O for MIME types outside the
    ///   PDF/Word allowlist
    /// - `DocumentNotFound` when the document is missing
    /// - `Storage` / `Repository` on I/O failures
    pub async fn upload(&self, input: UploadInput) -> Result<AttachmentRef, AttachmentError> {
        if !ALLOWED_MIME_TYPES.contains(&input.content_type.as_str()) {
            return Err(AttachmentError::UnsupportedFileType(input.content_type));
        }

        if !self.repo.document_exists(input.document_id).await? {
            return Err(AttachmentError::DocumentNotFound(input.document_id));
        }

        let key = generate_storage_key(input.document_id, &input.file_name);

        self.blobs
            .put(&key, input.bytes, &input.content_type)
            .await?;

        let attachment = AttachmentRef {
            url: self.blobs.public_url(&key),
            file_name: input.file_name,
        };

        if let Err(e) = self
            .repo
            .set_attachment(input.document_id, attachment.clone())
            .await
        {
            warn!(
                document_id = %input.document_id,
                storage_key = %key,
                "attachment record update failed, blob orphaned"
            );
            return Err(e);
        }

        Ok(attachment)
    }

    /// Browser-viewable URL for a document's attachment.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` when the document is missing
    /// - `NoAttachment` when the document has no file
    pub async fn view_url_for(&self, document_id: Uuid) -> Result<String, AttachmentError> {
        let attachment = self
            .repo
            .attachment_of(document_id)
            .await?
            .ok_or(AttachmentError::NoAttachment(document_id))?;

        Ok(view_url(&attachment.url))
    }
}

/// Collision-resistant storage key: document id, random alphanumeric
/// suffix, original extension (lowercased, sanitized).
#[must_use]
pub fn generate_storage_key(document_id: Uuid, file_name: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_SUFFIX_LEN)
        .map(char::from)
        .collect();

    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => {
            let ext = sanitize_key_fragment(&ext.to_lowercase());
            format!("{document_id}-{suffix}.{ext}")
        }
        _ => format!("{document_id}-{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRepo {
        exists: bool,
        attachment: Mutex<Option<AttachmentRef>>,
        fail_set: bool,
    }

    impl MockRepo {
        fn new(exists: bool) -> Self {
            Self {
                exists,
                attachment: Mutex::new(None),
                fail_set: false,
            }
        }

        fn failing_set(mut self) -> Self {
            self.fail_set = true;
            self
        }
    }

    impl AttachmentRepository for MockRepo {
        async fn document_exists(&self, _id: Uuid) -> Result<bool, AttachmentError> {
            Ok(self.exists)
        }

        async fn set_attachment(
            &self,
            _id: Uuid,
            attachment: AttachmentRef,
        ) -> Result<(), AttachmentError> {
            if self.fail_set {
                return Err(AttachmentError::repository("write failed"));
            }
            *self.attachment.lock().unwrap() = Some(attachment);
            Ok(())
        }

        async fn attachment_of(&self, id: Uuid) -> Result<Option<AttachmentRef>, AttachmentError> {
            if !self.exists {
                return Err(AttachmentError::DocumentNotFound(id));
            }
            Ok(self.attachment.lock().unwrap().clone())
        }
    }

    struct MockBlobs {
        puts: AtomicUsize,
    }

    impl MockBlobs {
        fn new() -> Self {
            Self {
                puts: AtomicUsize::new(0),
            }
        }

        fn put_count(&self) -> usize {
            self.puts.load(Ordering::SeqCst)
        }
    }

    impl BlobStore for MockBlobs {
        async fn put(
            &self,
            _key: &str,
            _bytes: Vec<u8>,
            _content_type: &str,
        ) -> Result<(), StorageError> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("https://files.example.com/{key}")
        }
    }

    fn pdf_input(document_id: Uuid) -> UploadInput {
        UploadInput {
            document_id,
            file_name: "oficio.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        }
    }

    #[tokio::test]
    async fn test_upload_sets_attachment() {
        let repo = Arc::new(MockRepo::new(true));
        let blobs = Arc::new(MockBlobs::new());
        let service = AttachmentService::new(Arc::clone(&repo), Arc::clone(&blobs));

        let id = Uuid::new_v4();
        let attachment = service.upload(pdf_input(id)).await.unwrap();

        assert_eq!(attachment.file_name, "oficio.pdf");
        assert!(attachment.url.starts_with("https://files.example.com/"));
        assert!(attachment.url.ends_with(".pdf"));
        assert_eq!(blobs.put_count(), 1);
        assert_eq!(
            repo.attachment.lock().unwrap().as_ref().unwrap().url,
            attachment.url
        );
    }

    #[tokio::test]
    async fn test_unsupported_type_rejected_without_blob_call() {
        let repo = Arc::new(MockRepo::new(true));
        let blobs = Arc::new(MockBlobs::new());
        let service = AttachmentService::new(repo, Arc::clone(&blobs));

        let mut input = pdf_input(Uuid::new_v4());
        input.content_type = "text/plain".to_string();

        let err = service.upload(input).await.unwrap_err();
        assert!(matches!(err, AttachmentError::UnsupportedFileType(_)));
        assert_eq!(blobs.put_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_missing_document() {
        let repo = Arc::new(MockRepo::new(false));
        let blobs = Arc::new(MockBlobs::new());
        let service = AttachmentService::new(repo, Arc::clone(&blobs));

        let err = service.upload(pdf_input(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, AttachmentError::DocumentNotFound(_)));
        assert_eq!(blobs.put_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_record_update_surfaces_after_put() {
        let repo = Arc::new(MockRepo::new(true).failing_set());
        let blobs = Arc::new(MockBlobs::new());
        let service = AttachmentService::new(repo, Arc::clone(&blobs));

        let err = service.upload(pdf_input(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, AttachmentError::Repository(_)));
        // The blob was written; the orphan is acceptable.
        assert_eq!(blobs.put_count(), 1);
    }

    #[tokio::test]
    async fn test_reupload_replaces_attachment() {
        let repo = Arc::new(MockRepo::new(true));
        let blobs = Arc::new(MockBlobs::new());
        let service = AttachmentService::new(Arc::clone(&repo), blobs);

        let id = Uuid::new_v4();
        service.upload(pdf_input(id)).await.unwrap();

        let mut replacement = pdf_input(id);
        replacement.file_name = "oficio-v2.docx".to_string();
        replacement.content_type =
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string();
        service.upload(replacement).await.unwrap();

        let current = repo.attachment.lock().unwrap().clone().unwrap();
        assert_eq!(current.file_name, "oficio-v2.docx");
        assert!(current.url.ends_with(".docx"));
    }

    #[tokio::test]
    async fn test_view_url_for_word_attachment() {
        let repo = Arc::new(MockRepo::new(true));
        let blobs = Arc::new(MockBlobs::new());
        let service = AttachmentService::new(Arc::clone(&repo), blobs);

        let id = Uuid::new_v4();
        let mut input = pdf_input(id);
        input.file_name = "informe.docx".to_string();
        input.content_type =
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string();
        service.upload(input).await.unwrap();

        let mapped = service.view_url_for(id).await.unwrap();
        assert!(mapped.starts_with("https://view.officeapps.live.com/op/view.aspx?src="));
        assert!(mapped.contains("%2F"));
    }

    #[tokio::test]
    async fn test_view_url_for_pdf_is_unchanged() {
        let repo = Arc::new(MockRepo::new(true));
        let blobs = Arc::new(MockBlobs::new());
        let service = AttachmentService::new(Arc::clone(&repo), blobs);

        let id = Uuid::new_v4();
        let attachment = service.upload(pdf_input(id)).await.unwrap();
        assert_eq!(service.view_url_for(id).await.unwrap(), attachment.url);
    }

    #[tokio::test]
    async fn test_view_url_without_attachment() {
        let repo = Arc::new(MockRepo::new(true));
        let blobs = Arc::new(MockBlobs::new());
        let service = AttachmentService::new(repo, blobs);

        let err = service.view_url_for(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AttachmentError::NoAttachment(_)));
    }

    #[test]
    fn test_storage_key_shape() {
        let id = Uuid::new_v4();
        let key = generate_storage_key(id, "Mi Oficio Final.PDF");
        assert!(key.starts_with(&id.to_string()));
        assert!(key.ends_with(".pdf"));
        // id + '-' + 8-char suffix + ".pdf"
        assert_eq!(key.len(), id.to_string().len() + 1 + 8 + 4);
    }

    #[test]
    fn test_storage_keys_are_unique_per_upload() {
        let id = Uuid::new_v4();
        let a = generate_storage_key(id, "oficio.pdf");
        let b = generate_storage_key(id, "oficio.pdf");
        assert_ne!(a, b);
    }

    #[test]
    fn test_storage_key_without_extension() {
        let id = Uuid::new_v4();
        let key = generate_storage_key(id, "oficio");
        assert!(!key.contains('.'));
    }
}
