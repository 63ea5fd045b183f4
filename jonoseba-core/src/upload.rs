use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::error::Result;
use crate::store::BlobStore;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("সর্বোচ্চ {limit_mb} MB ফাইল আপলোড করা যাবে")]
    TooLarge { limit_mb: u64 },

    #[error("শুধুমাত্র ছবি বা পিডিএফ ফাইল দেওয়া যাবে")]
    UnsupportedType,
}

const MB: u64 = 1024 * 1024;

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Which flow an upload belongs to; each has its own key prefix and cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ComplaintAttachment,
    NewsImage,
    GalleryImage,
}

impl UploadKind {
    pub fn prefix(self) -> &'static str {
        match self {
            UploadKind::ComplaintAttachment => "complaints",
            UploadKind::NewsImage => "news",
            UploadKind::GalleryImage => "gallery",
        }
    }

    /// Citizen attachments are capped at 5 MB; the admin flows get a wider
    /// default cap rather than none at all.
    pub fn max_bytes(self) -> u64 {
        match self {
            UploadKind::ComplaintAttachment => 5 * MB,
            UploadKind::NewsImage | UploadKind::GalleryImage => 10 * MB,
        }
    }

    fn accepts(self, extension: &str) -> bool {
        match self {
            UploadKind::ComplaintAttachment => {
                extension == "pdf" || IMAGE_EXTENSIONS.contains(&extension)
            }
            UploadKind::NewsImage | UploadKind::GalleryImage => true,
        }
    }
}

fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

/// Storage key for an upload: `{prefix}/{unix millis}.{ext}`. Two uploads in
/// the same millisecond collide; kept as-is to match the original scheme.
pub fn storage_key(kind: UploadKind, file_name: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}/{}.{}",
        kind.prefix(),
        at.timestamp_millis(),
        extension_of(file_name)
    )
}

pub fn check_file(kind: UploadKind, file_name: &str, len: u64) -> std::result::Result<(), UploadError> {
    if len > kind.max_bytes() {
        return Err(UploadError::TooLarge {
            limit_mb: kind.max_bytes() / MB,
        });
    }
    if !kind.accepts(&extension_of(file_name)) {
        return Err(UploadError::UnsupportedType);
    }
    Ok(())
}

pub fn content_type_for(file_name: &str) -> &'static str {
    match extension_of(file_name).as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Checks the file, stores it under a time-derived key and returns the
/// public URL. Callers treat a failure as "continue without attachment".
pub fn upload_file(
    store: &dyn BlobStore,
    kind: UploadKind,
    file_name: &str,
    bytes: &[u8],
    at: DateTime<Utc>,
) -> Result<String> {
    check_file(kind, file_name, bytes.len() as u64)?;
    let key = storage_key(kind, file_name, at);
    store.put_object(&key, bytes, content_type_for(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn keys_are_prefix_slash_millis_dot_extension() {
        assert_eq!(
            storage_key(UploadKind::NewsImage, "ছবি.JPG", at()),
            "news/1700000000000.jpg"
        );
        assert_eq!(
            storage_key(UploadKind::ComplaintAttachment, "scan.pdf", at()),
            "complaints/1700000000000.pdf"
        );
    }

    #[test]
    fn files_without_extension_fall_back_to_bin() {
        assert_eq!(
            storage_key(UploadKind::GalleryImage, "photo", at()),
            "gallery/1700000000000.bin"
        );
    }

    #[test]
    fn complaint_attachments_cap_at_five_megabytes() {
        let limit = 5 * MB;
        assert!(check_file(UploadKind::ComplaintAttachment, "a.jpg", limit).is_ok());
        assert_eq!(
            check_file(UploadKind::ComplaintAttachment, "a.jpg", limit + 1),
            Err(UploadError::TooLarge { limit_mb: 5 })
        );
    }

    #[test]
    fn complaint_attachments_allow_images_and_pdf_only() {
        assert!(check_file(UploadKind::ComplaintAttachment, "a.pdf", 10).is_ok());
        assert!(check_file(UploadKind::ComplaintAttachment, "a.webp", 10).is_ok());
        assert_eq!(
            check_file(UploadKind::ComplaintAttachment, "a.exe", 10),
            Err(UploadError::UnsupportedType)
        );
        // The admin flows are unconstrained by type.
        assert!(check_file(UploadKind::NewsImage, "a.exe", 10).is_ok());
    }

    #[test]
    fn upload_returns_the_public_url() {
        let store = MemoryStore::new();
        let url = upload_file(&store, UploadKind::GalleryImage, "a.png", b"img", at()).unwrap();
        assert_eq!(url, "memory://uploads/gallery/1700000000000.png");
        assert_eq!(store.uploaded_paths(), vec!["gallery/1700000000000.png"]);
    }
}
