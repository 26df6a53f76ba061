use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::errors::InternalError;
use crate::errors::internal::{StorageError, UploadError};
use crate::stores::ContentStore;
use crate::types::internal::{ImageField, ImageUploads, IncomingImage, Item, StagedImages};

/// Default per-file size ceiling: 5 MiB
pub const DEFAULT_MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// Attempts at finding an unused generated name before giving up
const MAX_NAME_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_bytes: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl UploadLimits {
    pub fn check_size(&self, field: ImageField, size: usize) -> Result<(), UploadError> {
        if size > self.max_file_bytes {
            return Err(UploadError::PayloadTooLarge {
                field: field.as_str().to_string(),
                size,
                limit: self.max_file_bytes,
            });
        }
        Ok(())
    }

    /// Largest request body a create/update can legitimately carry
    ///
    /// Every file slot at the size ceiling, plus `form_overhead` for text
    /// fields and multipart framing.
    pub fn max_request_bytes(&self, form_overhead: usize) -> usize {
        let slots = ImageField::Cover.max_files() + ImageField::Additional.max_files();
        self.max_file_bytes
            .saturating_mul(slots)
            .saturating_add(form_overhead)
    }
}

pub fn check_file_count(field: ImageField, count: usize) -> Result<(), UploadError> {
    if count > field.max_files() {
        return Err(UploadError::TooManyFiles {
            field: field.as_str().to_string(),
            count,
            limit: field.max_files(),
        });
    }
    Ok(())
}

/// Build a collision-resistant name: `<field>-<unix millis>-<random><.ext>`
pub fn generate_filename(field: ImageField, original_name: Option<&str>) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    let extension = original_name
        .and_then(safe_extension)
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();

    format!("{}-{}-{}{}", field.as_str(), millis, suffix, extension)
}

/// Extension of the client's file name, if it is short and alphanumeric
fn safe_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn is_image_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// Moves uploaded image bytes into the content store and keeps the store free
/// of files no item references.
///
/// Ordering rule: old files are removed only after the new record state is
/// committed, new files are removed only when the record write failed. A crash
/// in between leaves an orphan file, never a dangling reference.
pub struct ImageLifecycleManager {
    content_store: Arc<dyn ContentStore>,
    limits: UploadLimits,
}

impl ImageLifecycleManager {
    pub fn new(content_store: Arc<dyn ContentStore>, limits: UploadLimits) -> Self {
        Self {
            content_store,
            limits,
        }
    }

    pub fn limits(&self) -> UploadLimits {
        self.limits
    }

    fn check_image(&self, image: &IncomingImage) -> Result<(), UploadError> {
        let content_type = image.content_type.as_deref().unwrap_or_default();
        if !is_image_type(content_type) {
            return Err(UploadError::UnsupportedMediaType {
                field: image.field.as_str().to_string(),
                content_type: content_type.to_string(),
            });
        }

        self.limits.check_size(image.field, image.bytes.len())
    }

    /// Check file counts, media types and sizes for a whole request
    ///
    /// Runs before anything is written, so a rejected request leaves no files.
    pub fn check_uploads(&self, uploads: &ImageUploads) -> Result<(), UploadError> {
        for (field, files) in [
            (ImageField::Cover, &uploads.cover),
            (ImageField::Additional, &uploads.additional),
        ] {
            check_file_count(field, files.len())?;
        }

        uploads.iter().try_for_each(|image| self.check_image(image))
    }

    /// Write one uploaded image under a freshly generated name
    ///
    /// # Returns
    /// * `Ok(String)` - The generated name to store on the item
    /// * `Err(InternalError)` - Upload rejected, or the write failed
    pub async fn stage_upload(&self, image: &IncomingImage) -> Result<String, InternalError> {
        self.check_image(image)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let key = generate_filename(image.field, image.file_name.as_deref());
            match self.content_store.write(&key, &image.bytes).await {
                Ok(()) => {
                    tracing::debug!("Staged {} ({} bytes) as {}", image.field.as_str(), image.bytes.len(), key);
                    return Ok(key);
                }
                Err(StorageError::Io { source, .. })
                    if source.kind() == std::io::ErrorKind::AlreadyExists
                        && attempt < MAX_NAME_ATTEMPTS =>
                {
                    tracing::debug!("Generated name {} already taken, retrying", key);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Stage every file of a request
    ///
    /// All shape checks run first. If a write fails part-way, files already
    /// written for this request are removed before the error is returned.
    pub async fn stage(&self, uploads: &ImageUploads) -> Result<StagedImages, InternalError> {
        self.check_uploads(uploads)?;

        let mut written: Vec<String> = Vec::new();
        for image in uploads.iter() {
            match self.stage_upload(image).await {
                Ok(key) => written.push(key),
                Err(err) => {
                    self.remove_files(&written, "partial staging rollback").await;
                    return Err(err);
                }
            }
        }

        let mut keys = written.into_iter();
        let cover = if uploads.cover.is_empty() {
            None
        } else {
            keys.next()
        };
        let additional: Vec<String> = keys.collect();

        Ok(StagedImages {
            cover,
            additional: (!uploads.additional.is_empty()).then_some(additional),
        })
    }

    /// Remove every file staged by a request whose record write did not happen
    pub async fn discard(&self, staged: &StagedImages) {
        self.remove_files(&staged.files(), "rollback").await;
    }

    /// Finish a create: on store failure, roll back the staged files
    pub async fn resolve_create(
        &self,
        staged: &StagedImages,
        result: Result<Item, InternalError>,
    ) -> Result<Item, InternalError> {
        if result.is_err() {
            self.discard(staged).await;
        }
        result
    }

    /// Finish an update
    ///
    /// On success, removes every file the previous record referenced that the
    /// updated record no longer does. On failure, removes only the newly staged
    /// files; the previous ones are still referenced.
    pub async fn resolve_update(
        &self,
        previous: &Item,
        staged: &StagedImages,
        result: Result<Item, InternalError>,
    ) -> Result<Item, InternalError> {
        match result {
            Ok(updated) => {
                let still_referenced: HashSet<String> = updated.image_files().into_iter().collect();
                let stale: Vec<String> = previous
                    .image_files()
                    .into_iter()
                    .filter(|file| !still_referenced.contains(file))
                    .collect();
                self.remove_files(&stale, "replaced").await;
                Ok(updated)
            }
            Err(err) => {
                self.discard(staged).await;
                Err(err)
            }
        }
    }

    /// Finish a delete: remove every file the removed item referenced
    pub async fn resolve_delete(&self, removed: &Item) {
        self.remove_files(&removed.image_files(), "item deleted").await;
    }

    /// Best-effort removal; each file is attempted independently and failures
    /// are only logged.
    async fn remove_files(&self, keys: &[String], reason: &str) {
        for key in keys {
            match self.content_store.delete(key).await {
                Ok(()) => tracing::debug!("Removed image {} ({})", key, reason),
                Err(e) => tracing::warn!("Could not remove image {} ({}): {}", key, reason, e),
            }
        }
    }
}
