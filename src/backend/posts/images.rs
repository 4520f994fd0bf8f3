/**
 * Post Images
 *
 * Uploaded images are written below a configured directory and referenced by
 * posts as `images/<file>`. Old images are removed in the background.
 *
 * # Upload
 *
 * - only `image/png`, `image/jpg` and `image/jpeg` are accepted
 * - the file is created, fully written and flushed; a partial file is
 *   removed when any step fails
 *
 * # Cleanup
 *
 * `ImageCleaner` is a cheap handle over an unbounded queue. A dedicated task
 * drains it and deletes the files, logging failures. Callers never wait on
 * or observe the outcome.
 */

use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// URL prefix under which images are served and referenced
pub const IMAGE_URL_PREFIX: &str = "images";

/// Content types accepted for upload
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/png", "image/jpg", "image/jpeg"];

/// How stored files are named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilenameStrategy {
    /// `<uuid>-<original name>`, never collides
    #[default]
    UuidPrefixed,
    /// The client's file name as is
    Original,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub destination_dir: PathBuf,
    pub filename_strategy: FilenameStrategy,
}

impl UploadConfig {
    pub fn new(destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            destination_dir: destination_dir.into(),
            filename_strategy: FilenameStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: FilenameStrategy) -> Self {
        self.filename_strategy = strategy;
        self
    }
}

/// An image received from a client
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn is_supported(&self) -> bool {
        is_supported_type(&self.content_type)
    }
}

pub fn is_supported_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES.contains(&content_type.as_str())
}

/// Writes uploads to disk
#[derive(Clone)]
pub struct ImageStore {
    config: UploadConfig,
    cleaner: ImageCleaner,
}

impl ImageStore {
    pub fn new(config: UploadConfig, cleaner: ImageCleaner) -> Self {
        Self { config, cleaner }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Store an upload and return its image URL
    pub async fn save(&self, upload: &ImageUpload) -> Result<String, BackendError> {
        if !upload.is_supported() {
            return Err(BackendError::invalid_field(
                "image",
                format!("Unsupported image type: {}", upload.content_type),
            ));
        }

        let file_name = self.file_name_for(&upload.file_name);
        let path = self.config.destination_dir.join(&file_name);

        tokio::fs::create_dir_all(&self.config.destination_dir)
            .await
            .map_err(|e| BackendError::internal(format!("cannot create image directory: {}", e)))?;

        if let Err(e) = write_file(&path, &upload.data).await {
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                tracing::debug!("No partial upload to remove at {:?}: {}", path, remove_err);
            }
            return Err(BackendError::internal(format!("cannot write image {:?}: {}", path, e)));
        }

        tracing::info!("Stored image {} ({} bytes)", file_name, upload.data.len());
        Ok(format!("{}/{}", IMAGE_URL_PREFIX, file_name))
    }

    /// Queue a stored image for deletion
    pub fn discard(&self, image_url: &str) {
        self.cleaner.schedule(image_url);
    }

    fn file_name_for(&self, original: &str) -> String {
        let name = sanitize_file_name(original);
        match self.config.filename_strategy {
            FilenameStrategy::UuidPrefixed => format!("{}-{}", Uuid::new_v4(), name),
            FilenameStrategy::Original => name,
        }
    }
}

async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Last path component of a client file name, restricted to a safe charset
fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Non-blocking handle for best-effort image deletion
#[derive(Clone)]
pub struct ImageCleaner {
    root: PathBuf,
    tx: mpsc::UnboundedSender<PathBuf>,
}

impl ImageCleaner {
    /// Start the cleanup task for images stored under `root`
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(root: impl Into<PathBuf>) -> Self {
        let (cleaner, rx) = Self::detached(root);
        tokio::spawn(run_cleanup(rx));
        cleaner
    }

    /// A cleaner whose queue is handed to the caller instead of a task
    pub fn detached(root: impl Into<PathBuf>) -> (Self, mpsc::UnboundedReceiver<PathBuf>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { root: root.into(), tx }, rx)
    }

    /// Queue the file behind `image_url` for deletion
    ///
    /// URLs that do not point to a single file directly inside the image
    /// directory are refused.
    pub fn schedule(&self, image_url: &str) {
        let Some(path) = self.resolve(image_url) else {
            tracing::warn!("Refusing to delete image outside the image directory: {}", image_url);
            return;
        };

        if self.tx.send(path).is_err() {
            tracing::warn!("Image cleanup task is gone, {} not deleted", image_url);
        }
    }

    fn resolve(&self, image_url: &str) -> Option<PathBuf> {
        let relative = image_url
            .trim()
            .trim_start_matches('/')
            .strip_prefix(IMAGE_URL_PREFIX)?
            .strip_prefix('/')?;

        let mut components = Path::new(relative).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }
}

async fn run_cleanup(mut rx: mpsc::UnboundedReceiver<PathBuf>) {
    while let Some(path) = rx.recv().await {
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!("Deleted image {:?}", path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Image {:?} already gone", path);
            }
            Err(e) => tracing::warn!("Failed to delete image {:?}: {}", path, e),
        }
    }
    tracing::debug!("Image cleanup task stopped");
}
