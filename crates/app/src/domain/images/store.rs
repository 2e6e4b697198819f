//! Filesystem image store.

use std::{
    io::ErrorKind as IoErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    images::{errors::ImageStoreError, format::ImageFormat},
    products::records::ProductId,
};

/// Largest accepted upload.
pub const MAX_IMAGE_BYTES: usize = 5 << 20;

const FILE_SUFFIX: &str = "-product-image";

/// Stores product images as `<root>/<product id>/<uuid v7>-product-image.<ext>`.
///
/// UUID v7 names sort by creation time, so the newest image is the greatest
/// file name in a product's directory.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn product_dir(&self, product: ProductId) -> PathBuf {
        self.root.join(product.to_string())
    }
}

/// Check an upload and decide the extension it is stored under.
fn accept(file_name: &str, bytes: &[u8]) -> Result<String, ImageStoreError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageStoreError::TooLarge);
    }

    let path = Path::new(file_name);
    let claimed = ImageFormat::from_path(path).ok_or(ImageStoreError::UnsupportedFormat)?;

    if ImageFormat::sniff(bytes) != Some(claimed) {
        return Err(ImageStoreError::UnsupportedFormat);
    }

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(ImageStoreError::UnsupportedFormat)
}

fn is_stored_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_some()
}

#[async_trait]
impl ImageStore for FsImageStore {
    #[tracing::instrument(
        name = "images.store.save",
        skip(self, bytes),
        fields(product_id = %product, size = bytes.len()),
        err
    )]
    async fn save(
        &self,
        product: ProductId,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<PathBuf, ImageStoreError> {
        let extension = accept(&file_name, &bytes)?;

        let dir = self.product_dir(product);
        fs::create_dir_all(&dir).await?;

        let path = dir.join(format!("{}{FILE_SUFFIX}.{extension}", Uuid::now_v7()));
        fs::write(&path, &bytes).await?;

        info!(path = %path.display(), "stored product image");

        Ok(path)
    }

    #[tracing::instrument(
        name = "images.store.latest",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn latest(&self, product: ProductId) -> Result<PathBuf, ImageStoreError> {
        let mut entries = match fs::read_dir(self.product_dir(product)).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == IoErrorKind::NotFound => {
                return Err(ImageStoreError::NotFound);
            }
            Err(error) => return Err(error.into()),
        };

        let mut latest: Option<PathBuf> = None;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if !entry.file_type().await?.is_file() || !is_stored_image(&path) {
                continue;
            }

            if latest
                .as_ref()
                .is_none_or(|current| path.file_name() > current.file_name())
            {
                latest = Some(path);
            }
        }

        latest.ok_or(ImageStoreError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Validate and persist an uploaded image, returning where it was written.
    async fn save(
        &self,
        product: ProductId,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<PathBuf, ImageStoreError>;

    /// The most recently saved image for `product`.
    async fn latest(&self, product: ProductId) -> Result<PathBuf, ImageStoreError>;
}
