use crate::error::ServerError;
use crate::utils::list_images_walkdir_filtered;
use rand::Rng;
use std::path::{Path, PathBuf};

/// The content type served for an image, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageContentType {
    Png,
    Jpeg,
}

impl ImageContentType {
    /// `.png` (any case) is served as PNG, everything else as JPEG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Self::Png,
            _ => Self::Jpeg,
        }
    }

    pub const fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    path: PathBuf,
    content_type: ImageContentType,
}

impl ImageEntry {
    pub fn new(path: PathBuf) -> Self {
        let content_type = ImageContentType::from_path(&path);
        Self { path, content_type }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn content_type(&self) -> ImageContentType {
        self.content_type
    }
}

/// Immutable, non-empty, path-sorted list of servable images.
///
/// The order is part of the seeded-selection contract: the same seed maps to
/// the same entry only as long as the sorted listing is unchanged.
#[derive(Debug, Clone)]
pub struct ImageIndex {
    entries: Vec<ImageEntry>,
}

impl ImageIndex {
    /// Scans `root` recursively for images and builds the index.
    ///
    /// # Errors
    ///
    /// * [`ServerError::Walk`] if the directory cannot be traversed.
    /// * [`ServerError::NoImages`] if no matching file was found.
    pub fn build(root: &Path) -> Result<Self, ServerError> {
        let paths = list_images_walkdir_filtered(root)?;
        Self::from_paths(paths).ok_or_else(|| ServerError::NoImages(root.to_path_buf()))
    }

    /// Builds an index from an explicit list of paths. Returns `None` if empty.
    pub fn from_paths(mut paths: Vec<PathBuf>) -> Option<Self> {
        if paths.is_empty() {
            return None;
        }
        paths.sort();
        paths.dedup();
        Some(Self {
            entries: paths.into_iter().map(ImageEntry::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Picks one entry uniformly using `rng`.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &ImageEntry {
        // Non-empty by construction.
        &self.entries[rng.random_range(0..self.entries.len())]
    }
}
