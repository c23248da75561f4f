//! Derivation of the per-archive destination directory

use std::path::{Path, PathBuf};

use crate::error::{ExtractError, Result};

/// Folder under the cache root that holds all extractions
pub const EXTRACTED_IMAGES_DIR: &str = "ExtractedImages";

/// Root directory under which extractions are placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRoot {
    root: PathBuf,
}

impl CacheRoot {
    /// Use an explicit directory as cache root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use the platform cache directory, if the platform has one
    pub fn platform() -> Option<Self> {
        dirs::cache_dir().map(Self::new)
    }

    /// The configured root directory
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// The directory holding every extraction, `<root>/ExtractedImages`
    pub fn extracted_images_dir(&self) -> PathBuf {
        self.root.join(EXTRACTED_IMAGES_DIR)
    }

    /// Derive `<root>/ExtractedImages/<archive base name>` for an archive.
    ///
    /// The base name is the archive's file name with its final extension
    /// removed, so `photos.zip` and `photos.tar.zip` map to `photos` and
    /// `photos.tar`. A relative root is resolved against the current
    /// directory.
    pub fn destination_for(&self, archive_path: &Path) -> Result<PathBuf> {
        let base_name = archive_path.file_stem().ok_or_else(|| {
            ExtractError::directory_preparation(
                archive_path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "archive path has no file name",
                ),
            )
        })?;

        let root = std::path::absolute(&self.root)
            .map_err(|e| ExtractError::directory_preparation(&self.root, e))?;

        Ok(root.join(EXTRACTED_IMAGES_DIR).join(base_name))
    }
}

impl From<PathBuf> for CacheRoot {
    fn from(root: PathBuf) -> Self {
        Self::new(root)
    }
}

impl From<&Path> for CacheRoot {
    fn from(root: &Path) -> Self {
        Self::new(root)
    }
}

impl From<&str> for CacheRoot {
    fn from(root: &str) -> Self {
        Self::new(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_destination_strips_final_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let root = CacheRoot::new(tmp.path());

        assert_eq!(
            root.destination_for(Path::new("/inbox/photos.zip")).unwrap(),
            tmp.path().join("ExtractedImages").join("photos")
        );
        assert_eq!(
            root.destination_for(Path::new("backup.tar.zip")).unwrap(),
            tmp.path().join("ExtractedImages").join("backup.tar")
        );
        assert_eq!(
            root.destination_for(Path::new("no_extension")).unwrap(),
            tmp.path().join("ExtractedImages").join("no_extension")
        );
    }

    #[test]
    fn test_distinct_archives_get_distinct_destinations() {
        let root = CacheRoot::new("/cache");
        let a = root.destination_for(Path::new("A.zip")).unwrap();
        let b = root.destination_for(Path::new("B.zip")).unwrap();
        assert_ne!(a, b);
        assert!(!a.starts_with(&b) && !b.starts_with(&a));
    }

    #[test]
    fn test_same_base_name_shares_destination() {
        let root = CacheRoot::new("/cache");
        assert_eq!(
            root.destination_for(Path::new("/one/photos.zip")).unwrap(),
            root.destination_for(Path::new("/two/photos.zip")).unwrap()
        );
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let root = CacheRoot::new("relative/cache");
        let destination = root.destination_for(Path::new("photos.zip")).unwrap();
        assert!(destination.is_absolute());
        assert!(destination.ends_with("relative/cache/ExtractedImages/photos"));
    }

    #[test]
    fn test_path_without_file_name_is_rejected() {
        let root = CacheRoot::new("/cache");
        assert_matches!(
            root.destination_for(Path::new("..")),
            Err(ExtractError::DirectoryPreparation { .. })
        );
    }
}
