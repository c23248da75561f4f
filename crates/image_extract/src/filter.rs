//! Inclusion filter deciding which archive entries are extracted

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Component, Path};

use crate::entry::ArchiveEntry;

/// Directory macOS Finder adds to zip files it creates
const MACOS_METADATA_DIR: &str = "__MACOSX";
/// Prefix of AppleDouble resource-fork files
const APPLE_DOUBLE_PREFIX: &str = "._";

/// Selects image entries by kind and file extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFilter {
    extensions: BTreeSet<String>,
}

impl ImageFilter {
    /// Accept only `.jpg` files
    pub fn jpg_only() -> Self {
        Self::with_extensions(["jpg"])
    }

    /// Accept `.jpg`, `.jpeg` and `.png` files
    pub fn common_images() -> Self {
        Self::with_extensions(["jpg", "jpeg", "png"])
    }

    /// Accept a custom set of extensions. Case and a leading dot are ignored.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// The accepted extensions, lowercase and without a leading dot
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Whether the entry should be extracted
    pub fn accepts(&self, entry: &ArchiveEntry) -> bool {
        entry.is_file() && !is_metadata_entry(&entry.name) && self.matches_name(&entry.name)
    }

    /// Whether the lowercased extension of `name` is accepted
    pub fn matches_name(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::jpg_only()
    }
}

/// Whether the entry is macOS archive metadata rather than content
pub fn is_metadata_entry(name: &str) -> bool {
    let path = Path::new(name);
    let in_metadata_dir = path
        .components()
        .any(|component| component == Component::Normal(OsStr::new(MACOS_METADATA_DIR)));
    let apple_double = path
        .file_name()
        .and_then(|file_name| file_name.to_str())
        .is_some_and(|file_name| file_name.starts_with(APPLE_DOUBLE_PREFIX));

    in_metadata_dir || apple_double
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use rstest::rstest;

    #[rstest]
    #[case("a.jpg", true)]
    #[case("sub/b.jpg", true)]
    #[case("LOUD.JPG", true)]
    #[case("mixed.JpG", true)]
    #[case("notes.txt", false)]
    #[case("photo.jpeg", false)]
    #[case("photo.png", false)]
    #[case("jpg", false)]
    #[case(".jpg", false)]
    #[case("archive.jpg.zip", false)]
    #[case("__MACOSX/._a.jpg", false)]
    #[case("__MACOSX/sub/c.jpg", false)]
    #[case("sub/._b.jpg", false)]
    fn test_jpg_only(#[case] name: &str, #[case] accepted: bool) {
        let filter = ImageFilter::jpg_only();
        assert_eq!(filter.accepts(&ArchiveEntry::file(name)), accepted);
    }

    #[rstest]
    #[case("a.jpg", true)]
    #[case("b.JPEG", true)]
    #[case("c.png", true)]
    #[case("d.gif", false)]
    #[case("__MACOSX/._c.png", false)]
    fn test_common_images(#[case] name: &str, #[case] accepted: bool) {
        let filter = ImageFilter::common_images();
        assert_eq!(filter.accepts(&ArchiveEntry::file(name)), accepted);
    }

    #[test]
    fn test_non_files_are_rejected() {
        let filter = ImageFilter::jpg_only();

        let mut dir = ArchiveEntry::file("album.jpg/");
        dir.kind = EntryKind::Directory;
        assert!(!filter.accepts(&dir));

        let mut link = ArchiveEntry::file("link.jpg");
        link.kind = EntryKind::Symlink;
        assert!(!filter.accepts(&link));
    }

    #[test]
    fn test_custom_extensions_are_normalised() {
        let filter = ImageFilter::with_extensions([".WebP", "", "Tiff"]);
        assert_eq!(filter.extensions().collect::<Vec<_>>(), ["tiff", "webp"]);
        assert!(filter.matches_name("scan.TIFF"));
        assert!(!filter.matches_name("a.jpg"));
    }

    #[test]
    fn test_default_is_jpg_only() {
        assert_eq!(ImageFilter::default(), ImageFilter::jpg_only());
    }
}
