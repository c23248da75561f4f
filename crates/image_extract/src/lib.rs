//! Idempotent extraction of images from zip archives
//!
//! Every archive is extracted into its own directory,
//! `<cache root>/ExtractedImages/<archive base name>`. That directory is
//! removed and recreated on each call, so repeated extractions never
//! accumulate stale files.
//!
//! # Features
//!
//! - Inclusion filter on entry kind and file extension (`.jpg` by default)
//! - macOS `__MACOSX` / AppleDouble metadata entries are never extracted
//! - Entries escaping the destination directory are rejected
//! - Output paths in archive order
//! - Progress reporting via `indicatif`
//! - Per-destination locking for concurrent callers
//! - Both sync and async APIs
//!
//! # Examples
//!
//! ## Basic extraction
//!
//! ```no_run
//! use image_extract::ExtractorBuilder;
//! use std::path::Path;
//!
//! let extractor = ExtractorBuilder::new("/var/cache/my-app").build();
//!
//! let images = extractor.extract(Path::new("photos.zip"))?;
//! for path in images.files() {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Accepting more image types
//!
//! ```no_run
//! use image_extract::{ExtractorBuilder, ImageFilter, TraversalPolicy};
//! use std::path::Path;
//!
//! let extractor = ExtractorBuilder::new("/var/cache/my-app")
//!     .with_filter(ImageFilter::common_images())
//!     .with_traversal_policy(TraversalPolicy::Skip)
//!     .build();
//!
//! extractor.extract(Path::new("photos.zip"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod destination;
pub mod entry;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod lock;
pub mod progress;
pub mod sanitize;

#[cfg(feature = "tokio")]
pub mod r#async;

pub use destination::{CacheRoot, EXTRACTED_IMAGES_DIR};
pub use entry::{ArchiveEntry, EntryKind};
pub use error::{ExtractError, Result};
pub use extractor::{ExtractedImages, Extractor, ExtractorBuilder, TraversalPolicy};
pub use filter::ImageFilter;
pub use lock::DestinationLocks;
pub use progress::{NoProgressReporter, ProgressReporter};

#[cfg(feature = "progress")]
pub use progress::IndicatifProgressReporter;

#[cfg(feature = "tokio")]
pub use r#async::{AsyncExtractor, AsyncExtractorBuilder};

use std::path::Path;

/// Extract the `.jpg` images of `archive_path` under `cache_root` with the
/// default configuration
pub fn extract_images(
    cache_root: impl Into<CacheRoot>,
    archive_path: &Path,
) -> Result<ExtractedImages> {
    ExtractorBuilder::new(cache_root).build().extract(archive_path)
}

/// Check if a file name is accepted by the default image filter
pub fn is_image(filename: &str) -> bool {
    ImageFilter::default().accepts(&ArchiveEntry::file(filename))
}
