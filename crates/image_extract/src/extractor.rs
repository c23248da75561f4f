//! Main extractor implementation

use crate::{
    destination::CacheRoot,
    entry::ArchiveEntry,
    error::{ExtractError, Result},
    filter::ImageFilter,
    lock::DestinationLocks,
    progress::{NoProgressReporter, ProgressReporter},
    sanitize::resolve_entry_path,
};
use std::{
    collections::HashSet,
    io::{BufReader, ErrorKind, Read},
    path::{Path, PathBuf},
    sync::Arc,
};

/// What to do with an accepted entry whose path escapes the destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalPolicy {
    /// Fail the whole extraction with [`ExtractError::PathTraversal`]
    #[default]
    Abort,
    /// Log a warning, skip the entry and continue
    Skip,
}

/// Outcome of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImages {
    destination: PathBuf,
    files: Vec<PathBuf>,
    skipped: usize,
}

impl ExtractedImages {
    /// The directory the images were extracted into
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Extracted files in archive order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of entries that were not extracted
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of extracted files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no entry was extracted
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Consume the result, returning the extracted files in archive order
    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }
}

/// Builder for configuring image extraction
pub struct ExtractorBuilder<P: ProgressReporter = NoProgressReporter> {
    cache_root: CacheRoot,
    filter: ImageFilter,
    traversal_policy: TraversalPolicy,
    progress_reporter: P,
    locks: Option<Arc<DestinationLocks>>,
}

impl ExtractorBuilder<NoProgressReporter> {
    /// Create a new extractor builder writing under `cache_root`
    pub fn new(cache_root: impl Into<CacheRoot>) -> Self {
        Self {
            cache_root: cache_root.into(),
            filter: ImageFilter::default(),
            traversal_policy: TraversalPolicy::default(),
            progress_reporter: NoProgressReporter,
            locks: None,
        }
    }

    /// Create a new extractor builder writing under the platform cache directory
    pub fn with_platform_cache_root() -> Option<Self> {
        CacheRoot::platform().map(Self::new)
    }
}

impl<P: ProgressReporter> ExtractorBuilder<P> {
    /// Set which entries are extracted
    pub fn with_filter(mut self, filter: ImageFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set how entries escaping the destination are handled
    pub fn with_traversal_policy(mut self, policy: TraversalPolicy) -> Self {
        self.traversal_policy = policy;
        self
    }

    /// Serialize extractions into the same destination through `locks`
    pub fn with_destination_locks(mut self, locks: Arc<DestinationLocks>) -> Self {
        self.locks = Some(locks);
        self
    }

    /// Set a custom progress reporter
    pub fn with_progress_reporter<R: ProgressReporter>(self, reporter: R) -> ExtractorBuilder<R> {
        ExtractorBuilder {
            cache_root: self.cache_root,
            filter: self.filter,
            traversal_policy: self.traversal_policy,
            progress_reporter: reporter,
            locks: self.locks,
        }
    }

    /// Build the extractor
    pub fn build(self) -> Extractor<P> {
        Extractor {
            cache_root: self.cache_root,
            filter: self.filter,
            traversal_policy: self.traversal_policy,
            progress_reporter: self.progress_reporter,
            locks: self.locks,
        }
    }
}

#[cfg(feature = "progress")]
impl ExtractorBuilder<NoProgressReporter> {
    /// Set an indicatif progress bar
    pub fn with_progress_bar(
        self,
        progress_bar: indicatif::ProgressBar,
    ) -> ExtractorBuilder<crate::progress::IndicatifProgressReporter> {
        self.with_progress_reporter(crate::progress::IndicatifProgressReporter::new(
            progress_bar,
        ))
    }
}

/// Extracts the images of a zip archive into a per-archive cache directory
pub struct Extractor<P: ProgressReporter = NoProgressReporter> {
    cache_root: CacheRoot,
    filter: ImageFilter,
    traversal_policy: TraversalPolicy,
    progress_reporter: P,
    locks: Option<Arc<DestinationLocks>>,
}

impl<P: ProgressReporter> Extractor<P> {
    /// The cache root extractions are written under
    pub fn cache_root(&self) -> &CacheRoot {
        &self.cache_root
    }

    /// The directory `extract` would write the given archive to
    pub fn destination_for(&self, archive_path: &Path) -> Result<PathBuf> {
        self.cache_root.destination_for(archive_path)
    }

    /// Extract the accepted entries of `archive_path`.
    ///
    /// Any previous extraction of an archive with the same base name is
    /// removed first. On failure, files written before the failing entry are
    /// left in place; the next call starts from a clean directory again.
    #[tracing::instrument(skip(self, archive_path), fields(archive = %archive_path.display()))]
    pub fn extract(&self, archive_path: &Path) -> Result<ExtractedImages> {
        let destination = self.cache_root.destination_for(archive_path)?;
        tracing::debug!(destination = %destination.display(), "derived destination directory");

        let _guard = self.locks.as_ref().map(|locks| locks.lock(&destination));

        prepare_destination(&destination)?;

        let file = fs_err::File::open(archive_path)
            .map_err(|e| ExtractError::archive_open(archive_path, e))?;
        let mut archive = zip::ZipArchive::new(BufReader::new(file))
            .map_err(|e| ExtractError::archive_open(archive_path, e))?;

        self.progress_reporter.on_start(Some(archive.len() as u64));

        let mut files = Vec::new();
        let mut written_targets = HashSet::new();
        let mut skipped = 0;
        for index in 0..archive.len() {
            // Metadata only, skipped entries are never decrypted or decompressed
            let entry = {
                let record = archive
                    .by_index_raw(index)
                    .map_err(|e| ExtractError::extraction(format!("#{index}"), e))?;
                ArchiveEntry::from_record(
                    record.name(),
                    record.is_dir(),
                    record.unix_mode(),
                    record.size(),
                    record.compressed_size(),
                    record.compression(),
                )
            };

            if !self.filter.accepts(&entry) {
                tracing::debug!(entry = %entry.name, kind = ?entry.kind, "skipping entry");
                skipped += 1;
            } else {
                match resolve_entry_path(&entry.name, &destination) {
                    Ok(target) => {
                        let mut zip_file = archive
                            .by_index(index)
                            .map_err(|e| ExtractError::extraction(entry.name.as_str(), e))?;
                        let written = write_entry(&mut zip_file, &target)
                            .map_err(|e| ExtractError::extraction(entry.name.as_str(), e))?;
                        tracing::debug!(entry = %entry.name, bytes = written, "extracted entry");
                        // A repeated name overwrites the file but keeps its first position
                        if written_targets.insert(target.clone()) {
                            files.push(target);
                        }
                    }
                    Err(err) if self.traversal_policy == TraversalPolicy::Skip => {
                        tracing::warn!(entry = %entry.name, "skipping entry outside of destination: {err}");
                        skipped += 1;
                    }
                    Err(err) => return Err(err),
                }
            }

            self.progress_reporter.on_progress(index as u64 + 1);
        }

        tracing::info!(
            destination = %destination.display(),
            extracted = files.len(),
            skipped,
            "extracted images"
        );
        self.progress_reporter
            .on_finish(&format!("Extracted {} images", files.len()));

        Ok(ExtractedImages {
            destination,
            files,
            skipped,
        })
    }
}

/// Remove any previous extraction and create an empty destination
fn prepare_destination(destination: &Path) -> Result<()> {
    let removed = match fs_err::symlink_metadata(destination) {
        Ok(metadata) if metadata.is_dir() => {
            tracing::debug!(destination = %destination.display(), "removing previous extraction");
            fs_err::remove_dir_all(destination)
        }
        Ok(_) => fs_err::remove_file(destination),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    };
    removed.map_err(|e| ExtractError::directory_preparation(destination, e))?;

    fs_err::create_dir_all(destination)
        .map_err(|e| ExtractError::directory_preparation(destination, e))
}

/// Stream the decompressed payload of an entry to `target`
fn write_entry(reader: &mut impl Read, target: &Path) -> std::io::Result<u64> {
    if let Some(parent) = target.parent() {
        fs_err::create_dir_all(parent)?;
    }
    let mut output = fs_err::File::create(target)?;
    std::io::copy(reader, &mut output)
}
