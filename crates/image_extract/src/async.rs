//! Async image extraction using tokio

use crate::{
    destination::CacheRoot,
    error::Result,
    extractor::{ExtractedImages, Extractor, ExtractorBuilder, TraversalPolicy},
    filter::ImageFilter,
    lock::DestinationLocks,
    progress::{NoProgressReporter, ProgressReporter},
};
use std::{path::Path, sync::Arc};
use tokio::task;

/// Builder for configuring async image extraction
pub struct AsyncExtractorBuilder<P: ProgressReporter + Send + Sync = NoProgressReporter> {
    inner: ExtractorBuilder<P>,
}

impl AsyncExtractorBuilder<NoProgressReporter> {
    /// Create a new async extractor builder writing under `cache_root`
    pub fn new(cache_root: impl Into<CacheRoot>) -> Self {
        Self {
            inner: ExtractorBuilder::new(cache_root),
        }
    }
}

impl<P: ProgressReporter + Send + Sync> AsyncExtractorBuilder<P> {
    /// Set which entries are extracted
    pub fn with_filter(mut self, filter: ImageFilter) -> Self {
        self.inner = self.inner.with_filter(filter);
        self
    }

    /// Set how entries escaping the destination are handled
    pub fn with_traversal_policy(mut self, policy: TraversalPolicy) -> Self {
        self.inner = self.inner.with_traversal_policy(policy);
        self
    }

    /// Serialize extractions into the same destination through `locks`
    pub fn with_destination_locks(mut self, locks: Arc<DestinationLocks>) -> Self {
        self.inner = self.inner.with_destination_locks(locks);
        self
    }

    /// Set a custom progress reporter
    pub fn with_progress_reporter<R: ProgressReporter + Send + Sync>(
        self,
        reporter: R,
    ) -> AsyncExtractorBuilder<R> {
        AsyncExtractorBuilder {
            inner: self.inner.with_progress_reporter(reporter),
        }
    }

    /// Build the async extractor
    pub fn build(self) -> AsyncExtractor<P> {
        AsyncExtractor {
            inner: Arc::new(self.inner.build()),
        }
    }
}

#[cfg(feature = "progress")]
impl AsyncExtractorBuilder<NoProgressReporter> {
    /// Set an indicatif progress bar
    pub fn with_progress_bar(
        self,
        progress_bar: indicatif::ProgressBar,
    ) -> AsyncExtractorBuilder<crate::progress::IndicatifProgressReporter> {
        AsyncExtractorBuilder {
            inner: self.inner.with_progress_bar(progress_bar),
        }
    }
}

/// Runs [`Extractor::extract`] on tokio's blocking thread pool
pub struct AsyncExtractor<P: ProgressReporter + Send + Sync = NoProgressReporter> {
    inner: Arc<Extractor<P>>,
}

impl<P: ProgressReporter + Send + Sync> Clone for AsyncExtractor<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<P: ProgressReporter + Send + Sync + 'static> AsyncExtractor<P> {
    /// Extract the accepted entries of `archive_path` without blocking the runtime.
    ///
    /// Dropping the returned future does not stop an extraction that already
    /// started; it runs to completion and its result is discarded.
    pub async fn extract(&self, archive_path: &Path) -> Result<ExtractedImages> {
        let archive_path = archive_path.to_owned();
        let inner = self.inner.clone();

        task::spawn_blocking(move || inner.extract(&archive_path)).await?
    }
}
