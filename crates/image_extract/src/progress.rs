//! Progress reporting for extraction

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

/// A trait for reporting progress while archive entries are processed
pub trait ProgressReporter {
    /// Called once the archive is open, with the number of entries it holds
    fn on_start(&self, total_entries: Option<u64>);

    /// Called after each entry, extracted or skipped
    fn on_progress(&self, entries_processed: u64);

    /// Called when extraction finishes successfully
    fn on_finish(&self, message: &str);
}

/// A no-op progress reporter
#[derive(Default)]
pub struct NoProgressReporter;

impl ProgressReporter for NoProgressReporter {
    fn on_start(&self, _total_entries: Option<u64>) {}
    fn on_progress(&self, _entries_processed: u64) {}
    fn on_finish(&self, _message: &str) {}
}

/// Progress reporter using indicatif
#[cfg(feature = "progress")]
pub struct IndicatifProgressReporter {
    progress_bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgressReporter {
    /// Create a new indicatif progress reporter
    pub fn new(progress_bar: ProgressBar) -> Self {
        Self { progress_bar }
    }

    /// Create a new indicatif progress reporter with default styling
    pub fn with_default_style() -> Self {
        let progress_bar = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{prefix:.bold.dim} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} entries {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style);
        Self { progress_bar }
    }

    /// The underlying progress bar
    pub fn progress_bar(&self) -> &ProgressBar {
        &self.progress_bar
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgressReporter {
    fn on_start(&self, total_entries: Option<u64>) {
        if let Some(total) = total_entries {
            self.progress_bar.set_length(total);
        }
    }

    fn on_progress(&self, entries_processed: u64) {
        self.progress_bar.set_position(entries_processed);
    }

    fn on_finish(&self, message: &str) {
        self.progress_bar.finish_with_message(message.to_string());
    }
}

impl<P: ProgressReporter + ?Sized> ProgressReporter for std::sync::Arc<P> {
    fn on_start(&self, total_entries: Option<u64>) {
        (**self).on_start(total_entries);
    }

    fn on_progress(&self, entries_processed: u64) {
        (**self).on_progress(entries_processed);
    }

    fn on_finish(&self, message: &str) {
        (**self).on_finish(message);
    }
}
