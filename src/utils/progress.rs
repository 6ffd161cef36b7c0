use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while one input file is converted. Log lines go through
/// [`FileProgress::log`] so they are not drawn over the spinner.
pub(crate) struct FileProgress {
    bar: ProgressBar,
    file_name: String,
}

impl FileProgress {
    pub(crate) fn start(file_name: &str) -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        bar.set_message(format!("Processing {}", file_name));
        bar.enable_steady_tick(Duration::from_millis(120));

        Ok(Self {
            bar,
            file_name: file_name.to_string(),
        })
    }

    pub(crate) fn record_done(&self, records: usize) {
        self.bar
            .set_message(format!("Processing {} ({} records)", self.file_name, records));
    }

    pub(crate) fn log(&self, f: impl FnOnce()) {
        self.bar.suspend(f);
    }

    pub(crate) fn finish(self, records: usize) {
        self.bar.finish_and_clear();
        log::info!("Wrote tables for {} record(s) from {}", records, self.file_name);
    }

    pub(crate) fn abandon(self) {
        self.bar.abandon();
    }
}
