//! Progress reporting utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for comparison runs
#[derive(Debug)]
pub struct ProgressReporter {
    pub loading_pb: Option<ProgressBar>,
    pub comparing_pb: Option<ProgressBar>,
    pub candidates_pb: Option<ProgressBar>,
    show_progress: bool,
    start_time: std::time::Instant,
}

impl ProgressReporter {
    /// Create progress reporter for a workbook comparison
    pub fn new_for_sheets() -> Self {
        let loading_pb = create_spinner("Loading workbooks...");

        Self {
            loading_pb: Some(loading_pb),
            comparing_pb: None,
            candidates_pb: None,
            show_progress: true,
            start_time: std::time::Instant::now(),
        }
    }

    /// Create progress reporter for a batch of candidate documents
    pub fn new_for_batch(total: u64) -> Self {
        Self {
            loading_pb: None,
            comparing_pb: None,
            candidates_pb: Some(create_progress_bar(total, "Comparing documents")),
            show_progress: true,
            start_time: std::time::Instant::now(),
        }
    }

    /// Create minimal progress reporter (no progress bars)
    pub fn new_minimal() -> Self {
        Self {
            loading_pb: None,
            comparing_pb: None,
            candidates_pb: None,
            show_progress: false,
            start_time: std::time::Instant::now(),
        }
    }

    /// Lazily create the comparison spinner when needed
    fn ensure_comparing_pb(&mut self) {
        if self.show_progress && self.comparing_pb.is_none() {
            self.comparing_pb = Some(create_spinner("Comparing sheets..."));
        }
    }

    /// Finish loading and start the comparison spinner
    pub fn finish_loading(&mut self, message: &str) {
        if let Some(pb) = self.loading_pb.take() {
            pb.finish_with_message(message.to_string());
            self.ensure_comparing_pb();
        }
    }

    pub fn finish_comparing(&mut self, message: &str) {
        if let Some(pb) = self.comparing_pb.take() {
            pb.finish_with_message(message.to_string());
        }
    }

    /// Advance the batch bar; safe to call from worker threads
    pub fn candidate_done(&self, id: &str) {
        if let Some(pb) = &self.candidates_pb {
            pb.set_message(id.to_string());
            pb.inc(1);
        }
    }

    pub fn finish_batch(&mut self) {
        if let Some(pb) = self.candidates_pb.take() {
            pb.finish_with_message(format!("Done in {:.1?}", self.start_time.elapsed()));
        }
    }

    /// Finish all progress bars
    pub fn finish_all(&mut self, message: &str) {
        self.finish_loading(message);
        self.finish_comparing(message);
        self.finish_batch();
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // Ensure all progress bars are cleaned up silently
        for pb in [
            self.loading_pb.take(),
            self.comparing_pb.take(),
            self.candidates_pb.take(),
        ]
        .into_iter()
        .flatten()
        {
            pb.finish_and_clear();
        }
    }
}

/// Create a spinner progress bar
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar with known total
fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} {msg}")
            .expect("Invalid progress template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}
