//! Batch progress display

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Generating textures [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar counting finished (image, settings) pairs
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar expecting `total` generations
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar }
    }

    /// Show which output is being generated
    pub fn start_item(&self, output_path: &Path) {
        let display_name = output_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_message(display_name);
    }

    /// Count one finished generation, successful or not
    pub fn complete_item(&self) {
        self.bar.inc(1);
    }

    /// Number of generations counted so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar
    pub fn finish(&self) {
        self.bar.finish_with_message("Finished!");
    }
}
