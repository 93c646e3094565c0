//! Multi-file progress display and the log sink that shares the terminal with it

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Processing stages reported for each file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and decoding the source image
    Loading,
    /// Running the snapping pipeline
    Snapping,
    /// Encoding and writing the output
    Saving,
}

impl Stage {
    /// Number of stages a file passes through
    pub const COUNT: usize = 3;

    /// Stages completed once this stage has started
    pub const fn position(self) -> usize {
        match self {
            Self::Loading => 0,
            Self::Snapping => 1,
            Self::Saving => 2,
        }
    }

    /// Short label shown next to the bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Snapping => "snapping",
            Self::Saving => "saving",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct FileState {
    name: String,
    completed: usize,
    label: &'static str,
}

/// Coordinates progress display for batch operations
///
/// Shows one bar per file for small batches and adds a batch bar once the
/// file count exceeds the individual bar limit
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg:>9} [{bar:20.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Handle to the shared terminal area, for log output
    pub fn multi_progress(&self) -> MultiProgress {
        self.multi_progress.clone()
    }

    /// Create bars for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(Stage::COUNT as u64);
            pb.set_style(FILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Register a file that is about to be processed
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                completed: 0,
                label: Stage::Loading.label(),
            };
        }
        self.update_bars();
    }

    /// Report that a file entered `stage`
    pub fn advance(&mut self, index: usize, stage: Stage) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.completed = stage.position();
            state.label = stage.label();
        }
        self.update_bars();
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.name = format!("✓ {} ({:.2}s)", state.name, elapsed.as_secs_f64());
            state.completed = Stage::COUNT;
            state.label = "done";
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recent files on the available bars
    fn update_bars(&self) {
        let active: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar, state) in self.file_bars.iter().zip(visible) {
            bar.set_position(state.completed as u64);
            bar.set_message(state.label);
            bar.set_prefix(state.name.clone());
        }

        for bar in self.file_bars.iter().skip(visible.len()) {
            bar.set_position(0);
            bar.set_message("");
            bar.set_prefix("");
        }
    }
}

/// Log sink that prints above any active progress bars
pub struct ProgressLogger {
    multi_progress: Option<MultiProgress>,
    level: LevelFilter,
}

impl ProgressLogger {
    /// Logger writing records up to `level` to stderr
    pub const fn new(multi_progress: Option<MultiProgress>, level: LevelFilter) -> Self {
        Self {
            multi_progress,
            level,
        }
    }

    /// Install as the global logger
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger has already been set
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    // Allow print for user-facing diagnostics
    #[allow(clippy::print_stderr)]
    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.level(), record.args());
        match &self.multi_progress {
            Some(multi) => multi.suspend(|| eprintln!("{line}")),
            None => eprintln!("{line}"),
        }
    }

    fn flush(&self) {}
}
