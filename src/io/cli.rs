//! Command-line interface for snapping single images or whole directories

use crate::algorithm::pipeline::transform_with_report;
use crate::io::configuration::{
    DEFAULT_K_COLORS, DEFAULT_MAX_KMEANS_ITERATIONS, DEFAULT_SEED, INPUT_EXTENSIONS,
    OUTPUT_EXTENSION, OUTPUT_SUFFIX, SnapConfig,
};
use crate::io::error::{Result, SnapError};
use crate::io::image::{load_raster, save_raster};
use crate::io::progress::{ProgressLogger, ProgressManager, Stage};
use clap::Parser;
use log::{LevelFilter, debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "pixelsnap")]
#[command(
    author,
    version,
    about = "Snap noisy pixel art onto a clean pixel grid with a bounded palette"
)]
/// Command-line arguments for the snapping tool
// Independent on/off switches
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output file (single input) or directory (directory input)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Maximum number of palette colors
    #[arg(short = 'k', long, default_value_t = DEFAULT_K_COLORS)]
    pub colors: usize,

    /// Seed for reproducible palette selection
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u32,

    /// Maximum k-means refinement rounds
    #[arg(short, long, default_value_t = DEFAULT_MAX_KMEANS_ITERATIONS)]
    pub iterations: usize,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-file grid details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Most verbose log level to emit
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Off
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    /// Pipeline configuration derived from the arguments
    pub fn config(&self) -> SnapConfig {
        SnapConfig {
            k_colors: self.colors,
            k_seed: self.seed,
            max_kmeans_iterations: self.iterations,
            ..SnapConfig::default()
        }
    }
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    config: SnapConfig,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let config = cli.config();

        Self {
            cli,
            config,
            progress_manager,
        }
    }

    /// Route log records to stderr above the progress bars
    ///
    /// Does nothing if a logger is already installed.
    pub fn init_logging(&self) {
        let multi = self
            .progress_manager
            .as_ref()
            .map(ProgressManager::multi_progress);
        let _ = ProgressLogger::new(multi, self.cli.log_level()).install();
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the target cannot be
    /// read, or any file fails to process
    pub fn process(&mut self) -> Result<()> {
        self.config.validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let result = files
            .iter()
            .enumerate()
            .try_for_each(|(index, file)| self.process_file(file, index));

        // Clear the bars before any error reaches the terminal
        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        result
    }

    /// Input files selected by the target, in processing order
    ///
    /// # Errors
    ///
    /// Returns an error if the target is missing, has an unsupported
    /// extension, or the directory cannot be read
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !has_input_extension(target) {
                return Err(SnapError::InvalidParameter {
                    parameter: "target",
                    value: target.display().to_string(),
                    reason: format!("must be one of: {}", INPUT_EXTENSIONS.join(", ")),
                });
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| SnapError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if path.is_file()
                    && has_input_extension(&path)
                    && !is_snapped_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(SnapError::InvalidParameter {
                parameter: "target",
                value: target.display().to_string(),
                reason: "must be an image file or directory".to_string(),
            })
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }
        let raster = load_raster(input_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, Stage::Snapping);
        }
        let (output, report) = transform_with_report(&raster, &self.config)?;
        debug!(
            "{}: steps {:.2}x{:.2}{}, grid {}x{}",
            input_path.display(),
            report.step_x,
            report.step_y,
            if report.used_fallback() { " (fallback)" } else { "" },
            output.width(),
            output.height()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, Stage::Saving);
        }
        save_raster(output, &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }
        info!("Saved: {}", output_path.display());

        Ok(())
    }

    /// Where the snapped version of `input_path` is written
    pub fn output_path(&self, input_path: &Path) -> PathBuf {
        match &self.cli.output {
            Some(output) if self.cli.target.is_file() => output.clone(),
            Some(output_dir) => output_dir.join(Self::output_name(input_path)),
            None => input_path
                .parent()
                .map_or_else(|| PathBuf::from(Self::output_name(input_path)), |parent| {
                    parent.join(Self::output_name(input_path))
                }),
        }
    }

    fn output_name(input_path: &Path) -> String {
        let stem = input_path.file_stem().unwrap_or_default();
        format!(
            "{}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}",
            stem.to_string_lossy()
        )
    }
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            INPUT_EXTENSIONS.contains(&ext.as_str())
        })
}

fn is_snapped_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
