//! Resolves a file or a directory of RAW files and processes each one.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    common::messages::Language,
    conversions::paths::{PathTarget, RAW_EXTENSION, has_extension},
    conversions::raw_to_tiff::RawToTiffPipeline,
    conversions::report::{BatchReport, ConsoleReporter, FileFailure, FileOutcome, ProgressReporter},
    preview::{PreviewSink, WindowPreview},
    raw::{RawImageReader, RawOverrides},
    tiff::{ConversionConfig, TiffWriter},
};

/// What happens to each decoded file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Write a TIFF
    #[default]
    Save,
    /// Show a scaled preview window
    Preview,
}

/// Options shared by every file of one invocation
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Decoding parameters, each explicit or auto-detected
    pub overrides: RawOverrides,
    pub mode: OutputMode,
    /// Output file or directory; `None` writes next to each input
    pub target: Option<PathBuf>,
    /// Extension of the files picked up from a directory
    pub raw_extension: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            overrides: RawOverrides::auto(),
            mode: OutputMode::Save,
            target: None,
            raw_extension: RAW_EXTENSION.to_string(),
        }
    }
}

pub struct PathWalker<'a, R: RawImageReader, W: TiffWriter> {
    pipeline: &'a RawToTiffPipeline<R, W>,
    preview: &'a dyn PreviewSink,
    options: &'a BatchOptions,
    target: PathTarget,
}

impl<'a, R: RawImageReader, W: TiffWriter> PathWalker<'a, R, W> {
    pub fn new(
        pipeline: &'a RawToTiffPipeline<R, W>,
        preview: &'a dyn PreviewSink,
        options: &'a BatchOptions,
    ) -> Self {
        Self {
            pipeline,
            preview,
            options,
            target: PathTarget::from_option(options.target.clone()),
        }
    }

    /// Processes `path`, a single file or a directory of RAW files.
    ///
    /// A failing file is reported and skipped. Only a `path` that is neither a
    /// file nor a directory fails the whole call.
    #[instrument(skip(self, path, reporter), fields(path = %path.display()))]
    pub fn process_path(
        &self,
        path: &Path,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<BatchReport> {
        let inputs = if path.is_dir() {
            let files = self.collect_raw_files(path)?;
            if files.is_empty() {
                warn!("No .{} files in {}", self.options.raw_extension, path.display());
                reporter.no_raw_files(path);
            }
            files
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            error!("Path is neither a folder nor a file: {}", path.display());
            reporter.invalid_path(path);
            return Err(ConversionError::InvalidPath(path.display().to_string()));
        };

        let mut report = BatchReport::default();
        for input in inputs {
            match self.process_file(&input) {
                Ok(outcome) => {
                    reporter.file_done(&outcome);
                    report.completed.push(outcome);
                }
                Err(error) => {
                    error!(input = %input.display(), "Skipping file: {}", error);
                    let failure = FileFailure { input, error };
                    reporter.file_failed(&failure);
                    report.failed.push(failure);
                }
            }
        }

        info!(
            completed = report.completed.len(),
            failed = report.failed.len(),
            "Batch finished"
        );
        reporter.finished(&report);
        Ok(report)
    }

    /// Regular files of `dir` with the RAW extension, sorted by name.
    fn collect_raw_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && has_extension(&path, &self.options.raw_extension) {
                files.push(path);
            }
        }
        files.sort();
        debug!("Found {} RAW file(s) in {}", files.len(), dir.display());
        Ok(files)
    }

    fn process_file(&self, input: &Path) -> Result<FileOutcome> {
        match self.options.mode {
            OutputMode::Save => {
                let output = self.target.resolve(input);
                self.pipeline
                    .convert_file(input, &self.options.overrides, &output)?;
                Ok(FileOutcome::Saved {
                    input: input.to_path_buf(),
                    output,
                })
            }
            OutputMode::Preview => {
                self.pipeline
                    .preview_file(input, &self.options.overrides, self.preview)?;
                Ok(FileOutcome::Previewed {
                    input: input.to_path_buf(),
                })
            }
        }
    }
}

/// Converts or previews everything under `path` with the default reader,
/// TIFF writer, preview window and console reporter.
pub fn run(
    path: &Path,
    options: &BatchOptions,
    config: ConversionConfig,
    language: Language,
) -> Result<BatchReport> {
    let pipeline = RawToTiffPipeline::new(config);
    let preview = WindowPreview;
    let mut reporter = ConsoleReporter::new(language);

    PathWalker::new(&pipeline, &preview, options).process_path(path, &mut reporter)
}
