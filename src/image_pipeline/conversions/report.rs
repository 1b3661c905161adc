//! Per-file results of a batch and how they reach the console.

use std::path::{Path, PathBuf};

use crate::image_pipeline::common::error::ConversionError;
use crate::image_pipeline::common::messages::{Language, Message};

/// A file that was handled successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Saved { input: PathBuf, output: PathBuf },
    Previewed { input: PathBuf },
}

impl FileOutcome {
    pub fn input(&self) -> &Path {
        match self {
            FileOutcome::Saved { input, .. } | FileOutcome::Previewed { input } => input,
        }
    }
}

/// A file that was skipped because of an error
#[derive(Debug)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: ConversionError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub completed: Vec<FileOutcome>,
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Receives batch events as they happen.
pub trait ProgressReporter {
    fn file_done(&mut self, outcome: &FileOutcome);
    fn file_failed(&mut self, failure: &FileFailure);
    fn invalid_path(&mut self, path: &Path);
    fn no_raw_files(&mut self, dir: &Path);
    fn finished(&mut self, report: &BatchReport);
}

/// Prints localized report lines, successes to stdout and failures to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    language: Language,
}

impl ConsoleReporter {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn file_done(&mut self, outcome: &FileOutcome) {
        let line = match outcome {
            FileOutcome::Saved { output, .. } => {
                self.language.render(Message::TiffSaved, &[("path", &output.display())])
            }
            FileOutcome::Previewed { input } => {
                self.language.render(Message::PreviewClosed, &[("path", &input.display())])
            }
        };
        println!("{line}");
    }

    fn file_failed(&mut self, failure: &FileFailure) {
        eprintln!(
            "{}",
            self.language.render(
                Message::FileFailed,
                &[("path", &failure.input.display()), ("error", &failure.error)],
            )
        );
    }

    fn invalid_path(&mut self, path: &Path) {
        eprintln!("{}", self.language.render(Message::InvalidPath, &[("path", &path.display())]));
    }

    fn no_raw_files(&mut self, dir: &Path) {
        println!("{}", self.language.render(Message::NoRawFiles, &[("path", &dir.display())]));
    }

    fn finished(&mut self, report: &BatchReport) {
        println!(
            "{}",
            self.language.render(
                Message::Summary,
                &[
                    ("converted", &report.completed.len()),
                    ("failed", &report.failed.len()),
                ],
            )
        );
    }
}
