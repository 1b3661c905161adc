//! Pipeline conversions module
//!
//! This module contains orchestration logic for turning RAW files into TIFFs
//! or previews, one file or a whole directory at a time.

mod raw_to_tiff;
pub mod paths;
pub mod report;
pub mod walker;


pub use raw_to_tiff::RawToTiffPipeline;
pub use paths::{PathTarget, RAW_EXTENSION, TIFF_EXTENSION};
pub use report::{BatchReport, ConsoleReporter, FileFailure, FileOutcome, ProgressReporter};
pub use walker::{BatchOptions, OutputMode, PathWalker, run};
