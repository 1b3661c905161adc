//! Output path derivation.

use std::path::{Path, PathBuf};

/// Extension of the files picked up when walking a directory.
pub const RAW_EXTENSION: &str = "raw";

/// Extension given to every written TIFF.
pub const TIFF_EXTENSION: &str = "tiff";

/// Where the TIFF for an input file is written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PathTarget {
    /// Next to the input, with the extension swapped
    #[default]
    Sibling,
    /// Inside the given directory, named after the input
    Directory(PathBuf),
    /// Exactly the given file
    File(PathBuf),
}

impl PathTarget {
    /// Classifies a caller-supplied target. Existing directories become
    /// [`PathTarget::Directory`], any other path is taken as a file.
    pub fn from_option(target: Option<PathBuf>) -> Self {
        match target {
            None => PathTarget::Sibling,
            Some(path) if path.is_dir() => PathTarget::Directory(path),
            Some(path) => PathTarget::File(path),
        }
    }

    pub fn resolve(&self, input: &Path) -> PathBuf {
        match self {
            PathTarget::Sibling => input.with_extension(TIFF_EXTENSION),
            PathTarget::Directory(dir) => {
                let name = input.file_name().map(Path::new).unwrap_or(input);
                dir.join(name.with_extension(TIFF_EXTENSION))
            }
            PathTarget::File(file) => file.clone(),
        }
    }
}

/// Case-insensitive check that the file name ends in `.{extension}`.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_lowercase()
                .ends_with(&format!(".{}", extension.to_lowercase()))
        })
        .unwrap_or(false)
}
