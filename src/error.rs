use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::config::Topology;

/// Errors produced while loading an IDX dataset. All of them are fatal:
/// training never starts on partially loaded data.
#[derive(Debug)]
pub enum DatasetError {
    /// The file does not exist.
    NotFound { path: PathBuf },

    /// The file exists but could not be opened or read.
    Io { path: PathBuf, source: io::Error },

    /// Reading the data failed part way, e.g. a corrupt gzip stream.
    Read { what: &'static str, source: io::Error },

    /// The magic number at the start of the file is not the expected one.
    MalformedFormat {
        what: &'static str,
        found: u32,
        expected: u32,
    },

    /// A header field or buffer length differs from what the caller expects.
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// The payload ended before the amount of data the header declared.
    Truncated { what: &'static str },

    /// A label outside `[0, classes)`.
    InvalidLabel { index: usize, label: u8, classes: usize },
}

impl DatasetError {
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            DatasetError::NotFound { path }
        } else {
            DatasetError::Io { path, source }
        }
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::NotFound { path } => write!(f, "file not found: {}", path.display()),
            DatasetError::Io { path, source } => {
                write!(f, "failed to read '{}': {source}", path.display())
            }
            DatasetError::Read { what, source } => write!(f, "failed to read {what}: {source}"),
            DatasetError::MalformedFormat { what, found, expected } => write!(
                f,
                "invalid magic number for {what}: {found} (expected {expected})"
            ),
            DatasetError::SizeMismatch { what, got, expected } => {
                write!(f, "size mismatch for {what}: got {got}, expected {expected}")
            }
            DatasetError::Truncated { what } => write!(f, "unexpected end of data while reading {what}"),
            DatasetError::InvalidLabel { index, label, classes } => write!(
                f,
                "label {label} at index {index} is outside [0, {classes})"
            ),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io { source, .. } | DatasetError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Rejected training configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidBatchSize,
    InvalidEpochs,
    InvalidLearningRate(f64),
    InvalidTopology(Topology),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBatchSize => write!(f, "batch size must be at least 1"),
            ConfigError::InvalidEpochs => write!(f, "epoch count must be at least 1"),
            ConfigError::InvalidLearningRate(lr) => {
                write!(f, "learning rate must be finite and positive, got {lr}")
            }
            ConfigError::InvalidTopology(t) => write!(
                f,
                "every layer needs at least one unit, got {}-{}-{}",
                t.input, t.hidden, t.output
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
