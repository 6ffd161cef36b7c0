use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning a GenBank file into its table files.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input is not a readable GenBank record stream.
    #[error("failed to parse GenBank records from {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// An input could not be opened, or an output could not be created or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ConvertError::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}
