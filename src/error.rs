//! Error types for mdsplit.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdsplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while splitting a document.
///
/// Only the input and output variants end a run. [`Error::Render`] is produced by a
/// [`DocumentModel`](crate::provider::DocumentModel) for a single block and is
/// always absorbed by the resilient renderer.
#[derive(Error, Debug)]
pub enum Error {
    /// The input document could not be read.
    #[error("error reading input from {input}: {source}")]
    ReadInput {
        /// Input name ("stdin" or the file path)
        input: String,
        source: io::Error,
    },

    /// The output directory could not be created.
    #[error("error creating output directory {}: {source}", .path.display())]
    CreateOutputDir { path: PathBuf, source: io::Error },

    /// A finished page could not be written.
    #[error("error writing page {index} to {}: {source}", .path.display())]
    WritePage {
        index: usize,
        path: PathBuf,
        source: io::Error,
    },

    /// A block could not be re-serialized.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A configuration value was not recognized.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Render("unsupported block: footnote_definition".to_string());
        assert_eq!(
            err.to_string(),
            "Rendering error: unsupported block: footnote_definition"
        );

        let err = Error::WritePage {
            index: 3,
            path: PathBuf::from("out/slide-3.md"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "error writing page 3 to out/slide-3.md: denied"
        );
    }

    #[test]
    fn test_read_input_display() {
        let err = Error::ReadInput {
            input: "stdin".to_string(),
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "closed"),
        };
        assert_eq!(err.to_string(), "error reading input from stdin: closed");
    }
}
