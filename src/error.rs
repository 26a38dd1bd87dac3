//! Error types for conversion and page generation.

use std::path::PathBuf;

/// Malformed markdown detected while parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unterminated delimiter `{delimiter}`")]
    UnterminatedDelimiter { delimiter: &'static str },

    #[error("invalid quote line: {line:?}")]
    InvalidQuoteLine { line: String },

    #[error("invalid heading level: {level}")]
    InvalidHeadingLevel { level: usize },
}

/// A markup tree that cannot be serialized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("leaf node missing value")]
    MissingValue,

    #[error("parent node missing tag")]
    MissingTag,

    #[error("parent node missing children")]
    MissingChildren,
}

/// Error returned by [`crate::convert`] and [`crate::markdown_to_html`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("{0}")]
    Render(#[from] RenderError),
}

/// Error returned when a page cannot be generated.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("no h1 header found in markdown")]
    TitleNotFound,

    #[error("{}: no h1 header found in markdown", .path.display())]
    Untitled { path: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Convert {
        path: PathBuf,
        #[source]
        source: Error,
    },

    #[error("{0}")]
    Markdown(#[from] Error),
}

impl PageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
