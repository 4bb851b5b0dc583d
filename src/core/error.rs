//! Error type shared by the preset modules.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for preset operations.
pub type PresetResult<T> = Result<T, PresetError>;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("invalid node type `{0}`: expected a category and a type name without path separators")]
    InvalidNodeType(String),

    #[error("invalid preset name `{0}`")]
    InvalidPresetName(String),

    #[error("environment variable {0} is not set")]
    MissingRoot(&'static str),

    #[error("no local preset named `{name}` for {node}")]
    UnknownPreset { node: String, name: String },

    #[error("a preset named `{0}` is already published; pass --overwrite to replace it")]
    NameTaken(String),

    #[error("selection {index} is out of range for {count} presets")]
    SelectionOutOfRange { index: usize, count: usize },

    #[error("`{tool}` not found: {source}")]
    ToolNotFound {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    ToolFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PresetError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| PresetError::Io {
            action,
            path,
            source,
        }
    }
}
