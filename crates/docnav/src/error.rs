//! CLI error types.

use docnav_config::ConfigError;
use docnav_sidebar::{MetadataError, SidebarError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Metadata(#[from] MetadataError),

    #[error("{0}")]
    Sidebar(#[from] SidebarError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("No doc page matches {0}")]
    PageNotFound(String),

    #[error("{0}")]
    Validation(String),
}
