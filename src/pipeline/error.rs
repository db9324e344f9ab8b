use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::frontmatter::FrontMatterError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{0}")]
    Config(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("{}: Markdown file is not valid UTF-8", .path.display())]
    Encoding { path: PathBuf },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("conversion task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
