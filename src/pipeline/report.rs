use std::path::PathBuf;

use serde::{Serialize, Serializer};

use super::ConvertError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Converted { links: usize },
    Copied,
}

#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    #[serde(serialize_with = "display")]
    pub error: ConvertError,
}

/// What a run did, file by file.
#[derive(Debug, Default, Serialize)]
pub struct ConversionReport {
    pub converted: Vec<PathBuf>,
    pub copied: Vec<PathBuf>,
    pub links_rewritten: usize,
    pub failures: Vec<FileFailure>,
}

impl ConversionReport {
    pub fn record(&mut self, path: PathBuf, outcome: Result<FileOutcome, ConvertError>) {
        match outcome {
            Ok(FileOutcome::Converted { links }) => {
                self.links_rewritten += links;
                self.converted.push(path);
            }
            Ok(FileOutcome::Copied) => self.copied.push(path),
            Err(error) => self.failures.push(FileFailure { path, error }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total_files(&self) -> usize {
        self.converted.len() + self.copied.len() + self.failures.len()
    }

    /// Task completion order is arbitrary; sort for stable output.
    pub(crate) fn sort(&mut self) {
        self.converted.sort();
        self.copied.sort();
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

fn display<S: Serializer>(error: &ConvertError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
