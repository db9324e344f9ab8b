//! Conversion pipeline: vault tree in, Hugo content tree out.
//!
//! A [`Pipeline`] owns the per-run [`ConvertContext`] and the ordered
//! processor lists. [`walker::convert`] mirrors the directory tree and runs
//! [`Pipeline::convert_file`] for every file on the blocking pool.

pub mod error;
pub mod processor;
pub mod report;
pub mod walker;

use std::fs;
use std::path::PathBuf;

pub use error::ConvertError;
pub use processor::{
    ContentProcessor, DateFallback, FrontMatterProcessor, SlugFallback, TitleFallback,
    WikiLinkRewriter,
};
pub use report::{ConversionReport, FileFailure, FileOutcome};
pub use walker::convert;

use crate::core::frontmatter::Document;
use crate::core::note::SourceFile;
use crate::core::paths::ConvertPaths;
use crate::core::timestamp::{GitTimestamps, NoTimestamps};
use crate::core::wikilink::extract_wikilinks;

/// Options for one conversion run, as given on the command line.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub vault_dir: PathBuf,
    pub content_dir: PathBuf,
    pub clear_output_dir: bool,
    pub use_git_dates: bool,
}

/// Per-run state handed to every processor.
#[derive(Debug, Clone)]
pub struct ConvertContext {
    pub paths: ConvertPaths,
    pub clear_output_dir: bool,
}

pub struct Pipeline {
    context: ConvertContext,
    front_matter: Vec<Box<dyn FrontMatterProcessor>>,
    content: Vec<Box<dyn ContentProcessor>>,
}

impl Pipeline {
    /// A pipeline with no processors: Markdown is only re-serialized.
    pub fn new(context: ConvertContext) -> Self {
        Self {
            context,
            front_matter: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Title, slug and date fallbacks followed by wiki-link rewriting.
    pub fn hugo(config: &ConvertConfig) -> Self {
        let context = ConvertContext {
            paths: ConvertPaths::new(&config.vault_dir, &config.content_dir),
            clear_output_dir: config.clear_output_dir,
        };

        let date = if config.use_git_dates {
            DateFallback::new(GitTimestamps)
        } else {
            DateFallback::new(NoTimestamps)
        };

        Self::new(context)
            .with_front_matter(TitleFallback)
            .with_front_matter(SlugFallback)
            .with_front_matter(date)
            .with_content(WikiLinkRewriter)
    }

    pub fn with_front_matter(mut self, processor: impl FrontMatterProcessor + 'static) -> Self {
        self.front_matter.push(Box::new(processor));
        self
    }

    pub fn with_content(mut self, processor: impl ContentProcessor + 'static) -> Self {
        self.content.push(Box::new(processor));
        self
    }

    pub fn context(&self) -> &ConvertContext {
        &self.context
    }

    /// Converts a Markdown file or copies anything else byte for byte.
    pub fn convert_file(&self, file: &SourceFile) -> Result<FileOutcome, ConvertError> {
        let bytes = fs::read(&file.path).map_err(|e| ConvertError::io(&file.path, e))?;

        if !file.is_markdown() {
            fs::write(&file.dest, &bytes).map_err(|e| ConvertError::io(&file.dest, e))?;
            return Ok(FileOutcome::Copied);
        }

        let content = String::from_utf8(bytes).map_err(|_| ConvertError::Encoding {
            path: file.path.clone(),
        })?;
        let (rendered, links) = self.transform(file, &content)?;

        fs::write(&file.dest, rendered).map_err(|e| ConvertError::io(&file.dest, e))?;
        Ok(FileOutcome::Converted { links })
    }

    /// Runs the processors over one Markdown document. Returns the new text
    /// and the number of wiki-links in the original body.
    pub fn transform(
        &self,
        file: &SourceFile,
        content: &str,
    ) -> Result<(String, usize), ConvertError> {
        let to_error = |source| ConvertError::FrontMatter {
            path: file.path.clone(),
            source,
        };

        let mut doc = Document::parse(content).map_err(to_error)?;
        let links = extract_wikilinks(&doc.body).len();

        for processor in &self.front_matter {
            processor.process(&self.context, file, &mut doc.front_matter);
        }

        for processor in &self.content {
            doc.body = processor.process(&self.context, file, doc.body);
        }

        let rendered = doc.render().map_err(to_error)?;
        Ok((rendered, links))
    }
}
