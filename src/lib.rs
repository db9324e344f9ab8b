//! vault2hugo library
//!
//! Migrates an Obsidian-style note vault into a Hugo content tree.
//!
//! # Modules
//!
//! - `core`: Text-level building blocks (front matter, wikilinks, slugs, dates)
//! - `pipeline`: Processor chain and the concurrent tree walker

pub mod core;
pub mod pipeline;

// Re-exports for convenience
pub use core::frontmatter::{Document, FrontMatter, FrontMatterError};
pub use core::note::{fallback_title, slugify, SourceFile};
pub use core::paths::ConvertPaths;
pub use core::timestamp::{GitTimestamps, NoTimestamps, TimestampSource};
pub use core::wikilink::{extract_wikilinks, rewrite_wikilinks};
pub use pipeline::{convert, ConversionReport, ConvertConfig, ConvertError, Pipeline};
