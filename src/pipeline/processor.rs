//! Processor capabilities run by the pipeline, in registration order.
//!
//! Front-matter processors fill or adjust metadata; content processors
//! rewrite the Markdown body. Closures with the matching signature can be
//! registered directly.

use chrono::Local;

use super::ConvertContext;
use crate::core::frontmatter::FrontMatter;
use crate::core::note::{slugify, SourceFile};
use crate::core::timestamp::{file_modified, format_date, TimestampSource};
use crate::core::wikilink::rewrite_wikilinks;

pub trait FrontMatterProcessor: Send + Sync {
    fn process(&self, ctx: &ConvertContext, file: &SourceFile, front_matter: &mut FrontMatter);
}

pub trait ContentProcessor: Send + Sync {
    fn process(&self, ctx: &ConvertContext, file: &SourceFile, content: String) -> String;
}

impl<F> FrontMatterProcessor for F
where
    F: Fn(&ConvertContext, &SourceFile, &mut FrontMatter) + Send + Sync,
{
    fn process(&self, ctx: &ConvertContext, file: &SourceFile, front_matter: &mut FrontMatter) {
        self(ctx, file, front_matter)
    }
}

impl<F> ContentProcessor for F
where
    F: Fn(&ConvertContext, &SourceFile, String) -> String + Send + Sync,
{
    fn process(&self, ctx: &ConvertContext, file: &SourceFile, content: String) -> String {
        self(ctx, file, content)
    }
}

/// Uses the file name when the title is empty. Must run before [`SlugFallback`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleFallback;

impl FrontMatterProcessor for TitleFallback {
    fn process(&self, _ctx: &ConvertContext, file: &SourceFile, front_matter: &mut FrontMatter) {
        if front_matter.title.is_empty() {
            front_matter.title = file.title.clone();
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SlugFallback;

impl FrontMatterProcessor for SlugFallback {
    fn process(&self, _ctx: &ConvertContext, _file: &SourceFile, front_matter: &mut FrontMatter) {
        if front_matter.slug.is_empty() {
            front_matter.slug = slugify(&front_matter.title);
        }
    }
}

/// Fills an empty date from, in order: the timestamp source, the file's
/// mtime, the current time.
pub struct DateFallback {
    source: Box<dyn TimestampSource>,
}

impl DateFallback {
    pub fn new(source: impl TimestampSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

impl FrontMatterProcessor for DateFallback {
    fn process(&self, _ctx: &ConvertContext, file: &SourceFile, front_matter: &mut FrontMatter) {
        if !front_matter.date.is_empty() {
            return;
        }

        front_matter.date = self
            .source
            .last_modified(&file.path)
            .or_else(|| file_modified(&file.path))
            .map(|dt| format_date(&dt))
            .unwrap_or_else(|| format_date(&Local::now()));
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WikiLinkRewriter;

impl ContentProcessor for WikiLinkRewriter {
    fn process(&self, _ctx: &ConvertContext, _file: &SourceFile, content: String) -> String {
        rewrite_wikilinks(&content)
    }
}
