pub mod frontmatter;
pub mod note;
pub mod paths;
pub mod timestamp;
pub mod wikilink;
