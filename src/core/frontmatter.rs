use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

lazy_static! {
    static ref FRONTMATTER_RE: Regex =
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)").unwrap();
    static ref OPENING_RE: Regex = Regex::new(r"\A---[ \t]*(?:\r?\n|\z)").unwrap();
}

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter opened with `---` is never closed")]
    Unterminated,
    #[error("invalid YAML in front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,
    #[error("front matter field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

/// Hugo page metadata. Keys not listed here are kept in `extra` and written
/// back after the known ones.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub draft: bool,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    pub slug: String,
    pub extra: Mapping,
}

impl FrontMatter {
    pub fn from_yaml(raw: &str) -> Result<Self, FrontMatterError> {
        let mapping = match serde_yaml::from_str::<Value>(raw)? {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => return Err(FrontMatterError::NotAMapping),
        };

        let mut fm = Self::default();
        for (key, value) in mapping {
            match key.as_str() {
                Some("title") => fm.title = scalar_string("title", value)?,
                Some("date") => fm.date = scalar_string("date", value)?,
                Some("slug") => fm.slug = scalar_string("slug", value)?,
                Some("draft") => fm.draft = boolean("draft", value)?,
                Some("tags") => fm.tags = string_list("tags", value)?,
                Some("categories") => fm.categories = string_list("categories", value)?,
                _ => {
                    fm.extra.insert(key, value);
                }
            }
        }

        Ok(fm)
    }

    pub fn to_yaml(&self) -> Result<String, FrontMatterError> {
        let mut mapping = Mapping::new();
        mapping.insert("title".into(), self.title.as_str().into());
        mapping.insert("date".into(), self.date.as_str().into());
        mapping.insert("draft".into(), self.draft.into());
        mapping.insert("tags".into(), self.tags.clone().into());
        mapping.insert("categories".into(), self.categories.clone().into());
        mapping.insert("slug".into(), self.slug.as_str().into());
        for (key, value) in &self.extra {
            mapping.insert(key.clone(), value.clone());
        }

        Ok(serde_yaml::to_string(&mapping)?)
    }
}

fn scalar_string(field: &'static str, value: Value) -> Result<String, FrontMatterError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Tagged(tagged) => scalar_string(field, tagged.value),
        _ => Err(FrontMatterError::InvalidField {
            field,
            expected: "a string",
        }),
    }
}

fn boolean(field: &'static str, value: Value) -> Result<bool, FrontMatterError> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(FrontMatterError::InvalidField {
            field,
            expected: "a boolean",
        }),
    }
}

fn string_list(field: &'static str, value: Value) -> Result<Vec<String>, FrontMatterError> {
    match value {
        Value::Sequence(items) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                let s = scalar_string(field, item)?;
                if !s.is_empty() {
                    list.push(s);
                }
            }
            Ok(list)
        }
        scalar => {
            let s = scalar_string(field, scalar)?;
            Ok(if s.is_empty() { Vec::new() } else { vec![s] })
        }
    }
}

/// A Markdown file split into its metadata block and the text after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub front_matter: FrontMatter,
    pub body: String,
}

impl Document {
    /// Splits `content` at the leading `---` block. Content that does not
    /// open with `---` has default front matter and is all body.
    pub fn parse(content: &str) -> Result<Self, FrontMatterError> {
        if let Some(caps) = FRONTMATTER_RE.captures(content) {
            let raw = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            return Ok(Self {
                front_matter: FrontMatter::from_yaml(raw)?,
                body: content[end..].to_string(),
            });
        }

        if OPENING_RE.is_match(content) {
            return Err(FrontMatterError::Unterminated);
        }

        Ok(Self {
            front_matter: FrontMatter::default(),
            body: content.to_string(),
        })
    }

    /// Writes the front matter back as a `---` block followed by the body.
    pub fn render(&self) -> Result<String, FrontMatterError> {
        Ok(format!("---\n{}---\n{}", self.front_matter.to_yaml()?, self.body))
    }
}
