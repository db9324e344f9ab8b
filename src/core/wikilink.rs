use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // [[target]] or [[target#heading]], never spanning a line
    static ref WIKILINK_RE: Regex = Regex::new(r"\[\[(.*?)\]\]").unwrap();
}

/// A wiki-link target split at its first `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink<'a> {
    pub page: &'a str,
    pub heading: Option<&'a str>,
}

impl<'a> WikiLink<'a> {
    pub fn parse(target: &'a str) -> Self {
        match target.split_once('#') {
            Some((page, heading)) => Self {
                page,
                heading: Some(heading),
            },
            None => Self {
                page: target,
                heading: None,
            },
        }
    }

    /// Renders the link as a Hugo `ref` shortcode cross-reference.
    pub fn to_hugo_ref(&self) -> String {
        match self.heading {
            Some(heading) => format!(
                "[{}]({{{{< ref \"{}#{}\" >}}}})",
                self.page,
                self.page,
                heading_anchor(heading)
            ),
            None => format!("[{}]({{{{< ref \"{}\" >}}}})", self.page, self.page),
        }
    }
}

/// Anchor id for a heading: spaces become hyphens, then lowercase.
pub fn heading_anchor(heading: &str) -> String {
    heading.replace(' ', "-").to_lowercase()
}

/// Raw targets of every `[[...]]` in `content`, in order.
pub fn extract_wikilinks(content: &str) -> Vec<String> {
    WIKILINK_RE
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect()
}

/// Replaces every `[[...]]` in `content` with a Hugo cross-reference.
pub fn rewrite_wikilinks(content: &str) -> String {
    WIKILINK_RE
        .replace_all(content, |caps: &Captures| WikiLink::parse(&caps[1]).to_hugo_ref())
        .into_owned()
}
