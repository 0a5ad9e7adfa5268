use super::attributes::{parse_attributes, ParsedTag};
use regex::Regex;
use std::sync::OnceLock;

/// The tag kinds the verifier cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Anchor,
    Image,
}

impl TagKind {
    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Anchor => "a",
            TagKind::Image => "img",
        }
    }
}

/// Finds opening tags of a single name, case-insensitively.
///
/// The tag text runs up to the first `>` that is not inside a quoted attribute value, so
/// `<a title="1 > 0" href="...">` is captured whole. A quoted value only opens right after
/// `=`; any other quote (`alt=Bob's`) is an ordinary character and cannot run past `>`.
pub struct TagScanner {
    pattern: Regex,
}

static ANCHOR_SCANNER: OnceLock<TagScanner> = OnceLock::new();
static IMAGE_SCANNER: OnceLock<TagScanner> = OnceLock::new();

impl TagScanner {
    pub fn new(tag_name: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r#"(?i)<{}(?:[\s/](?:[^>"'=]|=\s*"[^"]*"|=\s*'[^']*'|["'=])*)?>"#,
            regex::escape(tag_name)
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
        })
    }

    pub fn for_kind(kind: TagKind) -> &'static TagScanner {
        let cell = match kind {
            TagKind::Anchor => &ANCHOR_SCANNER,
            TagKind::Image => &IMAGE_SCANNER,
        };
        cell.get_or_init(|| TagScanner::new(kind.name()).expect("valid tag pattern"))
    }

    /// Lazily yields one `ParsedTag` per matching opening tag, in document order.
    pub fn scan<'a>(&'a self, html: &'a str) -> impl Iterator<Item = ParsedTag> + 'a {
        self.pattern
            .find_iter(html)
            .map(|m| parse_attributes(m.as_str()))
    }
}

pub fn scan_tags(html: &str, kind: TagKind) -> impl Iterator<Item = ParsedTag> + '_ {
    TagScanner::for_kind(kind).scan(html)
}
