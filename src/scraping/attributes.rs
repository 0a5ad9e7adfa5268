use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

static ATTRIBUTE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn attribute_pattern() -> &'static Regex {
    ATTRIBUTE_PATTERN.get_or_init(|| {
        // name = "value" | name = 'value'; unquoted values are intentionally not captured.
        Regex::new(r#"([^\s"'<>/=]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("valid attribute pattern")
    })
}

/// Attributes of one opening tag. Names are lowercased, values trimmed, entities untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTag {
    attributes: HashMap<String, String>,
}

impl ParsedTag {
    /// Case-insensitive attribute lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Parse the quoted attributes of a raw tag such as `<a href="..." target='_blank'>`.
///
/// Malformed or unquoted attributes are skipped, never reported. When a name repeats,
/// the last occurrence wins.
pub fn parse_attributes(tag: &str) -> ParsedTag {
    let mut attributes = HashMap::new();
    for caps in attribute_pattern().captures_iter(tag) {
        let name = caps[1].to_ascii_lowercase();
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        attributes.insert(name, value);
    }
    ParsedTag { attributes }
}
