use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// @module: Double-quoted XML attribute access on a single line

// @const: `xlink:href="..."` with any whitespace run before it
static HREF_REGEX: Lazy<Regex> = Lazy::new(|| attribute_regex("xlink:href"));

// @const: `id="..."`; a leading boundary keeps `grid="..."` from matching
static ID_REGEX: Lazy<Regex> = Lazy::new(|| attribute_regex("id"));

// @const: `sodipodi:docname="..."`
static DOCNAME_REGEX: Lazy<Regex> = Lazy::new(|| attribute_regex("sodipodi:docname"));

fn attribute_regex(name: &str) -> Regex {
    let pattern = format!(
        r#"(?:^|\s+){}\s*=\s*"(?P<value>[^"]*)""#,
        regex::escape(name)
    );
    Regex::new(&pattern).expect("attribute pattern is valid")
}

/// Attributes the embedder reads or rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// External script reference
    Href,
    /// Script tag identifier
    Id,
    /// Inkscape document name
    DocName,
}

impl Attribute {
    // @returns: Attribute name as written in the SVG
    pub fn name(&self) -> &'static str {
        match self {
            Self::Href => "xlink:href",
            Self::Id => "id",
            Self::DocName => "sodipodi:docname",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Self::Href => &*HREF_REGEX,
            Self::Id => &*ID_REGEX,
            Self::DocName => &*DOCNAME_REGEX,
        }
    }

    fn captures<'a>(&self, line: &'a str) -> Option<Captures<'a>> {
        self.regex().captures(line)
    }

    /// Whether the line carries this attribute with a quoted value
    pub fn is_on(&self, line: &str) -> bool {
        self.regex().is_match(line)
    }

    /// Quoted value of the attribute, without the quotes
    pub fn value<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.captures(line)
            .and_then(|caps| caps.name("value"))
            .map(|value| value.as_str())
    }

    /// Line with the attribute's value replaced, or `None` when absent
    pub fn replace_value(&self, line: &str, new_value: &str) -> Option<String> {
        let caps = self.captures(line)?;
        let value = caps.name("value")?;

        let mut rewritten = String::with_capacity(line.len() + new_value.len());
        rewritten.push_str(&line[..value.start()]);
        rewritten.push_str(new_value);
        rewritten.push_str(&line[value.end()..]);
        Some(rewritten)
    }

    /// Line with the attribute and its leading whitespace removed
    pub fn remove(&self, line: &str) -> Option<String> {
        let caps = self.captures(line)?;
        let whole = caps.get(0)?;

        let mut rewritten = String::with_capacity(line.len());
        rewritten.push_str(&line[..whole.start()]);
        rewritten.push_str(&line[whole.end()..]);
        Some(rewritten)
    }
}
