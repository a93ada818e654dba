/*!
 * Inline script embedding for modular SVG artworks.
 *
 * A modular artwork references its scripts with self-closed tags such as
 *
 * ```text
 *   <script
 *      xlink:href="engine_script.js"
 *      id="script1" />
 * ```
 *
 * The embedder turns each of them into an open tag holding the file content
 * in a CDATA section, records the filename in `id` and drops `xlink:href`.
 * Matching is line based: the document is never parsed as XML.
 */

use log::{debug, info, warn};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::attributes::Attribute;
use crate::errors::EmbedError;
use crate::svg_document::{SvgDocument, normalize_newlines};

/// Marker opening a script tag
pub const SCRIPT_OPEN_MARKER: &str = "<script";

/// Marker of an explicit closing tag, only present once content is embedded
pub const SCRIPT_CLOSE_MARKER: &str = "</script>";

/// Marker of a self-closed tag
pub const SELF_CLOSE_MARKER: &str = "/>";

/// Start of the embedded block
pub const CDATA_OPEN: &str = "<![CDATA[\n";

/// End of the embedded block, including the closing script tag
pub const CDATA_CLOSE: &str = "]]>\n  </script>\n";

/// Why a scan over a document stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// The document holds no script tag at all
    NoScriptTag,
    /// Every script tag after the last processed one has been handled
    NoMoreScripts,
    /// A script tag is never closed
    UnterminatedTag,
    /// A `</script>` closing tag was found where a self-closed tag was expected
    AlreadyWritten,
}

/// Outcome of a single `embed_next` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedStep {
    /// A script was inlined; scanning resumes at `next`
    Embedded { script: String, next: usize },
    /// The tag lacked an attribute and got an empty CDATA block instead
    Stubbed { missing: Attribute, next: usize },
    /// Nothing left to do in this document
    Finished(ScanEnd),
}

impl EmbedStep {
    /// Index to resume scanning from; finished scans point at the end
    pub fn next_index(&self, document_len: usize) -> usize {
        match self {
            Self::Embedded { next, .. } | Self::Stubbed { next, .. } => *next,
            Self::Finished(_) => document_len,
        }
    }
}

/// Summary of every tag processed in one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    /// Filenames of the embedded scripts, in document order
    pub embedded: Vec<String>,
    /// Number of tags that received an empty placeholder
    pub stubbed: usize,
    /// How the scan ended
    pub end: ScanEnd,
}

/// Wrap script text in a CDATA section and close the script tag.
///
/// The `]]>` marker always starts on its own line.
pub fn wrap_script(content: &str) -> String {
    let mut wrapped = String::with_capacity(CDATA_OPEN.len() + content.len() + CDATA_CLOSE.len() + 1);
    wrapped.push_str(CDATA_OPEN);
    wrapped.push_str(content);
    if !wrapped.ends_with('\n') {
        wrapped.push('\n');
    }
    wrapped.push_str(CDATA_CLOSE);
    wrapped
}

/// Placeholder inserted for script tags that can't be embedded
pub fn empty_script_block() -> String {
    wrap_script("")
}

/// Turn a self-closed tag terminator into a plain one: `" />"` becomes `">"`
fn open_self_closed_tag(line: &str) -> String {
    line.replace(SELF_CLOSE_MARKER, ">").replace(" >", ">")
}

// @struct: Embeds the external scripts of one SVG document
#[derive(Debug, Clone)]
pub struct ScriptEmbedder {
    // @field: Directory the `xlink:href` filenames are relative to
    source_dir: PathBuf,

    // @field: File name written into `sodipodi:docname`
    output_name: String,
}

impl ScriptEmbedder {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(source_dir: P, output_name: S) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_name: output_name.into(),
        }
    }

    /// Embed the first script tag found at or after `start`.
    ///
    /// Only an unreadable or absolute script reference is an error. Malformed tags
    /// are reported through the log and the returned step.
    pub fn embed_next(&self, document: &mut SvgDocument, start: usize) -> Result<EmbedStep, EmbedError> {
        let open_tag = match document.find_from(start, |line| line.contains(SCRIPT_OPEN_MARKER)) {
            Some(index) => index,
            None if start == 0 => {
                info!("The input SVG has no script tag.");
                return Ok(EmbedStep::Finished(ScanEnd::NoScriptTag));
            }
            None => return Ok(EmbedStep::Finished(ScanEnd::NoMoreScripts)),
        };

        let close_tag = match document.find_from(open_tag, |line| {
            line.contains(SELF_CLOSE_MARKER) || line.contains(SCRIPT_CLOSE_MARKER)
        }) {
            Some(index) => index,
            None => {
                warn!("The input SVG is not well-formed (invalid XML): script tag at line {} is never closed.", open_tag + 1);
                return Ok(EmbedStep::Finished(ScanEnd::UnterminatedTag));
            }
        };

        if document.line(close_tag).is_some_and(|line| line.contains(SCRIPT_CLOSE_MARKER)) {
            warn!("Script tag already written.");
            return Ok(EmbedStep::Finished(ScanEnd::AlreadyWritten));
        }

        if let Some(line) = document.line(close_tag) {
            let opened = open_self_closed_tag(line);
            document.replace_line(close_tag, opened);
        }

        let after_tag = close_tag + 1;
        let span = open_tag..=close_tag;

        let Some(href_line) = document.find_within(span.clone(), |line| Attribute::Href.is_on(line)) else {
            return Ok(self.stub(document, after_tag, Attribute::Href));
        };
        let script_name = document
            .line(href_line)
            .and_then(|line| Attribute::Href.value(line))
            .unwrap_or_default()
            .to_string();

        let content = wrap_script(&self.load_script(&script_name)?);

        let Some(id_line) = document.find_within(span, |line| Attribute::Id.is_on(line)) else {
            return Ok(self.stub(document, after_tag, Attribute::Id));
        };
        if let Some(rewritten) = document
            .line(id_line)
            .and_then(|line| Attribute::Id.replace_value(line, &script_name))
        {
            document.replace_line(id_line, rewritten);
        }

        let inserted = document.insert_text(after_tag, &content);
        let mut next = after_tag + inserted;

        // The href line precedes the insertion point, so its index still holds
        if let Some(stripped) = document.line(href_line).and_then(|line| Attribute::Href.remove(line)) {
            if stripped.trim().is_empty() {
                document.remove_line(href_line);
                next -= 1;
            } else {
                document.replace_line(href_line, stripped);
            }
        }

        self.rename_document(document);

        info!("{} script added.", script_name);
        Ok(EmbedStep::Embedded { script: script_name, next })
    }

    /// Embed every script tag of the document, from the top.
    pub fn embed_all(&self, document: &mut SvgDocument) -> Result<EmbedReport, EmbedError> {
        let mut embedded = Vec::new();
        let mut stubbed = 0;
        let mut index = 0;

        let end = loop {
            let step = self.embed_next(document, index)?;
            index = step.next_index(document.len());

            match step {
                EmbedStep::Embedded { script, .. } => embedded.push(script),
                EmbedStep::Stubbed { .. } => stubbed += 1,
                EmbedStep::Finished(end) => break end,
            }

            if index >= document.len() {
                break ScanEnd::NoMoreScripts;
            }
        };

        Ok(EmbedReport { embedded, stubbed, end })
    }

    // @inserts: Empty CDATA block after the tag so the scan moves past it
    fn stub(&self, document: &mut SvgDocument, after_tag: usize, missing: Attribute) -> EmbedStep {
        warn!(
            "The input SVG is not well-formed (invalid XML): script tag without a quoted {} attribute.",
            missing.name()
        );
        let inserted = document.insert_text(after_tag, &empty_script_block());
        EmbedStep::Stubbed { missing, next: after_tag + inserted }
    }

    // @rewrites: First `sodipodi:docname` of the whole document
    fn rename_document(&self, document: &mut SvgDocument) {
        let Some(index) = document.find_from(0, |line| Attribute::DocName.is_on(line)) else {
            return;
        };
        if let Some(rewritten) = document
            .line(index)
            .and_then(|line| Attribute::DocName.replace_value(line, &self.output_name))
        {
            debug!("Document name set to {} at line {}", self.output_name, index + 1);
            document.replace_line(index, rewritten);
        }
    }

    // @reads: Script next to the artwork; rooted names would escape `source_dir`
    fn load_script(&self, script_name: &str) -> Result<String, EmbedError> {
        let name = Path::new(script_name);
        if name.has_root() || name.components().any(|part| matches!(part, Component::Prefix(_) | Component::RootDir)) {
            return Err(EmbedError::ScriptOutsideSource { name: script_name.to_string() });
        }

        let path = self.source_dir.join(name);
        let content = fs::read_to_string(&path).map_err(|source| EmbedError::ScriptRead { path, source })?;
        Ok(normalize_newlines(&content))
    }
}
