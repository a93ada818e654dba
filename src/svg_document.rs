use std::fmt;
use std::ops::RangeInclusive;

// @module: Line-oriented SVG document buffer

/// An SVG file held as an ordered, mutable sequence of lines.
///
/// Every line keeps its `\n` terminator; only the last line may lack one.
/// Joining the lines back together reproduces the text exactly, so edits
/// that don't touch a line leave its bytes alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgDocument {
    // @field: Lines including their terminators
    lines: Vec<String>,
}

impl SvgDocument {
    // @creates: Document from raw text, normalizing line endings to LF
    pub fn parse(text: &str) -> Self {
        let normalized = normalize_newlines(text);
        let lines = normalized
            .split_inclusive('\n')
            .map(str::to_string)
            .collect();

        Self { lines }
    }

    /// Number of lines in the document
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`, terminator included
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    // @returns: Index of the first line at or after `start` matching the predicate
    pub fn find_from<F>(&self, start: usize, predicate: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        self.lines
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, line)| predicate(line.as_str()))
            .map(|(index, _)| index)
    }

    // @returns: Index of the first line within `range` matching the predicate
    pub fn find_within<F>(&self, range: RangeInclusive<usize>, predicate: F) -> Option<usize>
    where
        F: Fn(&str) -> bool,
    {
        let (start, end) = range.into_inner();
        self.lines
            .iter()
            .enumerate()
            .take(end.saturating_add(1))
            .skip(start)
            .find(|(_, line)| predicate(line.as_str()))
            .map(|(index, _)| index)
    }

    /// Replace the line at `index`; out-of-range indices are ignored
    pub fn replace_line(&mut self, index: usize, line: String) {
        if let Some(slot) = self.lines.get_mut(index) {
            *slot = line;
        }
    }

    /// Insert `text` before the line at `index`, splitting it on newlines.
    ///
    /// Returns the number of lines inserted.
    pub fn insert_text(&mut self, index: usize, text: &str) -> usize {
        let index = index.min(self.lines.len());
        let new_lines: Vec<String> = normalize_newlines(text)
            .split_inclusive('\n')
            .map(str::to_string)
            .collect();
        let count = new_lines.len();

        self.lines.splice(index..index, new_lines);
        count
    }

    /// Remove and return the line at `index`
    pub fn remove_line(&mut self, index: usize) -> Option<String> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    /// Join the lines back into a single string
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Convert CRLF and lone CR line endings to LF
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
