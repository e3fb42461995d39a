//! Line tokenizer shared by the inventory and status parsers.
//!
//! Splitting on whitespace destroys the one piece of structure the status
//! and iostat formats carry: indentation. A [`Row`] therefore keeps the raw
//! line plus its leading-whitespace width, and exposes both the tab-split
//! view (scripted `-H` output) and the whitespace-token view (status report
//! config lines).

/// One logical row of command output.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    raw: &'a str,
}

impl<'a> Row<'a> {
    /// Leading-whitespace width of the original line. Tabs count as one
    /// column each, matching how `zpool` indents nested devices.
    pub fn indent(&self) -> usize {
        self.raw.len() - self.raw.trim_start().len()
    }

    pub fn trimmed(&self) -> &'a str {
        self.raw.trim()
    }

    /// Tab-split fields, for `-H` scripted output.
    pub fn tab_fields(&self) -> Vec<&'a str> {
        self.raw.trim().split('\t').collect()
    }

    /// Whitespace-split tokens, for column-aligned status output.
    pub fn tokens(&self) -> Vec<&'a str> {
        self.raw.split_whitespace().collect()
    }
}

/// Lazily yields the non-blank rows of a raw text block. Empty input (the
/// command is missing or produced nothing) yields an empty iterator; absence
/// of data is not an error.
pub fn rows(text: &str) -> impl Iterator<Item = Row<'_>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|raw| Row { raw })
}

/// Like [`rows`] but keeps blank lines, for formats where they are
/// structurally meaningful section breaks.
pub fn rows_with_blanks(text: &str) -> impl Iterator<Item = Row<'_>> {
    text.lines().map(|raw| Row { raw })
}
