//! Include block detection.
//!
//! Finds the leading run of `#include` directives in a file. Blank lines may
//! appear between directives; the first other line after the run ends it.

use once_cell::sync::Lazy;
use regex::Regex;

static INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#include\s+(<[^>]+>|"[^"]+")"#).expect("valid regex"));

/// Leading include run of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeBlock {
    /// First line of the block (0-based, inclusive)
    pub start: usize,
    /// Last line of the block (0-based, inclusive), may be a trailing blank
    pub end: usize,
    /// Include lines in file order, blanks removed
    pub lines: Vec<String>,
}

impl IncludeBlock {
    /// Number of source lines covered by the block
    pub fn line_span(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Whether a line is an `#include <...>` or `#include "..."` directive
pub fn is_include_line(line: &str) -> bool {
    INCLUDE_RE.is_match(line)
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Locate the leading include block.
///
/// Lines before the first include are skipped. Returns `None` if no include
/// line exists.
pub fn locate_include_block<S: AsRef<str>>(lines: &[S]) -> Option<IncludeBlock> {
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut collected = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line: &str = line.as_ref();

        if is_include_line(line) {
            start.get_or_insert(index);
            end = index;
            collected.push(line.to_string());
        } else if start.is_some() && is_blank(line) {
            end = index;
        } else if start.is_some() {
            break;
        }
    }

    start.map(|start| IncludeBlock {
        start,
        end,
        lines: collected,
    })
}
