//! Range-replace edits for a sorted include block.

use std::path::Path;

use crate::category::sort_include_lines;
use crate::locator::locate_include_block;

/// Replace lines `[start_line, end_line]` with `new_text`.
///
/// The replaced range runs from the start of `start_line` to the start of the
/// line after `end_line`, or to the end of the text if there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeEdit {
    pub start_line: usize,
    pub end_line: usize,
    pub new_text: String,
}

impl IncludeEdit {
    /// Apply the edit to `text` (lines split on `\n`)
    pub fn apply(&self, text: &str) -> String {
        let lines: Vec<&str> = text.split('\n').collect();
        let start = self.start_line.min(lines.len());
        let after = (self.end_line + 1).min(lines.len()).max(start);

        let mut out = String::with_capacity(text.len() + self.new_text.len());
        for line in &lines[..start] {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.new_text);
        out.push_str(&lines[after..].join("\n"));
        out
    }

    /// Whether applying the edit leaves `text` as it is
    pub fn is_noop(&self, text: &str) -> bool {
        self.apply(text) == text
    }
}

/// Compute the include-sorting edit for a document.
///
/// Returns `None` when the text has no include block.
pub fn compute_edit(text: &str, file_name: &Path) -> Option<IncludeEdit> {
    let lines: Vec<&str> = text.split('\n').collect();
    let block = locate_include_block(&lines)?;

    let sorted = sort_include_lines(&block.lines, file_name);
    if sorted.is_empty() {
        return None;
    }

    let mut new_text = sorted.join("\n");
    new_text.push('\n');

    Some(IncludeEdit {
        start_line: block.start,
        end_line: block.end,
        new_text,
    })
}

/// Return `text` with its include block sorted, or unchanged if there is none
pub fn sort_includes(text: &str, file_name: &Path) -> String {
    match compute_edit(text, file_name) {
        Some(edit) => edit.apply(text),
        None => text.to_string(),
    }
}
