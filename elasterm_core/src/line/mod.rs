//! A line: an ordered sequence of styled runs.
//!
//! All edits are column-addressed (columns count characters, not bytes).
//! Two invariants hold after every operation: adjacent non-tab runs never
//! share a style (they coalesce), and tab runs are never split or edited —
//! a tab is one character and edits route around it.
//!
//! A line may belong to at most one elastic tab group. The line only stores
//! the group id; the `History` owns the arena, so `fully_clear` hands the
//! id back to the caller for release instead of releasing here.

use std::borrow::Cow;

use crate::elastic::TabGroupId;
use crate::run::Run;
use crate::style::Style;
use crate::utf8;

/// One line of terminal output.
#[derive(Debug, Clone, Default)]
pub struct Line {
    runs: Vec<Run>,
    tab_group: Option<TabGroupId>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// The line's runs, left to right.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Total characters across all runs.
    pub fn num_characters(&self) -> usize {
        self.runs.iter().map(Run::num_characters).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Whether any run is a tab marker.
    pub fn has_tabs(&self) -> bool {
        self.runs.iter().any(Run::is_tab)
    }

    /// The elastic tab group this line belongs to, if any.
    pub fn tab_group(&self) -> Option<TabGroupId> {
        self.tab_group
    }

    /// Join a group, returning the previous membership for release.
    pub(crate) fn set_tab_group(&mut self, id: TabGroupId) -> Option<TabGroupId> {
        self.tab_group.replace(id)
    }

    /// Leave the current group, returning it for release.
    pub(crate) fn take_tab_group(&mut self) -> Option<TabGroupId> {
        self.tab_group.take()
    }

    /// Append characters, merging into the trailing run when styles match.
    pub fn append_characters(&mut self, bytes: &[u8], style: Style) {
        if bytes.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if !last.is_tab() && last.style() == style => last.append(bytes),
            _ => self.runs.push(Run::from_bytes(bytes.to_vec(), style)),
        }
    }

    /// Insert characters so the first lands at `column`, shifting the tail.
    pub fn insert_characters(&mut self, column: usize, bytes: &[u8], style: Style) {
        if bytes.is_empty() {
            return;
        }
        let Some((idx, offset)) = self.locate(column) else {
            return self.append_characters(bytes, style);
        };

        if offset == 0 {
            // Boundary between runs: prefer merging with a neighbor.
            if idx > 0 && !self.runs[idx - 1].is_tab() && self.runs[idx - 1].style() == style {
                self.runs[idx - 1].append(bytes);
            } else if !self.runs[idx].is_tab() && self.runs[idx].style() == style {
                self.runs[idx].insert(0, bytes);
            } else {
                self.runs.insert(idx, Run::from_bytes(bytes.to_vec(), style));
            }
            return;
        }

        // Interior of a run (never a tab: tabs are one character).
        if self.runs[idx].style() == style {
            self.runs[idx].insert(offset, bytes);
        } else {
            let tail = self.runs[idx].split_off(offset);
            self.runs
                .splice(idx + 1..idx + 1, [Run::from_bytes(bytes.to_vec(), style), tail]);
        }
    }

    /// Overwrite the region `[column, column + chars(bytes))`.
    ///
    /// A region reaching past the end of the line deletes what remains and
    /// appends the rest.
    pub fn replace_characters(&mut self, column: usize, bytes: &[u8], style: Style) {
        let incoming = utf8::num_characters(bytes);
        if incoming == 0 {
            return;
        }

        // Fast path: same-style overwrite inside a single run.
        if let Some((idx, offset)) = self.locate(column) {
            let run = &self.runs[idx];
            if !run.is_tab()
                && run.style() == style
                && offset + incoming <= run.num_characters()
            {
                self.runs[idx].replace(offset, bytes);
                return;
            }
        }

        self.delete_characters(column, incoming);
        self.insert_characters(column, bytes, style);
    }

    /// Append a tab marker.
    pub fn append_tab(&mut self, style: Style) {
        self.runs.push(Run::tab(style));
    }

    /// Replace the character at `column` with a tab marker.
    pub fn replace_character_with_tab(&mut self, column: usize, style: Style) {
        self.delete_characters(column, 1);
        let Some((idx, offset)) = self.locate(column) else {
            return self.append_tab(style);
        };
        if offset == 0 {
            self.runs.insert(idx, Run::tab(style));
        } else {
            let tail = self.runs[idx].split_off(offset);
            self.runs.splice(idx + 1..idx + 1, [Run::tab(style), tail]);
        }
    }

    /// Drop all runs. Group membership is kept.
    pub fn clear(&mut self) {
        self.runs.clear();
    }

    /// Drop all runs and leave the elastic group, returning the id so the
    /// arena owner can release the reference.
    pub fn fully_clear(&mut self) -> Option<TabGroupId> {
        self.runs.clear();
        self.tab_group.take()
    }

    /// Truncate at `column`.
    pub fn clear_to_end_from(&mut self, column: usize) {
        let Some((idx, offset)) = self.locate(column) else {
            return;
        };
        if offset == 0 {
            self.runs.truncate(idx);
        } else {
            self.runs[idx].shorten_to(offset);
            self.runs.truncate(idx + 1);
        }
    }

    /// Remove columns `[0, column)`.
    pub fn clear_from_beginning_to(&mut self, column: usize) {
        self.delete_characters(0, column);
    }

    /// Pad the front with spaces (merging with a matching first run).
    pub fn prepend_spaces(&mut self, num_spaces: usize, style: Style) {
        if num_spaces == 0 {
            return;
        }
        self.runs
            .insert(0, Run::from_bytes(vec![b' '; num_spaces], style));
        self.coalesce();
    }

    /// Pad the back with spaces (merging with a matching trailing run).
    pub fn append_spaces(&mut self, num_spaces: usize, style: Style) {
        if num_spaces == 0 {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if !last.is_tab() && last.style() == style => last.append_spaces(num_spaces),
            _ => self
                .runs
                .push(Run::from_bytes(vec![b' '; num_spaces], style)),
        }
    }

    /// Remove `num_chars` characters starting at `column`.
    pub fn delete_characters(&mut self, column: usize, num_chars: usize) {
        let mut remaining = num_chars;
        let mut col = column;
        let mut i = 0;
        while i < self.runs.len() && remaining > 0 {
            let run_chars = self.runs[i].num_characters();
            if col >= run_chars {
                col -= run_chars;
                i += 1;
                continue;
            }
            let take = remaining.min(run_chars - col);
            if col == 0 && take == run_chars {
                // The whole run goes (this is how tab runs die too).
                self.runs.remove(i);
            } else if col == 0 {
                self.runs[i].delete_first(take);
                i += 1;
            } else if col + take == run_chars {
                self.runs[i].shorten_to(col);
                i += 1;
            } else {
                self.runs[i].delete(col, take);
                i += 1;
            }
            remaining -= take;
            col = 0;
        }
        self.coalesce();
    }

    /// The UTF-8 bytes of the single character at `column`.
    pub fn character_at(&self, column: usize) -> Option<&[u8]> {
        let (idx, offset) = self.locate(column)?;
        let run = &self.runs[idx];
        let start = utf8::bytes_for_n_characters(run.bytes(), offset);
        let len = utf8::bytes_for_n_characters(&run.bytes()[start..], 1);
        Some(&run.bytes()[start..start + len])
    }

    /// The text of the half-open column range `[start, end)`.
    pub fn characters_from_to(&self, start: usize, end: usize) -> String {
        let mut result = String::new();
        let mut col = 0;
        for run in &self.runs {
            let run_chars = run.num_characters();
            let run_start = col;
            col += run_chars;
            if col <= start {
                continue;
            }
            if run_start >= end {
                break;
            }
            let from = start.saturating_sub(run_start);
            let to = (end - run_start).min(run_chars);
            let b0 = utf8::bytes_for_n_characters(run.bytes(), from);
            let b1 = b0 + utf8::bytes_for_n_characters(&run.bytes()[b0..], to - from);
            result.push_str(&String::from_utf8_lossy(&run.bytes()[b0..b1]));
        }
        result
    }

    /// The whole line as text.
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|run| run.text())
            .collect::<Vec<Cow<'_, str>>>()
            .concat()
    }

    /// Find the run containing `column` and the character offset within it.
    ///
    /// `None` when the column is at or past the end of the line.
    fn locate(&self, column: usize) -> Option<(usize, usize)> {
        let mut remaining = column;
        for (i, run) in self.runs.iter().enumerate() {
            let run_chars = run.num_characters();
            if remaining < run_chars {
                return Some((i, remaining));
            }
            remaining -= run_chars;
        }
        None
    }

    /// Merge adjacent same-style non-tab runs and drop empty ones.
    fn coalesce(&mut self) {
        self.runs.retain(|run| !run.is_empty());
        let mut i = 1;
        while i < self.runs.len() {
            if !self.runs[i].is_tab()
                && !self.runs[i - 1].is_tab()
                && self.runs[i].style() == self.runs[i - 1].style()
            {
                let run = self.runs.remove(i);
                self.runs[i - 1].append(run.bytes());
            } else {
                i += 1;
            }
        }
    }
}
