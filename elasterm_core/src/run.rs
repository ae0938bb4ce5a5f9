//! A run: contiguous bytes of a single style, or a tab marker.
//!
//! Runs own their bytes and cache the character count, so edits never
//! re-scan for length. All column-addressed edits land on UTF-8 character
//! boundaries. A tab run stores the single byte `\t`, counts as one
//! character, and is never edited or split — the owning `Line` routes
//! around it.

use std::borrow::Cow;

use crate::style::Style;
use crate::utf8;

/// A maximal single-style piece of a line, or one tab marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    style: Style,
    bytes: Vec<u8>,
    num_chars: usize,
    is_tab: bool,
}

impl Run {
    /// An empty styled run.
    pub fn new(style: Style) -> Self {
        Self {
            style,
            bytes: Vec::new(),
            num_chars: 0,
            is_tab: false,
        }
    }

    /// A styled run over owned bytes.
    pub fn from_bytes(bytes: Vec<u8>, style: Style) -> Self {
        let num_chars = utf8::num_characters(&bytes);
        Self {
            style,
            bytes,
            num_chars,
            is_tab: false,
        }
    }

    /// A tab marker. One character; pixel width decided at render time.
    pub fn tab(style: Style) -> Self {
        Self {
            style,
            bytes: vec![b'\t'],
            num_chars: 1,
            is_tab: true,
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn num_characters(&self) -> usize {
        self.num_chars
    }

    pub fn is_tab(&self) -> bool {
        self.is_tab
    }

    pub fn is_empty(&self) -> bool {
        self.num_chars == 0
    }

    /// The run's content as text (lossy on invalid UTF-8).
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Append raw bytes.
    pub fn append(&mut self, bytes: &[u8]) {
        debug_assert!(!self.is_tab, "tab runs are never edited");
        self.bytes.extend_from_slice(bytes);
        self.num_chars += utf8::num_characters(bytes);
    }

    /// Append `n` ASCII spaces.
    pub fn append_spaces(&mut self, n: usize) {
        debug_assert!(!self.is_tab, "tab runs are never edited");
        self.bytes.resize(self.bytes.len() + n, b' ');
        self.num_chars += n;
    }

    /// Insert bytes so their first character lands at `column`.
    pub fn insert(&mut self, column: usize, bytes: &[u8]) {
        debug_assert!(!self.is_tab, "tab runs are never edited");
        let at = utf8::bytes_for_n_characters(&self.bytes, column);
        self.bytes.splice(at..at, bytes.iter().copied());
        self.num_chars += utf8::num_characters(bytes);
    }

    /// Overwrite the characters at `[column, column + chars(bytes))`.
    ///
    /// The replaced region must lie within the run; the character counts of
    /// the old and new content may differ at the byte level but the caller
    /// keeps the column arithmetic consistent.
    pub fn replace(&mut self, column: usize, bytes: &[u8]) {
        debug_assert!(!self.is_tab, "tab runs are never edited");
        let incoming = utf8::num_characters(bytes);
        let start = utf8::bytes_for_n_characters(&self.bytes, column);
        let end = start + utf8::bytes_for_n_characters(&self.bytes[start..], incoming);
        self.bytes.splice(start..end, bytes.iter().copied());
        self.num_chars = utf8::num_characters(&self.bytes);
    }

    /// Remove `n` characters starting at `column`.
    pub fn delete(&mut self, column: usize, n: usize) {
        debug_assert!(!self.is_tab, "tab runs are never edited");
        let start = utf8::bytes_for_n_characters(&self.bytes, column);
        let end = start + utf8::bytes_for_n_characters(&self.bytes[start..], n);
        let removed = utf8::num_characters(&self.bytes[start..end]);
        self.bytes.drain(start..end);
        self.num_chars -= removed;
    }

    /// Truncate to the first `cols` characters.
    pub fn shorten_to(&mut self, cols: usize) {
        debug_assert!(!self.is_tab, "tab runs are never edited");
        if cols >= self.num_chars {
            return;
        }
        let at = utf8::bytes_for_n_characters(&self.bytes, cols);
        self.bytes.truncate(at);
        self.num_chars = cols;
    }

    /// Drop the first `n` characters.
    pub fn delete_first(&mut self, n: usize) {
        debug_assert!(!self.is_tab, "tab runs are never edited");
        if n >= self.num_chars {
            self.bytes.clear();
            self.num_chars = 0;
            return;
        }
        let at = utf8::bytes_for_n_characters(&self.bytes, n);
        self.bytes.drain(..at);
        self.num_chars -= n;
    }

    /// Split at `column`, keeping the head and returning the tail.
    pub fn split_off(&mut self, column: usize) -> Self {
        debug_assert!(!self.is_tab, "tab runs are never split");
        let at = utf8::bytes_for_n_characters(&self.bytes, column);
        let tail_bytes = self.bytes.split_off(at);
        let tail_chars = self.num_chars - column.min(self.num_chars);
        self.num_chars -= tail_chars;
        Self {
            style: self.style,
            bytes: tail_bytes,
            num_chars: tail_chars,
            is_tab: false,
        }
    }
}

#[cfg(test)]
mod tests;
