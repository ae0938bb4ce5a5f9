//! The input byte loop: C0 dispatch, printable runs, and character
//! addition with auto-wrap, insert mode, and line-drawing translation.

use crate::event::EventListener;
use crate::utf8;

use super::History;
use super::escape::Parsed;
use super::mode::TermMode;

impl<T: EventListener> History<T> {
    /// Feed child output into the terminal. Returns the number of bytes
    /// consumed.
    ///
    /// The loop is restartable: when the buffer ends inside a multi-byte
    /// escape sequence, nothing from that sequence has been applied and the
    /// return value is the offset of its ESC byte. The caller keeps the
    /// unconsumed tail and prepends it to the next read, the way the pty
    /// driver rebuffers short reads.
    pub fn add_input(&mut self, input: &[u8]) -> usize {
        let mut pos = 0;
        while pos < input.len() {
            let run_start = pos;
            let byte = input[pos];
            pos += 1;
            match byte {
                0x1B => match self.parse_escape(&input[pos..]) {
                    Parsed::Consumed(consumed) => pos += consumed,
                    Parsed::Incomplete => return run_start,
                },
                b'\r' => self.carriage_return(),
                b'\n' => self.next_line(),
                0x08 => {
                    if self.current_column > 0 {
                        self.current_column -= 1;
                    }
                    self.update_at_end_of_line();
                }
                b'\t' => self.add_tab(),
                // NUL, ENQ, BEL, DC1-DC4, DEL: ignored.
                0x00 | 0x05 | 0x07 | 0x11..=0x14 | 0x7F => {}
                byte if byte >= 0x20 => {
                    // Printable run: consume to the next control byte.
                    while pos < input.len() && input[pos] >= 0x20 && input[pos] != 0x7F {
                        pos += 1;
                    }
                    self.add_characters(&input[run_start..pos]);
                }
                // Remaining C0 bytes: ignored.
                _ => {}
            }
        }
        input.len()
    }

    /// Add printable characters at the cursor.
    ///
    /// Splits at `characters_per_line` under auto-wrap; honors insert mode;
    /// translates through the DEC line-drawing set when G0 is '0'.
    pub(crate) fn add_characters(&mut self, bytes: &[u8]) {
        let translated;
        let bytes = if self.g0_line_drawing {
            translated = translate_line_drawing(bytes);
            translated.as_slice()
        } else {
            bytes
        };

        self.ensure_current_line();
        self.ensure_current_column();

        let mut rest = bytes;
        loop {
            if rest.is_empty() {
                break;
            }
            let num_chars = utf8::num_characters(rest);
            if num_chars == 0 {
                // Pure continuation bytes: the rest of a character whose
                // lead byte arrived in the previous read.
                self.write_to_current_line(rest);
                break;
            }
            let cols = self.characters_per_line;
            let wrap =
                self.mode.contains(TermMode::AUTO_WRAP) && self.current_column + num_chars > cols;
            if !wrap {
                self.write_to_current_line(rest);
                break;
            }
            let space = cols.saturating_sub(self.current_column);
            if space > 0 {
                let split = utf8::bytes_for_n_characters(rest, space);
                self.write_to_current_line(&rest[..split]);
                rest = &rest[split..];
                if rest.is_empty() {
                    break;
                }
            }
            self.next_line();
            self.current_column = 0;
            self.ensure_current_line();
            self.ensure_current_column();
        }
    }

    /// Write one already-split chunk at the cursor.
    fn write_to_current_line(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let style = self.current_style;
        let num_chars = utf8::num_characters(bytes);
        let column = self.current_column;
        let index = self.line_index(self.current_line);
        let line = &mut self.lines[index];
        if num_chars == 0 {
            // Continuation bytes attach at the column boundary, completing
            // the character to the left.
            line.insert_characters(column, bytes, style);
        } else if self.at_end_of_line {
            line.append_characters(bytes, style);
        } else if self.mode.contains(TermMode::INSERT) {
            line.insert_characters(column, bytes, style);
        } else {
            line.replace_characters(column, bytes, style);
        }
        self.note_characters_added(self.current_line);
        self.current_column += num_chars;
        self.update_at_end_of_line();
    }

    /// HT: append a tab, or turn the character under the cursor into one.
    pub(crate) fn add_tab(&mut self) {
        self.ensure_current_line();
        self.ensure_current_column();
        let style = self.current_style;
        let column = self.current_column;
        let index = self.line_index(self.current_line);
        if self.at_end_of_line {
            self.lines[index].append_tab(style);
            self.note_characters_added(self.current_line);
        } else {
            self.lines[index].replace_character_with_tab(column, style);
            // A replaced character may have been a column's widest.
            self.note_characters_removed(self.current_line);
        }
        self.current_column += 1;
        self.update_at_end_of_line();
    }
}

/// Translate one byte through the DEC special graphics set.
///
/// Only the `j`–`x` box-drawing subset is mapped; everything else passes
/// through unchanged.
fn line_drawing_replacement(byte: u8) -> Option<&'static str> {
    Some(match byte {
        b'j' => "┘",
        b'k' => "┐",
        b'l' => "┌",
        b'm' => "└",
        b'n' => "┼",
        b'o' => "⎺",
        b'p' => "⎻",
        b'q' => "─",
        b'r' => "⎼",
        b's' => "⎽",
        b't' => "├",
        b'u' => "┤",
        b'v' => "┴",
        b'w' => "┬",
        b'x' => "│",
        _ => return None,
    })
}

fn translate_line_drawing(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        match line_drawing_replacement(byte) {
            Some(replacement) => out.extend_from_slice(replacement.as_bytes()),
            None => out.push(byte),
        }
    }
    out
}
