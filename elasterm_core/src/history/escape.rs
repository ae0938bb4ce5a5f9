//! Escape sequence classification and the string-typed sequences
//! (OSC, DCS, SOS/PM/APC), plus the parser completion contract.

use crate::event::{Event, EventListener};
use crate::style::StyleFlags;

use super::History;

/// Result of a parse attempt.
///
/// `Consumed` carries the bytes used relative to the parser's start.
/// `Incomplete` means the buffer ended mid-sequence; the caller must not
/// have mutated any state and reports the sequence start to its own caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parsed {
    Consumed(usize),
    Incomplete,
}

/// Shift a sub-parser's consumed count by the introducer length.
fn offset_by(parsed: Parsed, introducer: usize) -> Parsed {
    match parsed {
        Parsed::Consumed(consumed) => Parsed::Consumed(consumed + introducer),
        Parsed::Incomplete => Parsed::Incomplete,
    }
}

impl<T: EventListener> History<T> {
    /// Parse the bytes following an ESC. Returns the count consumed after
    /// the ESC itself.
    pub(crate) fn parse_escape(&mut self, rest: &[u8]) -> Parsed {
        let Some(&selector) = rest.first() else {
            return Parsed::Incomplete;
        };
        let after = &rest[1..];
        match selector {
            // "Fe" escape sequences.
            b'[' => offset_by(self.parse_csi(after), 1),
            b']' => offset_by(self.parse_osc(after), 1),
            // DCS and SOS/PM/APC: skipped so their payloads never reach
            // the printable path.
            b'P' | b'X' | b'^' | b'_' => offset_by(skip_st_string(after, false), 1),
            b'M' => {
                self.reverse_index();
                Parsed::Consumed(1)
            }
            0x40..=0x5F => Parsed::Consumed(1),
            // "Fp" escape sequences.
            b'7' => {
                self.save_cursor();
                Parsed::Consumed(1)
            }
            b'8' => {
                self.restore_cursor();
                Parsed::Consumed(1)
            }
            0x30..=0x3F => Parsed::Consumed(1),
            // "nF" escape sequences: multi-byte, `selector` is the first
            // intermediate.
            0x20..=0x2F => self.parse_nf(rest),
            // "Fs" and anything else: single byte, ignored.
            _ => Parsed::Consumed(1),
        }
    }

    /// Parse an "nF" sequence. `rest[0]` is the first intermediate byte.
    ///
    /// `ESC ( 0` designates DEC line drawing as G0; `ESC ( B` restores
    /// ASCII. Other sequences are consumed and ignored.
    fn parse_nf(&mut self, rest: &[u8]) -> Parsed {
        let mut i = 1;
        loop {
            let Some(&byte) = rest.get(i) else {
                return Parsed::Incomplete;
            };
            i += 1;
            if (0x30..=0x7E).contains(&byte) {
                if rest[0] == b'(' {
                    self.designate_g0(byte);
                }
                return Parsed::Consumed(i);
            }
            if !(0x20..=0x2F).contains(&byte) {
                // Not a valid intermediate; terminate the sequence here.
                return Parsed::Consumed(i);
            }
        }
    }

    fn designate_g0(&mut self, designator: u8) {
        match designator {
            b'0' => {
                self.g0_line_drawing = true;
                self.current_style.flags.insert(StyleFlags::LINE_DRAWING);
            }
            b'B' => {
                self.g0_line_drawing = false;
                self.current_style.flags.remove(StyleFlags::LINE_DRAWING);
            }
            other => log::debug!("ignoring charset designator {:?}", other as char),
        }
    }

    /// Parse an OSC string: optional number, `;`, payload, terminated by
    /// ST or BEL. Commands 0 and 2 set the window title.
    fn parse_osc(&mut self, s: &[u8]) -> Parsed {
        let Some((content_len, consumed)) = find_string_end(s, true) else {
            return Parsed::Incomplete;
        };
        let content = &s[..content_len];

        let mut i = 0;
        let mut command: u32 = 0;
        let mut has_digits = false;
        while i < content.len() && content[i].is_ascii_digit() {
            command = command
                .saturating_mul(10)
                .saturating_add(u32::from(content[i] - b'0'));
            has_digits = true;
            i += 1;
        }

        if has_digits && content.get(i) == Some(&b';') {
            let payload = &content[i + 1..];
            match command {
                0 | 2 => {
                    let title = String::from_utf8_lossy(payload).into_owned();
                    self.listener.send_event(Event::Title(title));
                }
                other => log::debug!("ignoring OSC {other}"),
            }
        } else {
            log::debug!("ignoring malformed OSC string");
        }

        Parsed::Consumed(consumed)
    }
}

/// Skip a string terminated by ST (and optionally BEL), discarding it.
fn skip_st_string(s: &[u8], can_end_with_bel: bool) -> Parsed {
    match find_string_end(s, can_end_with_bel) {
        Some((_, consumed)) => Parsed::Consumed(consumed),
        None => Parsed::Incomplete,
    }
}

/// Find the end of an ST-terminated string.
///
/// Returns `(content_length, bytes_consumed)` including the terminator, or
/// `None` when the buffer ends first. An ESC not followed by `\` is
/// swallowed into the string body.
fn find_string_end(s: &[u8], can_end_with_bel: bool) -> Option<(usize, usize)> {
    let mut i = 0;
    while i < s.len() {
        let byte = s[i];
        i += 1;
        if byte == 0x1B {
            if i >= s.len() {
                return None;
            }
            let next = s[i];
            i += 1;
            if next == b'\\' {
                return Some((i - 2, i));
            }
        } else if byte == 0x07 && can_end_with_bel {
            return Some((i - 1, i));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::find_string_end;

    #[test]
    fn finds_st_terminator() {
        assert_eq!(find_string_end(b"abc\x1b\\rest", false), Some((3, 5)));
    }

    #[test]
    fn finds_bel_terminator_when_allowed() {
        assert_eq!(find_string_end(b"abc\x07rest", true), Some((3, 4)));
        assert_eq!(find_string_end(b"abc\x07rest", false), None);
    }

    #[test]
    fn lone_esc_is_swallowed() {
        assert_eq!(find_string_end(b"a\x1bb\x1b\\", false), Some((3, 5)));
    }

    #[test]
    fn incomplete_string_is_none() {
        assert_eq!(find_string_end(b"abc", true), None);
        assert_eq!(find_string_end(b"abc\x1b", true), None);
    }
}
