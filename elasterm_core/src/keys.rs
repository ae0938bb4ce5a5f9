//! Keyboard byte-sequence encoding.
//!
//! The host translates its windowing toolkit's key events into `Key` and
//! `Modifiers`, then asks this module for the bytes to write to the child.
//! Cursor keys honor DECCKM (application cursor keys); pasted text is
//! wrapped when bracketed paste is active.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT   = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT     = 1 << 2;
    }
}

/// A key press, toolkit-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Right,
    Left,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    /// Function key F1–F12.
    Function(u8),
    Enter,
    Tab,
    Backspace,
    Escape,
    /// A printable character.
    Char(char),
}

/// Bracketed paste framing.
pub const PASTE_START: &[u8] = b"\x1b[200~";
pub const PASTE_END: &[u8] = b"\x1b[201~";

/// Key with a letter terminator; SS3 (`ESC O`) under application cursor
/// keys, CSI otherwise.
struct LetterKey {
    term: u8,
}

/// Key encoded as `CSI {num} ~`.
struct TildeKey {
    num: u8,
}

fn letter_key(key: Key) -> Option<LetterKey> {
    Some(match key {
        Key::Up => LetterKey { term: b'A' },
        Key::Down => LetterKey { term: b'B' },
        Key::Right => LetterKey { term: b'C' },
        Key::Left => LetterKey { term: b'D' },
        _ => return None,
    })
}

fn tilde_key(key: Key) -> Option<TildeKey> {
    Some(match key {
        Key::Insert => TildeKey { num: 2 },
        Key::Delete => TildeKey { num: 3 },
        Key::PageUp => TildeKey { num: 5 },
        Key::PageDown => TildeKey { num: 6 },
        Key::Function(5) => TildeKey { num: 15 },
        Key::Function(6) => TildeKey { num: 17 },
        Key::Function(7) => TildeKey { num: 18 },
        Key::Function(8) => TildeKey { num: 19 },
        Key::Function(9) => TildeKey { num: 20 },
        Key::Function(10) => TildeKey { num: 21 },
        Key::Function(11) => TildeKey { num: 23 },
        Key::Function(12) => TildeKey { num: 24 },
        _ => return None,
    })
}

/// Encode a key press as child-bound bytes.
///
/// `application_cursor_keys` is the DECCKM mode bit read from the core.
/// Returns an empty vector for keys with no encoding.
pub fn encode_key(key: Key, mods: Modifiers, application_cursor_keys: bool) -> Vec<u8> {
    if let Some(lk) = letter_key(key) {
        return if application_cursor_keys {
            vec![0x1B, b'O', lk.term]
        } else {
            vec![0x1B, b'[', lk.term]
        };
    }

    if let Some(tk) = tilde_key(key) {
        return format!("\x1b[{}~", tk.num).into_bytes();
    }

    match key {
        Key::Home => b"\x1b[H".to_vec(),
        Key::End => b"\x1b[F".to_vec(),
        // F1-F4 are SS3-encoded regardless of cursor key mode.
        Key::Function(n @ 1..=4) => vec![0x1B, b'O', b'P' + (n - 1)],
        Key::Function(_) => Vec::new(),
        Key::Enter => vec![b'\r'],
        Key::Tab => {
            if mods.contains(Modifiers::SHIFT) {
                b"\x1b[Z".to_vec()
            } else {
                vec![b'\t']
            }
        }
        Key::Backspace => vec![0x7F],
        Key::Escape => vec![0x1B],
        Key::Char(c) => {
            let mut bytes = Vec::new();
            if mods.contains(Modifiers::ALT) {
                bytes.push(0x1B);
            }
            if mods.contains(Modifiers::CONTROL) {
                if let Some(c0) = control_byte(c) {
                    bytes.push(c0);
                    return bytes;
                }
            }
            let mut buf = [0_u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            bytes
        }
        // Arrows and tilde-encoded keys returned above.
        _ => Vec::new(),
    }
}

/// Wrap pasted text per the bracketed paste protocol when enabled.
pub fn encode_paste(text: &str, bracketed: bool) -> Vec<u8> {
    if bracketed {
        let mut bytes = Vec::with_capacity(text.len() + PASTE_START.len() + PASTE_END.len());
        bytes.extend_from_slice(PASTE_START);
        bytes.extend_from_slice(text.as_bytes());
        bytes.extend_from_slice(PASTE_END);
        bytes
    } else {
        text.as_bytes().to_vec()
    }
}

/// Ctrl+letter and friends map onto C0 control codes.
fn control_byte(c: char) -> Option<u8> {
    match c {
        'a'..='z' => Some(c as u8 - b'a' + 1),
        'A'..='Z' => Some(c as u8 - b'A' + 1),
        '[' => Some(0x1B),
        '\\' => Some(0x1C),
        ']' => Some(0x1D),
        '^' => Some(0x1E),
        '_' => Some(0x1F),
        '?' => Some(0x7F),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, Modifiers, encode_key, encode_paste};

    fn plain(key: Key) -> Vec<u8> {
        encode_key(key, Modifiers::empty(), false)
    }

    #[test]
    fn cursor_keys_normal_mode() {
        assert_eq!(plain(Key::Up), b"\x1b[A");
        assert_eq!(plain(Key::Down), b"\x1b[B");
        assert_eq!(plain(Key::Right), b"\x1b[C");
        assert_eq!(plain(Key::Left), b"\x1b[D");
    }

    #[test]
    fn cursor_keys_application_mode() {
        assert_eq!(encode_key(Key::Up, Modifiers::empty(), true), b"\x1bOA");
        assert_eq!(encode_key(Key::Left, Modifiers::empty(), true), b"\x1bOD");
    }

    #[test]
    fn home_and_end() {
        assert_eq!(plain(Key::Home), b"\x1b[H");
        assert_eq!(plain(Key::End), b"\x1b[F");
    }

    #[test]
    fn paging_and_editing_keys() {
        assert_eq!(plain(Key::PageUp), b"\x1b[5~");
        assert_eq!(plain(Key::PageDown), b"\x1b[6~");
        assert_eq!(plain(Key::Insert), b"\x1b[2~");
        assert_eq!(plain(Key::Delete), b"\x1b[3~");
    }

    #[test]
    fn function_keys() {
        assert_eq!(plain(Key::Function(1)), b"\x1bOP");
        assert_eq!(plain(Key::Function(4)), b"\x1bOS");
        assert_eq!(plain(Key::Function(5)), b"\x1b[15~");
        assert_eq!(plain(Key::Function(6)), b"\x1b[17~");
        assert_eq!(plain(Key::Function(12)), b"\x1b[24~");
        // Out of range: nothing.
        assert_eq!(plain(Key::Function(13)), b"");
    }

    #[test]
    fn backspace_is_del() {
        assert_eq!(plain(Key::Backspace), [0x7F]);
    }

    #[test]
    fn shift_tab_is_backtab() {
        assert_eq!(plain(Key::Tab), b"\t");
        assert_eq!(encode_key(Key::Tab, Modifiers::SHIFT, false), b"\x1b[Z");
    }

    #[test]
    fn alt_prefixes_printables() {
        assert_eq!(encode_key(Key::Char('x'), Modifiers::ALT, false), b"\x1bx");
        assert_eq!(plain(Key::Char('x')), b"x");
    }

    #[test]
    fn ctrl_letters_are_control_codes() {
        assert_eq!(encode_key(Key::Char('c'), Modifiers::CONTROL, false), [0x03]);
        assert_eq!(encode_key(Key::Char('Z'), Modifiers::CONTROL, false), [0x1A]);
    }

    #[test]
    fn multibyte_characters_encode_as_utf8() {
        assert_eq!(plain(Key::Char('é')), "é".as_bytes());
    }

    #[test]
    fn bracketed_paste_wraps() {
        assert_eq!(encode_paste("hi", false), b"hi");
        assert_eq!(encode_paste("hi", true), b"\x1b[200~hi\x1b[201~");
    }
}
