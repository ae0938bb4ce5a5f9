//! CSI sequence parsing and dispatch: arguments, actions, SGR, modes,
//! margins, and status reports.

use crate::color::Color;
use crate::event::{Event, EventListener};
use crate::style::StyleFlags;

use super::History;
use super::escape::Parsed;
use super::mode::TermMode;

/// Maximum CSI parameters retained; extras parse but are dropped.
const MAX_ARGS: usize = 20;

impl<T: EventListener> History<T> {
    /// Parse a CSI sequence (the bytes after `ESC [`).
    ///
    /// Arguments are `;`-separated decimal integers defaulting to 0; a
    /// `?`, `<`, `=`, or `>` marks the sequence private; intermediate
    /// bytes are consumed and ignored; the final byte picks the action.
    /// Unknown final bytes make the whole sequence a no-op.
    pub(crate) fn parse_csi(&mut self, s: &[u8]) -> Parsed {
        let mut args = [0_u16; MAX_ARGS];
        let mut arg_index = 0_usize;
        let mut private = false;
        let mut i = 0;

        loop {
            let Some(&byte) = s.get(i) else {
                return Parsed::Incomplete;
            };
            match byte {
                b'0'..=b'9' => {
                    if arg_index < MAX_ARGS {
                        args[arg_index] = args[arg_index]
                            .saturating_mul(10)
                            .saturating_add(u16::from(byte - b'0'));
                    }
                }
                b';' => arg_index = (arg_index + 1).min(MAX_ARGS),
                0x3C..=0x3F => private = true,
                // ':' — valid parameter byte, ignored.
                0x3A => {}
                _ => break,
            }
            i += 1;
        }

        // Intermediate bytes: consumed, ignored.
        while s.get(i).is_some_and(|b| (0x20..=0x2F).contains(b)) {
            i += 1;
        }

        let Some(&final_byte) = s.get(i) else {
            return Parsed::Incomplete;
        };
        i += 1;

        let num_args = (arg_index + 1).min(MAX_ARGS);
        self.dispatch_csi(final_byte, &args[..num_args], private);
        Parsed::Consumed(i)
    }

    fn dispatch_csi(&mut self, final_byte: u8, args: &[u16], private: bool) {
        if private {
            match final_byte {
                b'h' => self.set_private_modes(args, true),
                b'l' => self.set_private_modes(args, false),
                other => log::debug!("ignoring private CSI {:?}", other as char),
            }
            return;
        }

        // Zero parameters default to 1 for count-valued actions.
        let n = |k: usize| -> usize {
            match args.get(k) {
                Some(&value) if value != 0 => value as usize,
                _ => 1,
            }
        };

        match final_byte {
            b'@' => self.insert_blank_characters(n(0)),
            b'A' => self.cursor_up(n(0)),
            b'B' | b'e' => self.cursor_down(n(0)),
            b'C' => self.cursor_forward(n(0)),
            b'D' => self.cursor_back(n(0)),
            b'E' => {
                self.cursor_down(n(0));
                self.carriage_return();
            }
            b'F' => {
                self.cursor_up(n(0));
                self.carriage_return();
            }
            b'G' => self.cursor_to_column(n(0) - 1),
            b'H' | b'f' => self.cursor_to(n(0) - 1, n(1) - 1),
            b'J' => self.erase_in_display(args.first().copied().unwrap_or(0)),
            b'K' => self.erase_in_line(args.first().copied().unwrap_or(0)),
            b'L' => self.insert_lines(n(0)),
            b'M' => self.delete_lines(n(0)),
            b'P' => self.delete_characters_at_cursor(n(0)),
            b'S' => self.scroll_region_up(n(0)),
            b'T' => self.scroll_region_down(n(0)),
            b'X' => self.erase_characters(n(0)),
            b'd' => self.cursor_to_line(n(0) - 1),
            b'h' => self.set_modes(args, true),
            b'l' => self.set_modes(args, false),
            b'm' => self.select_graphic_rendition(args),
            b'n' => self.device_status_report(args.first().copied().unwrap_or(0)),
            b'r' => self.set_margins(
                args.first().copied().unwrap_or(0),
                args.get(1).copied().unwrap_or(0),
            ),
            other => log::debug!("ignoring CSI final byte {:?}", other as char),
        }
    }

    /// SM/RM. Only insert mode (4) is implemented.
    fn set_modes(&mut self, args: &[u16], set: bool) {
        for &arg in args {
            match arg {
                4 => self.mode.set(TermMode::INSERT, set),
                0 => {}
                other => log::debug!("ignoring ANSI mode {other}"),
            }
        }
    }

    /// DECSET/DECRST.
    fn set_private_modes(&mut self, args: &[u16], set: bool) {
        let mut i = 0;
        while i < args.len() {
            match args[i] {
                1 => self.mode.set(TermMode::APP_CURSOR, set),
                7 => self.mode.set(TermMode::AUTO_WRAP, set),
                // Cursor blink: recognized, ignored.
                12 => {}
                25 => self.mode.set(TermMode::SHOW_CURSOR, set),
                1049 => {
                    if set {
                        self.enter_alternate_screen();
                    } else {
                        self.exit_alternate_screen();
                    }
                }
                2004 => self.mode.set(TermMode::BRACKETED_PASTE, set),
                5001 => {
                    if set {
                        self.start_elastic_tabs(0);
                    } else {
                        self.end_elastic_tabs(false);
                    }
                }
                5002 => {
                    if set {
                        // The next parameter carries the right-column count.
                        let right_columns = args.get(i + 1).copied().unwrap_or(0) as usize;
                        i += 1;
                        self.start_elastic_tabs(right_columns);
                    } else {
                        self.end_elastic_tabs(false);
                    }
                }
                0 => {}
                other => log::debug!("ignoring private mode {other}"),
            }
            i += 1;
        }
    }

    /// SGR: apply graphic rendition parameters left to right.
    fn select_graphic_rendition(&mut self, args: &[u16]) {
        let mut i = 0;
        while i < args.len() {
            match args[i] {
                0 => {
                    let defaults = self.default_style;
                    self.current_style.reset(&defaults);
                    if self.g0_line_drawing {
                        self.current_style.flags.insert(StyleFlags::LINE_DRAWING);
                    }
                }
                1 => self.current_style.flags.insert(StyleFlags::BOLD),
                3 => self.current_style.flags.insert(StyleFlags::ITALIC),
                4 => self.current_style.flags.insert(StyleFlags::UNDERLINED),
                7 => self.current_style.flags.insert(StyleFlags::INVERSE),
                8 => self.current_style.flags.insert(StyleFlags::INVISIBLE),
                9 => self.current_style.flags.insert(StyleFlags::CROSSED_OUT),
                21 => self
                    .current_style
                    .flags
                    .insert(StyleFlags::DOUBLY_UNDERLINED),
                22 => self.current_style.flags.remove(StyleFlags::BOLD),
                23 => self.current_style.flags.remove(StyleFlags::ITALIC),
                24 => self
                    .current_style
                    .flags
                    .remove(StyleFlags::UNDERLINED | StyleFlags::DOUBLY_UNDERLINED),
                27 => self.current_style.flags.remove(StyleFlags::INVERSE),
                28 => self.current_style.flags.remove(StyleFlags::INVISIBLE),
                29 => self.current_style.flags.remove(StyleFlags::CROSSED_OUT),
                30..=37 => self.current_style.foreground = Color::indexed((args[i] - 30) as u8),
                38 => match parse_extended_color(&args[i + 1..]) {
                    Some((color, used)) => {
                        self.current_style.foreground = color;
                        i += used;
                    }
                    None => break,
                },
                39 => self.current_style.foreground = self.default_style.foreground,
                40..=47 => self.current_style.background = Color::indexed((args[i] - 40) as u8),
                48 => match parse_extended_color(&args[i + 1..]) {
                    Some((color, used)) => {
                        self.current_style.background = color;
                        i += used;
                    }
                    None => break,
                },
                49 => self.current_style.background = self.default_style.background,
                90..=97 => self.current_style.foreground = Color::indexed((args[i] - 90 + 8) as u8),
                100..=107 => {
                    self.current_style.background = Color::indexed((args[i] - 100 + 8) as u8);
                }
                other => log::debug!("ignoring SGR {other}"),
            }
            i += 1;
        }
    }

    /// DSR. Code 6 reports the cursor position back to the child.
    fn device_status_report(&mut self, code: u16) {
        if code == 6 {
            let row = (self.current_line - self.screen_top_line()).max(0) + 1;
            let column = self.current_column + 1;
            self.listener
                .send_event(Event::PtyWrite(format!("\x1b[{row};{column}R").into_bytes()));
        }
    }

    /// DECSTBM: set the scroll margins (1-based, screen-relative).
    ///
    /// An invalid pair (`top >= bottom`) resets both margins; a bottom at
    /// the screen's last row is stored as "bottom of screen" so window
    /// resizes keep the region pinned to the bottom.
    fn set_margins(&mut self, top: u16, bottom: u16) {
        let rows = self.lines_on_screen;
        let top = if top == 0 { 1 } else { top as usize };
        let bottom = if bottom == 0 {
            rows
        } else {
            (bottom as usize).min(rows)
        };

        if top >= bottom {
            self.top_margin = 0;
            self.bottom_margin = None;
            return;
        }

        self.top_margin = top - 1;
        self.bottom_margin = if bottom >= rows { None } else { Some(bottom - 1) };
    }
}

/// SGR 38/48 extended color: `5;index` or `2;r;g;b`.
///
/// Returns the color and how many parameters were consumed.
fn parse_extended_color(args: &[u16]) -> Option<(Color, usize)> {
    match *args.first()? {
        5 => Some((Color::indexed(*args.get(1)? as u8), 2)),
        2 => Some((
            Color::rgb(
                *args.get(1)? as u8,
                *args.get(2)? as u8,
                *args.get(3)? as u8,
            ),
            4,
        )),
        _ => None,
    }
}
