//! Text styling: colors plus SGR attribute flags.
//!
//! A `Style` is a small value attached to every run. Equality is bit-exact
//! so runs only merge when they would render identically.

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// SGR attribute flags (plus the active-charset marker).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StyleFlags: u8 {
        const BOLD              = 1 << 0;
        const ITALIC            = 1 << 1;
        const INVERSE           = 1 << 2;
        const INVISIBLE         = 1 << 3;
        const UNDERLINED        = 1 << 4;
        const DOUBLY_UNDERLINED = 1 << 5;
        const CROSSED_OUT       = 1 << 6;
        /// Run was written while the DEC line-drawing charset was active.
        const LINE_DRAWING      = 1 << 7;
    }
}

impl Default for StyleFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// The style of a run of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub foreground: Color,
    pub background: Color,
    pub flags: StyleFlags,
}

impl Style {
    /// A plain style with the given default colors.
    pub fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
            flags: StyleFlags::empty(),
        }
    }

    /// SGR 0: back to the default colors, all attributes cleared.
    ///
    /// The caller re-applies `LINE_DRAWING` afterwards if G0 is still the
    /// DEC special graphics set.
    pub fn reset(&mut self, defaults: &Self) {
        self.foreground = defaults.foreground;
        self.background = defaults.background;
        self.flags = StyleFlags::empty();
    }
}
