//! Terminal mode flags (SM/RM, DECSET/DECRST).

use bitflags::bitflags;

bitflags! {
    /// Bitflags for terminal mode state.
    ///
    /// Toggled by SM (`CSI n h`), RM (`CSI n l`), and their DEC private
    /// variants (`CSI ? n h` / `CSI ? n l`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TermMode: u8 {
        /// DECTCEM — cursor visible.
        const SHOW_CURSOR     = 1;
        /// DECCKM — application cursor keys.
        const APP_CURSOR      = 1 << 1;
        /// DECAWM — auto-wrap at end of line.
        const AUTO_WRAP       = 1 << 2;
        /// IRM — insert mode.
        const INSERT          = 1 << 3;
        /// Mode 2004 — bracketed paste.
        const BRACKETED_PASTE = 1 << 4;
    }
}

impl Default for TermMode {
    fn default() -> Self {
        Self::SHOW_CURSOR | Self::AUTO_WRAP
    }
}

#[cfg(test)]
mod tests {
    use super::TermMode;

    #[test]
    fn default_shows_cursor_and_wraps() {
        let mode = TermMode::default();
        assert!(mode.contains(TermMode::SHOW_CURSOR));
        assert!(mode.contains(TermMode::AUTO_WRAP));
        assert!(!mode.contains(TermMode::INSERT));
    }

    #[test]
    fn set_and_clear() {
        let mut mode = TermMode::default();
        mode.insert(TermMode::BRACKETED_PASTE);
        assert!(mode.contains(TermMode::BRACKETED_PASTE));
        mode.remove(TermMode::BRACKETED_PASTE);
        assert!(!mode.contains(TermMode::BRACKETED_PASTE));
    }
}
