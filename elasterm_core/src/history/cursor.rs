//! Cursor motion: relative moves, absolute positioning, save/restore.
//!
//! All targets clamp into the valid range instead of failing. Vertical
//! motion clamps differently by screen: the alternate screen is a fixed
//! region, while the primary screen lets the cursor climb into scrollback
//! (the original's behavior for CUU) and allocates fresh lines below.

use crate::event::EventListener;

use super::History;

impl<T: EventListener> History<T> {
    /// CR: column 0.
    pub(crate) fn carriage_return(&mut self) {
        self.current_column = 0;
        self.update_at_end_of_line();
    }

    /// CUU: up `n`, clamped to the screen top (alternate) or the oldest
    /// retained line (primary).
    pub(crate) fn cursor_up(&mut self, n: usize) {
        let floor = if self.is_in_alternate_screen() {
            self.screen_top_line()
        } else {
            self.first_line
        };
        self.current_line = (self.current_line - n as i64).max(floor);
        self.update_at_end_of_line();
    }

    /// CUD/VPR: down `n`, clamped to the screen bottom; allocates lines
    /// that don't exist yet.
    pub(crate) fn cursor_down(&mut self, n: usize) {
        let bottom = self.screen_top_line() + self.lines_on_screen as i64 - 1;
        self.current_line = (self.current_line + n as i64).min(bottom);
        self.ensure_current_line();
        self.update_at_end_of_line();
    }

    /// CUF: forward `n`, padding the line with spaces when the cursor
    /// lands past its end.
    pub(crate) fn cursor_forward(&mut self, n: usize) {
        self.current_column += n;
        self.ensure_current_column();
    }

    /// CUB: back `n`, clamped to column 0.
    pub(crate) fn cursor_back(&mut self, n: usize) {
        self.current_column = self.current_column.saturating_sub(n);
        self.update_at_end_of_line();
    }

    /// CHA: absolute column (0-based here; the dispatcher converts).
    pub(crate) fn cursor_to_column(&mut self, column: usize) {
        self.ensure_current_line();
        self.current_column = column;
        self.update_at_end_of_line();
    }

    /// CUP/HVP: absolute screen-relative position (0-based here).
    pub(crate) fn cursor_to(&mut self, row: usize, column: usize) {
        self.cursor_to_line(row);
        self.current_column = column;
        self.update_at_end_of_line();
    }

    /// VPA: absolute screen-relative row, column unchanged.
    pub(crate) fn cursor_to_line(&mut self, row: usize) {
        let row = row.min(self.lines_on_screen.saturating_sub(1));
        self.current_line = self.screen_top_line() + row as i64;
        self.ensure_current_line();
        self.update_at_end_of_line();
    }

    /// DECSC: save the cursor, screen-relative so the saved position
    /// survives scrolling.
    pub(crate) fn save_cursor(&mut self) {
        self.saved_line = self.current_line - self.screen_top_line();
        self.saved_column = self.current_column;
    }

    /// DECRC: restore the saved cursor.
    pub(crate) fn restore_cursor(&mut self) {
        self.current_line = (self.screen_top_line() + self.saved_line).max(self.first_line);
        self.ensure_current_line();
        self.current_column = self.saved_column;
        self.update_at_end_of_line();
    }
}
