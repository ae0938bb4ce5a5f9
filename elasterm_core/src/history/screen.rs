//! The alternate screen (mode 1049).
//!
//! The alternate screen is appended to history as additional lines rather
//! than swapping buffers, so the primary screen stays intact underneath
//! and remains reachable through scrollback. Leaving truncates those lines
//! away again.

use crate::event::EventListener;

use super::{History, PrimaryState};

impl<T: EventListener> History<T> {
    /// Enter the alternate screen: stash the primary cursor and margins,
    /// append a screenful of fresh lines, and home the cursor in them.
    pub(crate) fn enter_alternate_screen(&mut self) {
        if self.is_in_alternate_screen() {
            return;
        }
        self.primary_state = Some(PrimaryState {
            current_line: self.current_line,
            current_column: self.current_column,
            top_margin: self.top_margin,
            bottom_margin: self.bottom_margin,
        });

        let top = self.last_line + 1;
        for _ in 0..self.lines_on_screen {
            self.allocate_new_line();
        }
        self.alternate_screen_top_line = Some(top);
        self.current_line = top;
        self.current_column = 0;
        self.top_margin = 0;
        self.bottom_margin = None;
        self.update_at_end_of_line();
    }

    /// Leave the alternate screen: truncate its lines off the end of
    /// history and restore the primary cursor and margins.
    pub(crate) fn exit_alternate_screen(&mut self) {
        let Some(top) = self.alternate_screen_top_line.take() else {
            return;
        };

        let new_last = (top - 1).max(self.first_line);
        for line in (new_last + 1)..=self.last_line {
            self.clear_line_slot(line);
        }
        self.last_line = new_last;

        if let Some(saved) = self.primary_state.take() {
            self.current_line = saved.current_line.clamp(self.first_line, self.last_line);
            self.current_column = saved.current_column;
            self.top_margin = saved.top_margin;
            self.bottom_margin = saved.bottom_margin;
        }
        self.update_at_end_of_line();
    }
}
