//! Line feeds, reverse index, and scroll-region operations.
//!
//! Scrolling moves ring slots by swapping and clears the vacated ones, so
//! no line content is ever copied. All bounds are absolute line numbers;
//! callers convert screen-relative margins before calling in.

use crate::event::EventListener;

use super::History;

impl<T: EventListener> History<T> {
    /// LF.
    ///
    /// Inside an active scroll region the region scrolls and the cursor
    /// stays put; at the bottom of history a fresh line is allocated;
    /// otherwise the cursor steps down and the line joins the current
    /// elastic group.
    pub(crate) fn next_line(&mut self) {
        let screen_top = self.screen_top_line();
        let at_region_bottom = self
            .bottom_margin
            .is_some_and(|bottom| self.current_line == screen_top + bottom as i64);

        if (self.top_margin > 0 && self.current_line >= self.last_line) || at_region_bottom {
            let top = screen_top + self.top_margin as i64;
            let bottom = screen_top + self.effective_bottom_margin() as i64;
            self.scroll_up(top, bottom, 1);
            self.update_at_end_of_line();
        } else if self.current_line >= self.last_line {
            self.new_line();
        } else {
            self.current_line += 1;
            self.inherit_current_group(self.current_line);
            self.update_at_end_of_line();
        }
    }

    /// RI (`ESC M`): step up, scrolling the region down when the cursor
    /// sits on the top margin.
    pub(crate) fn reverse_index(&mut self) {
        let screen_top = self.screen_top_line();
        let top = screen_top + self.top_margin as i64;
        if self.current_line == top {
            let bottom = screen_top + self.effective_bottom_margin() as i64;
            self.scroll_down(top, bottom, 1);
        } else if self.current_line > self.first_line {
            self.current_line -= 1;
        }
        self.update_at_end_of_line();
    }

    /// Shift lines `[top + count ..= bottom]` up by `count` slots,
    /// clearing the vacated bottom slots.
    pub(crate) fn scroll_up(&mut self, top: i64, bottom: i64, count: i64) {
        let top = top.max(self.first_line);
        let bottom = bottom.min(self.last_line);
        if top > bottom || count <= 0 {
            return;
        }
        let count = count.min(bottom - top + 1);
        for dst in top..=(bottom - count) {
            let a = self.line_index(dst);
            let b = self.line_index(dst + count);
            self.lines.swap(a, b);
        }
        for line in (bottom - count + 1)..=bottom {
            self.clear_line_slot(line);
        }
    }

    /// Shift lines `[top ..= bottom - count]` down by `count` slots,
    /// clearing the vacated top slots.
    pub(crate) fn scroll_down(&mut self, top: i64, bottom: i64, count: i64) {
        let top = top.max(self.first_line);
        let bottom = bottom.min(self.last_line);
        if top > bottom || count <= 0 {
            return;
        }
        let count = count.min(bottom - top + 1);
        for dst in ((top + count)..=bottom).rev() {
            let a = self.line_index(dst);
            let b = self.line_index(dst - count);
            self.lines.swap(a, b);
        }
        for line in top..(top + count) {
            self.clear_line_slot(line);
        }
    }

    /// IL: insert blank lines at the cursor, pushing the rest of the
    /// region down.
    pub(crate) fn insert_lines(&mut self, count: usize) {
        self.ensure_current_line();
        let screen_top = self.screen_top_line();
        let top = screen_top + self.top_margin as i64;
        let bottom = screen_top + self.effective_bottom_margin() as i64;
        if self.current_line < top || self.current_line > bottom {
            return;
        }
        self.scroll_down(self.current_line, bottom, count as i64);
        self.update_at_end_of_line();
    }

    /// DL: delete lines at the cursor.
    ///
    /// With an explicit bottom margin (or in the alternate screen) the
    /// region scrolls up. In the primary screen without one, history
    /// itself shrinks: `last_line` drops by the count and later output
    /// allocates fresh line numbers.
    pub(crate) fn delete_lines(&mut self, count: usize) {
        self.ensure_current_line();

        if !self.is_in_alternate_screen() && self.bottom_margin.is_none() {
            let count = (count as i64).min(self.last_line - self.current_line + 1);
            if count <= 0 {
                return;
            }
            for dst in self.current_line..=(self.last_line - count) {
                let a = self.line_index(dst);
                let b = self.line_index(dst + count);
                self.lines.swap(a, b);
            }
            for line in (self.last_line - count + 1)..=self.last_line {
                self.clear_line_slot(line);
            }
            self.last_line = (self.last_line - count).max(self.first_line);
            self.current_line = self.current_line.min(self.last_line);
            self.update_at_end_of_line();
            return;
        }

        let screen_top = self.screen_top_line();
        let top = screen_top + self.top_margin as i64;
        let bottom = screen_top + self.effective_bottom_margin() as i64;
        if self.current_line < top || self.current_line > bottom {
            return;
        }
        self.scroll_up(self.current_line, bottom, count as i64);
        self.update_at_end_of_line();
    }

    /// SU: scroll the scroll region up.
    pub(crate) fn scroll_region_up(&mut self, count: usize) {
        let screen_top = self.screen_top_line();
        let top = screen_top + self.top_margin as i64;
        let bottom = screen_top + self.effective_bottom_margin() as i64;
        self.scroll_up(top, bottom, count as i64);
        self.update_at_end_of_line();
    }

    /// SD: scroll the scroll region down.
    pub(crate) fn scroll_region_down(&mut self, count: usize) {
        let screen_top = self.screen_top_line();
        let top = screen_top + self.top_margin as i64;
        let bottom = screen_top + self.effective_bottom_margin() as i64;
        self.scroll_down(top, bottom, count as i64);
        self.update_at_end_of_line();
    }
}
