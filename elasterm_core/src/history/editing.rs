//! Character and region erase/insert/delete primitives (ICH, DCH, ECH,
//! ED, EL).

use crate::event::EventListener;

use super::History;

impl<T: EventListener> History<T> {
    /// ICH: insert blanks at the cursor, shifting the tail right.
    pub(crate) fn insert_blank_characters(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.ensure_current_line();
        self.ensure_current_column();
        let style = self.current_style;
        let column = self.current_column;
        let index = self.line_index(self.current_line);
        self.lines[index].insert_characters(column, &vec![b' '; count], style);
        self.note_characters_added(self.current_line);
        self.update_at_end_of_line();
    }

    /// DCH: delete characters at the cursor, pulling the tail left.
    pub(crate) fn delete_characters_at_cursor(&mut self, count: usize) {
        self.ensure_current_line();
        let column = self.current_column;
        let index = self.line_index(self.current_line);
        self.lines[index].delete_characters(column, count);
        self.note_characters_removed(self.current_line);
        self.update_at_end_of_line();
    }

    /// ECH: overwrite characters with spaces, no shift.
    pub(crate) fn erase_characters(&mut self, count: usize) {
        self.ensure_current_line();
        let style = self.current_style;
        let column = self.current_column;
        let index = self.line_index(self.current_line);
        let length = self.lines[index].num_characters();
        let count = count.min(length.saturating_sub(column));
        if count == 0 {
            return;
        }
        self.lines[index].replace_characters(column, &vec![b' '; count], style);
        // Erased characters may have been a column's widest.
        self.note_characters_removed(self.current_line);
        self.update_at_end_of_line();
    }

    /// EL: erase within the current line.
    ///
    /// 0 clears to the end, 1 clears from the start (re-padding so the
    /// cursor column keeps its position), 2 clears the whole line.
    pub(crate) fn erase_in_line(&mut self, mode: u16) {
        self.ensure_current_line();
        let style = self.current_style;
        let column = self.current_column;
        let index = self.line_index(self.current_line);
        match mode {
            0 => self.lines[index].clear_to_end_from(column),
            1 => {
                self.lines[index].clear_from_beginning_to(column);
                self.lines[index].prepend_spaces(column, style);
            }
            2 => self.lines[index].clear(),
            _ => return,
        }
        self.note_characters_removed(self.current_line);
        self.update_at_end_of_line();
    }

    /// ED: erase within the current screen.
    ///
    /// 0 clears from the cursor down, 1 from the screen top down to the
    /// cursor, 2 and 3 the whole screen. Lines keep their elastic group
    /// membership; the groups are marked for full recomputation.
    pub(crate) fn erase_in_display(&mut self, mode: u16) {
        self.ensure_current_line();
        let screen_top = self.screen_top_line();
        match mode {
            0 => {
                self.erase_in_line(0);
                for line in (self.current_line + 1)..=self.last_line {
                    self.clear_line_keeping_group(line);
                }
            }
            1 => {
                self.erase_in_line(1);
                for line in screen_top..self.current_line {
                    self.clear_line_keeping_group(line);
                }
            }
            2 | 3 => {
                for line in screen_top..=self.last_line {
                    self.clear_line_keeping_group(line);
                }
            }
            _ => {}
        }
        self.update_at_end_of_line();
    }

    fn clear_line_keeping_group(&mut self, line_no: i64) {
        if line_no < self.first_line || line_no > self.last_line {
            return;
        }
        let index = self.line_index(line_no);
        self.lines[index].clear();
        self.note_characters_removed(line_no);
    }
}
