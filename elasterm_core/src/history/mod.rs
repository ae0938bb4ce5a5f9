//! The history: a fixed-capacity ring of lines plus the terminal state
//! machine that mutates it.
//!
//! Line numbers are 64-bit and monotonically increasing; lines scroll out
//! of the ring but keep their numbers. The visible screen is the tail of
//! the ring (`screen_top_line()..=last_line`), or a dedicated region when
//! the alternate screen is active. All child output enters through
//! `add_input` (see `input.rs`); everything else here is ring bookkeeping,
//! geometry, and elastic-group management.

pub mod mode;

mod csi;
mod cursor;
mod editing;
mod escape;
mod input;
mod screen;
mod scroll;

pub use mode::TermMode;

use crate::color::Color;
use crate::elastic::{ElasticTabs, TabGroupArena, TabGroupId};
use crate::event::EventListener;
use crate::line::Line;
use crate::settings::Settings;
use crate::style::Style;

/// Default screen geometry before the host reports real numbers.
const DEFAULT_LINES_ON_SCREEN: usize = 24;
const DEFAULT_CHARACTERS_PER_LINE: usize = 80;

/// Cursor and margin state of the primary screen, stashed while the
/// alternate screen is active.
#[derive(Debug, Clone, Copy)]
struct PrimaryState {
    current_line: i64,
    current_column: usize,
    top_margin: usize,
    bottom_margin: Option<usize>,
}

/// The terminal core.
///
/// Generic over `T: EventListener` so tests can use `VoidListener` while a
/// real host routes titles and pty write-backs to its own plumbing.
#[derive(Debug)]
pub struct History<T: EventListener> {
    /// Ring slots. Allocated once; recycled slots are cleared, not freed.
    lines: Vec<Line>,
    capacity: i64,
    /// Logical number of the oldest retained line.
    first_line: i64,
    /// Logical number of the newest line.
    last_line: i64,
    /// Ring slot holding `first_line`.
    first_line_index: i64,

    current_line: i64,
    current_column: usize,
    /// Caches `current_column >= |line(current_line)|` for the fast path.
    at_end_of_line: bool,

    current_style: Style,
    default_style: Style,
    mode: TermMode,

    /// DECSTBM margins, screen-relative. `bottom_margin` of `None` means
    /// the bottom of the screen.
    top_margin: usize,
    bottom_margin: Option<usize>,

    lines_on_screen: usize,
    characters_per_line: usize,

    /// G0 is the DEC special graphics set ('0').
    g0_line_drawing: bool,

    /// First line of the alternate screen region; `None` when primary.
    alternate_screen_top_line: Option<i64>,
    /// DECSC cursor, screen-relative.
    saved_line: i64,
    saved_column: usize,
    /// Primary-screen state while the alternate screen is active.
    primary_state: Option<PrimaryState>,

    groups: TabGroupArena,
    /// Group inherited by lines produced with `\n`.
    current_group: Option<TabGroupId>,

    listener: T,
}

impl<T: EventListener> History<T> {
    /// A history sized by `settings.history_size`.
    pub fn new(settings: &Settings, listener: T) -> Self {
        Self::with_capacity(settings, settings.history_size, listener)
    }

    /// A history with an explicit ring capacity.
    pub fn with_capacity(settings: &Settings, capacity: usize, listener: T) -> Self {
        let capacity = capacity.max(2);
        let default_style = Style::new(
            Color::from_raw(settings.default_foreground_color),
            Color::from_raw(settings.default_background_color),
        );
        let mut mode = TermMode::SHOW_CURSOR;
        if settings.default_auto_wrap {
            mode |= TermMode::AUTO_WRAP;
        }

        Self {
            lines: vec![Line::new(); capacity],
            capacity: capacity as i64,
            first_line: 0,
            last_line: 0,
            first_line_index: 0,
            current_line: 0,
            current_column: 0,
            at_end_of_line: true,
            current_style: default_style,
            default_style,
            mode,
            top_margin: 0,
            bottom_margin: None,
            lines_on_screen: DEFAULT_LINES_ON_SCREEN,
            characters_per_line: DEFAULT_CHARACTERS_PER_LINE,
            g0_line_drawing: false,
            alternate_screen_top_line: None,
            saved_line: 0,
            saved_column: 0,
            primary_state: None,
            groups: TabGroupArena::default(),
            current_group: None,
            listener,
        }
    }

    // --- Ring extents and rendering access ---

    /// Count of retained lines before `last_line`.
    pub fn num_lines(&self) -> i64 {
        self.last_line - self.first_line
    }

    /// Oldest retained line number.
    pub fn first_line(&self) -> i64 {
        self.first_line
    }

    /// Newest line number.
    pub fn last_line(&self) -> i64 {
        self.last_line
    }

    /// Borrow a line for rendering. Valid until the next mutating call.
    ///
    /// `n` must be within `[first_line, last_line]`.
    pub fn line(&self, n: i64) -> &Line {
        debug_assert!(
            (self.first_line..=self.last_line).contains(&n),
            "line {n} outside [{}, {}]",
            self.first_line,
            self.last_line,
        );
        &self.lines[self.line_index(n)]
    }

    // --- Cursor and mode state for rendering/input ---

    pub fn current_line(&self) -> i64 {
        self.current_line
    }

    pub fn current_column(&self) -> usize {
        self.current_column
    }

    pub fn at_end_of_line(&self) -> bool {
        self.at_end_of_line
    }

    pub fn mode(&self) -> TermMode {
        self.mode
    }

    /// DECTCEM: whether the host should draw the cursor.
    pub fn cursor_enabled(&self) -> bool {
        self.mode.contains(TermMode::SHOW_CURSOR)
    }

    /// DECCKM: cursor keys send `ESC O …` instead of `ESC [ …`.
    pub fn application_cursor_keys(&self) -> bool {
        self.mode.contains(TermMode::APP_CURSOR)
    }

    /// Mode 2004: pasted text should be wrapped in paste guards.
    pub fn use_bracketed_paste(&self) -> bool {
        self.mode.contains(TermMode::BRACKETED_PASTE)
    }

    pub fn is_in_alternate_screen(&self) -> bool {
        self.alternate_screen_top_line.is_some()
    }

    /// The style subsequent output will be written with.
    pub fn current_style(&self) -> Style {
        self.current_style
    }

    /// Reference to the event listener.
    pub fn listener(&self) -> &T {
        &self.listener
    }

    // --- Geometry from the host ---

    pub fn lines_on_screen(&self) -> usize {
        self.lines_on_screen
    }

    pub fn characters_per_line(&self) -> usize {
        self.characters_per_line
    }

    pub fn set_lines_on_screen(&mut self, rows: usize) {
        self.lines_on_screen = rows.max(1);
    }

    pub fn set_characters_per_line(&mut self, cols: usize) {
        self.characters_per_line = cols.max(1);
    }

    /// First screen row: the alternate region's top when active, otherwise
    /// the tail of history.
    pub fn screen_top_line(&self) -> i64 {
        match self.alternate_screen_top_line {
            Some(top) => top,
            None => (self.last_line - self.lines_on_screen as i64 + 1).max(self.first_line),
        }
    }

    /// Screen-relative bottom margin row (explicit or bottom of screen).
    pub(crate) fn effective_bottom_margin(&self) -> usize {
        self.bottom_margin
            .unwrap_or_else(|| self.lines_on_screen.saturating_sub(1))
    }

    pub fn top_margin(&self) -> usize {
        self.top_margin
    }

    pub fn bottom_margin(&self) -> Option<usize> {
        self.bottom_margin
    }

    // --- Ring internals ---

    pub(crate) fn line_index(&self, n: i64) -> usize {
        let index = (self.first_line_index + (n - self.first_line)).rem_euclid(self.capacity);
        index as usize
    }

    /// Clear a slot and release its elastic group reference.
    pub(crate) fn clear_line_slot(&mut self, n: i64) {
        let index = self.line_index(n);
        if let Some(id) = self.lines[index].fully_clear() {
            self.groups.release(id);
        }
    }

    /// Advance `last_line`, recycling the oldest slot when the ring is
    /// full. The new line's slot ends up cleared.
    pub(crate) fn allocate_new_line(&mut self) {
        self.last_line += 1;
        if self.last_line - self.first_line >= self.capacity {
            // Full: the new line reuses the oldest slot.
            let index = self.first_line_index as usize;
            if let Some(id) = self.lines[index].fully_clear() {
                self.groups.release(id);
            }
            self.first_line += 1;
            self.first_line_index = (self.first_line_index + 1) % self.capacity;
        } else {
            self.clear_line_slot(self.last_line);
        }
    }

    /// Allocate a line, move the cursor to it, and inherit the current
    /// elastic group.
    pub(crate) fn new_line(&mut self) {
        self.allocate_new_line();
        self.current_line = self.last_line;
        self.inherit_current_group(self.current_line);
        self.update_at_end_of_line();
    }

    /// Allocate until `current_line` names a real line.
    pub(crate) fn ensure_current_line(&mut self) {
        while self.current_line > self.last_line {
            self.allocate_new_line();
        }
        if self.current_line < self.first_line {
            self.current_line = self.first_line;
        }
    }

    /// Pad the current line with spaces up to `current_column`.
    pub(crate) fn ensure_current_column(&mut self) {
        self.ensure_current_line();
        let style = self.current_style;
        let index = self.line_index(self.current_line);
        let length = self.lines[index].num_characters();
        if self.current_column > length {
            self.lines[index].append_spaces(self.current_column - length, style);
            self.note_characters_added(self.current_line);
        }
        self.update_at_end_of_line();
    }

    /// Refresh the cached end-of-line flag.
    pub(crate) fn update_at_end_of_line(&mut self) {
        if self.current_line > self.last_line || self.current_line < self.first_line {
            self.at_end_of_line = true;
            return;
        }
        let index = self.line_index(self.current_line);
        self.at_end_of_line = self.current_column >= self.lines[index].num_characters();
    }

    // --- Elastic tab groups ---

    /// Start a fresh elastic group on the current line. Lines produced by
    /// subsequent `\n`s join it.
    pub fn start_elastic_tabs(&mut self, num_right_columns: usize) {
        self.ensure_current_line();
        let index = self.line_index(self.current_line);
        if let Some(old) = self.lines[index].take_tab_group() {
            self.groups.release(old);
        }
        if let Some(old) = self.current_group.take() {
            self.groups.release(old);
        }
        let id = self.groups.create(self.current_line, num_right_columns);
        self.groups.acquire(id);
        let index = self.line_index(self.current_line);
        self.lines[index].set_tab_group(id);
        self.current_group = Some(id);
    }

    /// Stop extending the current elastic group.
    ///
    /// With `include_current`, the current line also leaves the group;
    /// otherwise detachment starts at the next line.
    pub fn end_elastic_tabs(&mut self, include_current: bool) {
        let Some(id) = self.current_group.take() else {
            return;
        };
        if include_current && self.current_line <= self.last_line {
            let index = self.line_index(self.current_line);
            if self.lines[index].tab_group() == Some(id) {
                self.lines[index].take_tab_group();
                self.groups.release(id);
            }
        }
        self.groups.release(id);
    }

    /// The group new lines currently inherit.
    pub fn current_tab_group(&self) -> Option<TabGroupId> {
        self.current_group
    }

    /// Inspect a group (e.g. for rendering column widths).
    pub fn tab_group(&self, id: TabGroupId) -> Option<&ElasticTabs> {
        self.groups.get(id)
    }

    pub(crate) fn groups_mut(&mut self) -> &mut TabGroupArena {
        &mut self.groups
    }

    /// Attach the history's current group to `line_no`.
    pub(crate) fn inherit_current_group(&mut self, line_no: i64) {
        let Some(id) = self.current_group else {
            return;
        };
        let index = self.line_index(line_no);
        if self.lines[index].tab_group() == Some(id) {
            return;
        }
        let old = self.lines[index].set_tab_group(id);
        self.groups.acquire(id);
        if let Some(old) = old {
            self.groups.release(old);
        }
    }

    /// Characters were added on `line_no`; nudge its group's dirty state.
    pub(crate) fn note_characters_added(&mut self, line_no: i64) {
        let index = self.line_index(line_no);
        if let Some(id) = self.lines[index].tab_group() {
            if let Some(group) = self.groups.get_mut(id) {
                group.mark_addition(line_no);
            }
        }
    }

    /// Characters were removed on `line_no` (or replaced with a tab);
    /// force a full group recomputation.
    pub(crate) fn note_characters_removed(&mut self, line_no: i64) {
        let index = self.line_index(line_no);
        if let Some(id) = self.lines[index].tab_group() {
            if let Some(group) = self.groups.get_mut(id) {
                group.mark_deletion();
            }
        }
    }
}
