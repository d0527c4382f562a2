//! Input plumbing: normalized events, per-frame click targets, and
//! pixel-to-cell conversion for mouse and touch.

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A tap on a registered target, carrying its action ID (see `actions`).
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets registered by the last rendered frame, plus the terminal
/// size they were laid out for.
pub struct ClickTargets {
    targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickTargets {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Start a new frame at the given terminal size.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn register(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// Register one full-width row of `area`. Rows outside the area are ignored.
    pub fn register_row(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.register(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action at a cell. Later registrations sit on top of earlier ones.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }

    /// Hit-test a pointer position given relative to the grid container.
    pub fn hit_test_pixels(&self, x: f64, y: f64, grid_width: f64, grid_height: f64) -> Option<u16> {
        let col = pixel_to_cell(x, grid_width, self.terminal_cols)?;
        let row = pixel_to_cell(y, grid_height, self.terminal_rows)?;
        self.hit_test(col, row)
    }
}

/// Screens narrower than this stack panels vertically and hide the log.
pub const NARROW_LAYOUT_COLS: u16 = 80;

pub fn is_narrow_layout(width: u16) -> bool {
    width < NARROW_LAYOUT_COLS
}

/// Convert a pixel offset along one axis to a cell index.
///
/// Returns `None` for offsets outside the grid or degenerate sizes.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}
