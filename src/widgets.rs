//! Clickable line list: rendered lines paired with the action IDs they trigger.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickTargets;

/// Build lines first, then register targets once the widget area is known.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Items:"));
/// cl.push_clickable(Line::from(" [1] Cursor"), BUY_UPGRADE_BASE);
/// cl.register_targets(area, &mut targets, 1, 1);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// The action follows the line: inserting lines above it moves the target too.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register one row target per clickable line. `top` and `bottom` are
    /// the rows taken by borders; lines that fall outside the content area
    /// are skipped. Lines are assumed not to wrap.
    pub fn register_targets(&self, area: Rect, targets: &mut ClickTargets, top: u16, bottom: u16) {
        let content_y = area.y + top;
        let content_end = area.y + area.height.saturating_sub(bottom);
        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row < content_end {
                targets.register_row(area, row, action_id);
            }
        }
    }
}
