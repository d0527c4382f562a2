//! Cookie Clicker Workshop rendering.

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::actions::{BUY_UPGRADE_BASE, CLICK_COOKIE};
use crate::economy::{Snapshot, UpgradeType};
use crate::input::{is_narrow_layout, ClickTargets};
use crate::session::{Activity, Session};
use crate::widgets::ClickableList;

const COOKIE_ART: &[&str] = &["╭━●━●━╮", "━●━━●━●━", "╰━●━●━╯"];

pub fn render(session: &Session, f: &mut Frame, area: Rect, targets: &mut ClickTargets) {
    let snap = session.snapshot();
    let catalog = session.catalog();

    let (main_area, log_area) = if is_narrow_layout(area.width) {
        (area, None)
    } else {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        (h[0], Some(h[1]))
    };

    // Two lines per item plus the borders.
    let items_height = catalog.len() as u16 * 2 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(COOKIE_ART.len() as u16 + 3),
            Constraint::Length(items_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(main_area);

    render_indicator(&snap, &session.activity(), f, chunks[0]);
    render_cookie(f, chunks[1], targets);
    render_items(session, &snap, catalog, f, chunks[2], targets);
    render_help(f, chunks[4], targets);
    if let Some(log_area) = log_area {
        render_log(session, f, log_area);
    }
}

fn render_indicator(snap: &Snapshot, activity: &Activity, f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} cookies", format_number(snap.balance)),
            Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format_number(snap.rate),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" cookies per second"),
        ]),
    ];
    if activity.last_tick_amount > 0 {
        lines[1].spans.push(Span::styled(
            format!("  (+{})", format_number(activity.last_tick_amount)),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(widget, area);
}

fn render_cookie(f: &mut Frame, area: Rect, targets: &mut ClickTargets) {
    let style = Style::default().fg(Color::Yellow);
    let mut lines: Vec<Line> = COOKIE_ART
        .iter()
        .map(|row| Line::from(Span::styled(*row, style)))
        .collect();
    lines.push(Line::from(Span::styled(
        "click me",
        Style::default().fg(Color::DarkGray),
    )));
    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(widget, area);
    targets.register(area, CLICK_COOKIE);
}

fn render_items(
    session: &Session,
    snap: &Snapshot,
    catalog: &[UpgradeType],
    f: &mut Frame,
    area: Rect,
    targets: &mut ClickTargets,
) {
    let mut cl = ClickableList::new();
    for (idx, upgrade) in catalog.iter().enumerate() {
        let action = BUY_UPGRADE_BASE + idx as u16;
        let affordable = session.can_afford(upgrade.id);
        let name_style = if affordable {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!(" [{}] ", upgrade.id.key()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(upgrade.name, name_style),
                Span::styled(
                    format!("  x{}", snap.owned(upgrade.id)),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            action,
        );
        cl.push_clickable(
            Line::from(Span::styled(
                format!(
                    "     Cost: {} cookies Produces: {} cookies/second.",
                    format_number(upgrade.cost),
                    format_number(upgrade.value)
                ),
                Style::default().fg(Color::Gray),
            )),
            action,
        );
    }
    cl.register_targets(area, targets, 1, 1);

    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Items "),
    );
    f.render_widget(widget, area);
}

fn render_log(session: &Session, f: &mut Frame, area: Rect) {
    let log = session.log();
    let visible = area.height.saturating_sub(2) as usize;
    let start = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(format!(" Log (tick {}) ", session.ticks_fired())),
        );
    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame, area: Rect, targets: &mut ClickTargets) {
    let widget = Paragraph::new(Line::from(Span::styled(
        "[C]/[Space] bake a cookie   [1]-[3] buy",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(widget, area);
    targets.register(area, CLICK_COOKIE);
}

/// Format a count with thousands separators (1234567 → "1,234,567").
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_format_number_strips_back_to_digits(n in any::<u64>()) {
            let s = format_number(n);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
        }

        #[test]
        fn prop_format_number_groups_of_three(n in any::<u64>()) {
            let s = format_number(n);
            let groups: Vec<&str> = s.split(',').collect();
            prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
            for g in &groups[1..] {
                prop_assert_eq!(g.len(), 3);
            }
        }
    }
}
