use chrono::Duration;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use regex::Regex;

use crate::tui::console::Row;
use crate::util::unicode;

use super::{RenderConfig, push_highlighted_spans};

const ASSIGNEE_CELLS: usize = 13;
const PROJECT_CELLS: usize = 12;
const COLOR_CELLS: usize = 10;

/// Spans for one summary row:
/// `[ i of n ]  badge  assignee  project  description  color`
pub(super) fn summary_spans(
    row: &Row,
    cfg: &RenderConfig,
    search_re: Option<&Regex>,
) -> Vec<Span<'static>> {
    let theme = &cfg.theme;
    let bg = theme.background;
    let item = &row.item;
    let color = item.color_label();

    let mut spans = vec![
        Span::styled(
            format!(" [{:2} of {:2}] ", row.index, row.total),
            Style::default().fg(theme.dim).bg(bg),
        ),
        Span::styled(
            format!(" {} ", row.badge.symbol()),
            Style::default()
                .fg(theme.badge_color(row.badge))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", unicode::fit_right(item.assignee().unwrap_or(""), ASSIGNEE_CELLS)),
            Style::default().fg(theme.yellow).bg(bg),
        ),
        Span::styled(
            format!(
                " {} ",
                unicode::fit_right(item.project.as_deref().unwrap_or(""), PROJECT_CELLS)
            ),
            Style::default().fg(theme.cyan).bg(bg),
        ),
        Span::styled(" ", Style::default().bg(bg)),
    ];

    let description = unicode::fit_left(&item.description, cfg.description_width);
    push_highlighted_spans(
        &mut spans,
        &description,
        Style::default().fg(theme.text_bright).bg(bg),
        Style::default()
            .fg(theme.search_match_fg)
            .bg(theme.search_match_bg),
        search_re,
    );

    spans.push(Span::styled(
        format!(
            "  {}",
            unicode::fit_left(color.map_or("", |c| c.as_str()), COLOR_CELLS)
        ),
        Style::default().fg(theme.label_color(color)).bg(bg),
    ));
    spans
}

/// Human-readable span of time: "3 days 4 hours", "2 hours", "15 mins"
pub(super) fn format_age(dur: Duration) -> String {
    let dur = dur.max(Duration::zero());
    let days = dur.num_days();
    let rest = dur - Duration::days(days);
    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} days", days));
    }
    if rest.num_hours() > 0 {
        parts.push(format!("{} hours", rest.num_hours()));
    } else if days == 0 {
        parts.push(format!("{} mins", rest.num_minutes()));
    }
    parts.join(" ")
}

/// Word-wrap `text` into lines of at most `max_width` characters.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_len = indent.len();
    let mut lines = Vec::new();
    let mut current = indent.to_string();

    for word in text.split_whitespace() {
        let space = if current.len() == indent_len { 0 } else { 1 };
        if current.len() + space + word.len() > max_width && current.len() > indent_len {
            lines.push(current);
            current = indent.to_string();
        }
        if current.len() > indent_len {
            current.push(' ');
        }
        current.push_str(word);
    }
    if current.len() > indent_len || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
