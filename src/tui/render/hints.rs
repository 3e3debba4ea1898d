use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::console::KeyHints;
use crate::tui::theme::Theme;

use super::helpers::spans_width;

/// Lay out key hints as `[k] action` entries, wrapped to `width` cells.
/// The title, if any, leads the first line.
pub fn hint_lines(hints: &KeyHints, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let bg = theme.background;
    let key_style = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text).bg(bg);

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    if let Some(title) = &hints.title {
        current.push(Span::styled(
            format!(" {}: ", title),
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        current.push(Span::styled(" ", text_style));
    }

    for (key, action) in &hints.entries {
        let entry = vec![
            Span::styled(format!("[{}]", key), key_style),
            Span::styled(format!(" {}  ", action), text_style),
        ];
        if !current.is_empty() && spans_width(&current) + spans_width(&entry) > width {
            lines.push(Line::from(std::mem::take(&mut current)));
        }
        current.extend(entry);
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

pub fn render_hints(frame: &mut Frame, lines: Vec<Line<'static>>, theme: &Theme, area: Rect) {
    let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, area);
}
