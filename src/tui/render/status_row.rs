use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::theme::Theme;

/// Render the status row (bottom of screen): the line editor when a prompt
/// is open, otherwise the last status message
pub fn render_status_row(
    frame: &mut Frame,
    status: Option<&str>,
    prompt: Option<(&str, &str)>,
    theme: &Theme,
    area: Rect,
) {
    let bg = theme.background;
    let width = area.width as usize;

    let line = match (prompt, status) {
        (Some((prompt, buffer)), _) => {
            // Prompt: text▌
            let mut spans = vec![
                Span::styled(prompt.to_string(), Style::default().fg(theme.dim).bg(bg)),
                Span::styled(
                    buffer.to_string(),
                    Style::default().fg(theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)), // ▌ cursor
            ];
            let hint = "Enter submit  Esc cancel";
            let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
            let hint_width = hint.chars().count();
            if content_width + hint_width < width {
                let padding = width - content_width - hint_width;
                spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
                spans.push(Span::styled(hint, Style::default().fg(theme.dim).bg(bg)));
            }
            Line::from(spans)
        }
        (None, Some(message)) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(theme.yellow).bg(bg),
        )),
        (None, None) => Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg))),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
