use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::RenderConfig;

/// Render the shell prompt with the filter built so far
pub fn render_shell_view(frame: &mut Frame, filter: &str, cfg: &RenderConfig, area: Rect) {
    let theme = &cfg.theme;
    let bg = theme.background;
    let prompt = if filter.is_empty() {
        "task>".to_string()
    } else {
        format!("task {}>", filter)
    };
    let lines = vec![
        Line::default(),
        Line::from(vec![
            Span::styled(
                prompt,
                Style::default()
                    .fg(theme.text_bright)
                    .bg(theme.blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
        ]),
    ];
    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
