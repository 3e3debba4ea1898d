use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::console::KeyHints;
use crate::tui::theme::Theme;

use super::helpers::centered_rect_fixed;
use super::hints::hint_lines;

/// Render a value picker: the choices for one context in a centered box
pub fn render_picker(frame: &mut Frame, choice: &KeyHints, theme: &Theme, area: Rect) {
    let popup_w: u16 = 60.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let bg = theme.background;

    let mut lines = hint_lines(choice, theme, inner_w);
    if choice.entries.is_empty() {
        lines.push(ratatui::text::Line::styled(
            "(nothing to choose from)",
            Style::default().fg(theme.dim).bg(bg),
        ));
    }
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));

    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}
