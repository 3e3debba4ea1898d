use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::store::Conflict;
use crate::tui::theme::Theme;

use super::helpers::{centered_rect_fixed, wrap_text};

/// Render the popup for a write refused because the item changed elsewhere
pub fn render_conflict_popup(frame: &mut Frame, conflict: &Conflict, theme: &Theme, area: Rect) {
    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = theme.background;
    let header_style = Style::default()
        .fg(theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text).bg(bg);
    let bright_style = Style::default().fg(theme.text_bright).bg(bg);

    let mut styled_lines: Vec<(String, Style)> = Vec::new();

    styled_lines.push((" Changed Elsewhere".into(), header_style));
    styled_lines.push(("".into(), text_style));

    for s in wrap_text(
        " ",
        "This item was modified after it was loaded. Your edit was not saved.",
        inner_w,
    ) {
        styled_lines.push((s, text_style));
    }
    styled_lines.push(("".into(), text_style));

    let stamp = |s: &Option<String>| s.clone().unwrap_or_else(|| "-".to_string());
    styled_lines.push((format!("   loaded:  {}", stamp(&conflict.captured)), bright_style));
    styled_lines.push((format!("   current: {}", stamp(&conflict.stored)), bright_style));
    styled_lines.push(("".into(), text_style));

    for s in wrap_text(" ", "Press any key to reload the item.", inner_w) {
        styled_lines.push((s, text_style));
    }

    let popup_h = ((styled_lines.len() as u16) + 2).min(area.height.saturating_sub(2));

    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let lines: Vec<Line> = styled_lines
        .into_iter()
        .map(|(text, style)| Line::from(Span::styled(text, style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.red).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}
