use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::console::ListingView;

use super::helpers::summary_spans;
use super::{RenderConfig, search_regex};

/// Render the working set summary: header, rows, count
pub fn render_listing_view(frame: &mut Frame, view: &ListingView, cfg: &RenderConfig, area: Rect) {
    let theme = &cfg.theme;
    let bg = theme.background;
    let dim = Style::default().fg(theme.dim).bg(bg);
    let search_re = search_regex(&view.terms);

    let mut lines: Vec<Line> = Vec::new();
    let shown = if view.show_all {
        "> Showing all items.".to_string()
    } else {
        format!("> {} items already reviewed.", view.hidden)
    };
    lines.push(Line::from(Span::styled(shown, dim)));
    lines.push(Line::from(Span::styled(
        format!("> Sorted by {}.", view.sort.label()),
        dim,
    )));
    lines.push(Line::default());

    for row in &view.rows {
        lines.push(Line::from(summary_spans(row, cfg, search_re.as_ref())));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("Found {} items.", view.total),
        Style::default().fg(theme.text).bg(bg),
    )));

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
