use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::ops::bindings::is_free_form_tag;
use crate::tui::console::DetailView;
use crate::util::unicode;

use super::RenderConfig;
use super::helpers::{format_age, summary_spans};

const DATE_FORMAT: &str = "%Y %b %d %a";

/// Render one item in full: summary row, then labelled fields
pub fn render_detail_view(frame: &mut Frame, view: &DetailView, cfg: &RenderConfig, area: Rect) {
    let theme = &cfg.theme;
    let bg = theme.background;
    let label = Style::default().fg(theme.dim).bg(bg);
    let value = Style::default().fg(theme.text).bg(bg);
    let item = &view.row.item;

    let field = |name: &str, text: String| {
        Line::from(vec![
            Span::styled(format!("{:<14}", format!("{}:", name)), label),
            Span::styled(text, value),
        ])
    };

    let mut lines = vec![Line::from(summary_spans(&view.row, cfg, None)), Line::default()];

    if unicode::display_width(&item.description) > cfg.description_width {
        lines.push(field("Description", item.description.clone()));
    }

    let mut tag_spans = vec![Span::styled(format!("{:<14}", "Tags:"), label)];
    let palette = [theme.red, theme.green, theme.yellow, theme.blue, theme.highlight, theme.cyan];
    for (i, tag) in item.tags.iter().filter(|t| is_free_form_tag(t)).enumerate() {
        if i > 0 {
            tag_spans.push(Span::styled(" ", value));
        }
        tag_spans.push(Span::styled(
            tag.clone(),
            Style::default().fg(palette[i % palette.len()]).bg(bg),
        ));
    }
    lines.push(Line::from(tag_spans));

    lines.push(field("Started", date_or_dash(item.entry)));
    if let Some(end) = item.end {
        lines.push(field(
            "Completed",
            format!("{} [{} ago]", end.format(DATE_FORMAT), format_age(view.now - end)),
        ));
    }
    let age = item
        .entry
        .map(|started| format_age(item.end.unwrap_or(view.now) - started))
        .unwrap_or_else(|| "-".to_string());
    lines.push(field("Age", age));
    lines.push(field("UUID", item.uuid.clone().unwrap_or_else(|| "-".to_string())));
    lines.push(field(
        "ID",
        item.short_id
            .filter(|id| *id > 0)
            .map_or_else(|| "-".to_string(), |id| id.to_string()),
    ));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn date_or_dash(stamp: Option<DateTime<Utc>>) -> String {
    stamp.map_or_else(|| "-".to_string(), |t| t.format(DATE_FORMAT).to_string())
}
