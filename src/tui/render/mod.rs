pub mod conflict_popup;
pub mod detail_view;
pub mod helpers;
pub mod hints;
pub mod listing_view;
pub mod picker;
pub mod shell_view;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use regex::Regex;

use crate::model::UiConfig;
use crate::ops::store::Conflict;

use super::console::{KeyHints, Screen, View};
use super::theme::Theme;

/// Display settings shared by every renderer
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub theme: Theme,
    /// Cells given to descriptions in summary rows
    pub description_width: usize,
}

impl RenderConfig {
    pub fn from_config(ui: &UiConfig) -> Self {
        RenderConfig {
            theme: Theme::from_config(ui),
            description_width: ui.description_width,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig::from_config(&UiConfig::default())
    }
}

/// Transient input drawn on top of the current screen
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Picker waiting for one key
    Choice(KeyHints),
    /// Line editor in the status row
    Prompt { prompt: String, buffer: String },
    /// Refused write waiting for acknowledgement
    Conflict(Conflict),
}

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, screen: &Screen, overlay: Option<&Overlay>, cfg: &RenderConfig) {
    let area = frame.area();

    let bg_style = Style::default().bg(cfg.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let hint_lines = hints::hint_lines(&screen.hints, &cfg.theme, area.width as usize);
    let hint_height = (hint_lines.len() as u16).min(area.height.saturating_sub(2));

    // Layout: content | key hints | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(hint_height),
            Constraint::Length(1),
        ])
        .split(area);

    match &screen.view {
        View::Shell { filter } => shell_view::render_shell_view(frame, filter, cfg, chunks[0]),
        View::Listing(listing) => listing_view::render_listing_view(frame, listing, cfg, chunks[0]),
        View::Detail(detail) => detail_view::render_detail_view(frame, detail, cfg, chunks[0]),
    }

    hints::render_hints(frame, hint_lines, &cfg.theme, chunks[1]);

    let prompt = match overlay {
        Some(Overlay::Prompt { prompt, buffer }) => Some((prompt.as_str(), buffer.as_str())),
        _ => None,
    };
    status_row::render_status_row(frame, screen.status.as_deref(), prompt, &cfg.theme, chunks[2]);

    match overlay {
        Some(Overlay::Choice(choice)) => picker::render_picker(frame, choice, &cfg.theme, area),
        Some(Overlay::Conflict(conflict)) => {
            conflict_popup::render_conflict_popup(frame, conflict, &cfg.theme, area)
        }
        _ => {}
    }
}

/// Case-insensitive regex matching any of the free-text terms
pub fn search_regex(terms: &[String]) -> Option<Regex> {
    if terms.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = terms.iter().map(|t| regex::escape(t)).collect();
    Regex::new(&format!("(?i)({})", alternatives.join("|"))).ok()
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans(
    spans: &mut Vec<Span<'static>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let re = match search_re {
        Some(r) => r,
        None => {
            spans.push(Span::styled(text.to_string(), base_style));
            return;
        }
    };

    let mut last_end = 0;
    let mut has_match = false;
    for m in re.find_iter(text) {
        has_match = true;
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[m.start()..m.end()].to_string(),
            highlight_style,
        ));
        last_end = m.end();
    }
    if !has_match {
        spans.push(Span::styled(text.to_string(), base_style));
    } else if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
