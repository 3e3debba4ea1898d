use chrono::{DateTime, TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::Item;
use crate::tui::console::{Badge, Row};

pub const TERM_W: u16 = 120;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 20, 12, 0, 0).unwrap()
}

/// Second of three rows: an open item in `web`, created three days ago.
pub fn sample_row(description: &str, tags: &[&str]) -> Row {
    let mut item = Item::new(description.to_string());
    item.uuid = Some("6f1c2a9e-0000-4000-8000-000000000001".into());
    item.short_id = Some(12);
    item.project = Some("web".into());
    item.entry = Some(Utc.with_ymd_and_hms(2025, 5, 17, 8, 0, 0).unwrap());
    item.tags = tags.iter().map(|t| t.to_string()).collect();
    Row {
        index: 1,
        total: 3,
        badge: Badge::New,
        item,
    }
}
