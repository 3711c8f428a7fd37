use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::ui::AppState;

pub fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let mut spans: Vec<Span> = Vec::new();
    if state.store.is_busy() {
        let spinner = ["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"][state.tick as usize % 6];
        spans.push(Span::raw(format!(" {spinner} Creating client...")));
        spans.push(Span::raw("  |  "));
    }
    let hints = if state.open {
        "Tab/↓ next  Shift+Tab/↑ prev  Enter submit  Ctrl+U clear  Esc close"
    } else {
        "n new client  d debug log  q quit"
    };
    spans.push(Span::styled(hints, crate::theme::text_muted()));
    let p = Paragraph::new(Line::from(spans));
    f.render_widget(p, area);
}
