use crate::model::ClientRecord;
use crate::widgets::chrome::panel_block;
use ratatui::prelude::*;
use ratatui::widgets::*;

// Parent page: clients the store has accepted this session
pub fn draw_client_list(f: &mut Frame, area: Rect, clients: &[ClientRecord], focused: bool) {
    let mut lines: Vec<Line> = Vec::new();
    if clients.is_empty() {
        lines.push(Line::from(Span::styled(
            "No clients yet. Press n to add one.",
            crate::theme::text_muted(),
        )));
    }
    for (i, c) in clients.iter().enumerate() {
        let mut spans = vec![
            Span::styled(format!("{:>3}. ", i + 1), crate::theme::text_muted()),
            Span::styled(c.display_name(), crate::theme::text_active_bold()),
            Span::raw(format!("  @{}  {}", c.username, c.phone)),
        ];
        if !c.email.is_empty() {
            spans.push(Span::styled(
                format!("  <{}>", c.email),
                crate::theme::text_success(),
            ));
        }
        lines.push(Line::from(spans));
    }
    let title = format!("Clients ({})", clients.len());
    let p = Paragraph::new(lines).block(panel_block(&title, focused));
    f.render_widget(p, area);
}
