use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders};

pub fn panel_block<'a>(title: &'a str, focused: bool) -> Block<'a> {
    let mut b = Block::default().borders(Borders::ALL).title(title);
    if focused {
        b = b.border_style(crate::theme::border_focused());
    }
    b
}

// Modal frame: title on the left, close hint on the right
pub fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(crate::theme::border_focused())
        .title(Span::styled(
            format!(" {title} "),
            crate::theme::text_title(),
        ))
        .title(Line::from(" [x] Esc ").right_aligned())
}

/// Rect `percent_x` wide and `height` rows tall, centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (area.width as u32 * percent_x.min(100) as u32 / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        let r = centered_rect(70, 19, area);
        assert_eq!(r.width, 56);
        assert_eq!(r.height, 19);
        assert_eq!(r.x, 12);
        assert_eq!(r.y, 2);
        let tiny = centered_rect(50, 40, Rect::new(0, 0, 20, 10));
        assert_eq!(tiny.height, 10);
        assert_eq!(tiny.y, 0);
    }
}
