//! Emergency lock-out overlay.
//!
//! Rendered over the whole screen exactly while the backend reports the
//! physical emergency stop engaged. There is no local dismissal: the only
//! exit is the reload key, which rebuilds the entire application so the
//! emergency state is revalidated fresh from the backend.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Widget};

use crate::theme::{palette, styles};

pub struct EmergencyOverlay;

/// Center a fixed-size rect within an area, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Dim every cell so the dashboard reads as inert behind the modal.
fn dim_background(buf: &mut Buffer, area: Rect) {
    let dim = Style::default().fg(palette::OVERLAY_DIM);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf[(x, y)].set_style(dim);
        }
    }
}

impl Widget for EmergencyOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        dim_background(buf, area);

        let modal = centered_rect(54, 7, area);
        Clear.render(modal, buf);

        let lines = vec![
            Line::from(Span::styled(
                "EMERGENCY STOP ACTIVE",
                Style::default()
                    .fg(palette::EMERGENCY_FG)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Release the emergency stop on the robot,",
                styles::text_secondary(),
            )),
            Line::from(Span::styled(
                "then press r to reload the console.",
                styles::text_secondary(),
            )),
        ];

        Paragraph::new(lines)
            .centered()
            .block(
                styles::panel_block("", false)
                    .border_style(Style::default().fg(palette::EMERGENCY_FG)),
            )
            .render(modal, buf);
    }
}
