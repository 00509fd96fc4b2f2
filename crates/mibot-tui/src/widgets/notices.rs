//! Notice bar: the transient operator feedback strip.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use mibot_app::state::AppState;
use mibot_core::notice::NoticeLevel;

use crate::theme::styles;

pub struct NoticeBar<'a> {
    state: &'a AppState,
}

impl<'a> NoticeBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn prefix(level: NoticeLevel) -> &'static str {
        match level {
            NoticeLevel::Info => "·",
            NoticeLevel::Success => "✓",
            NoticeLevel::Warning => "!",
            NoticeLevel::Error => "✗",
        }
    }
}

impl Widget for NoticeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .state
            .notices
            .iter()
            .rev()
            .take(visible.max(1))
            .map(|n| {
                Line::from(Span::styled(
                    format!("{} {}", Self::prefix(n.level), n.text),
                    styles::notice_style(n.level),
                ))
            })
            .collect();

        Paragraph::new(lines)
            .block(styles::panel_block("Notices", false))
            .render(area, buf);
    }
}
