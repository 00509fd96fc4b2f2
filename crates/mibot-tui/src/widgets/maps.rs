//! Maps tab: read-only list of the maps stored on the robot.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget};

use mibot_app::state::AppState;

use crate::theme::styles;

pub struct MapsPanel<'a> {
    state: &'a AppState,
}

impl<'a> MapsPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn placeholder(&self) -> Option<Line<'static>> {
        let maps = &self.state.maps;
        if maps.loading {
            return Some(Line::from(Span::styled(
                "Loading maps...",
                styles::text_muted(),
            )));
        }
        if let Some(err) = &maps.error {
            return Some(Line::from(Span::styled(
                err.clone(),
                styles::notice_style(mibot_core::notice::NoticeLevel::Error),
            )));
        }
        if maps.entries.is_empty() {
            return Some(Line::from(Span::styled(
                "No maps found on robot",
                styles::text_muted(),
            )));
        }
        None
    }
}

impl Widget for MapsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::panel_block("Maps", true);

        if let Some(line) = self.placeholder() {
            Paragraph::new(line).block(block).render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .maps
            .entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.name.clone(), styles::text_secondary()),
                    Span::styled(format!("  [{}]", entry.id), styles::text_muted()),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.map_cursor));
        StatefulWidget::render(
            List::new(items)
                .block(block)
                .highlight_style(styles::accent()),
            area,
            buf,
            &mut list_state,
        );
    }
}
