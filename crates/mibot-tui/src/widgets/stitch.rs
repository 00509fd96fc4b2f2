//! Map Stitch tab: staged composition on top, selectable map grid below.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget};

use mibot_app::state::AppState;

use crate::theme::styles;

pub struct StitchPanel<'a> {
    state: &'a AppState,
}

impl<'a> StitchPanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// The staged composition: selected maps chained in selection order.
    fn staged_line(&self) -> Line<'static> {
        if self.state.selected_maps.is_empty() {
            return Line::from(Span::styled(
                "Please select maps first",
                styles::text_muted(),
            ));
        }
        let mut spans = Vec::new();
        for (i, map) in self.state.selected_maps.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ⇢ ", styles::text_muted()));
            }
            spans.push(Span::styled(
                format!("{} ", map.art.glyph),
                styles::map_art_style(map.art),
            ));
            spans.push(Span::styled(map.name.clone(), styles::text_secondary()));
        }
        Line::from(spans)
    }

    fn job_line(&self) -> Line<'static> {
        if self.state.stitch_job.is_empty() {
            Line::from(Span::styled(
                "No stitched job staged  (t: stitch, x: execute)",
                styles::text_muted(),
            ))
        } else {
            Line::from(vec![
                Span::styled("Staged job: ", styles::text_secondary()),
                Span::styled(
                    self.state.stitch_job.join(" → "),
                    styles::accent().add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (x: execute)", styles::text_muted()),
            ])
        }
    }

    fn grid_items(&self) -> Vec<ListItem<'static>> {
        self.state
            .maps
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let art = (self.state.art_resolver)(idx);
                let mut spans = vec![
                    Span::styled(format!("{} ", art.glyph), styles::map_art_style(art)),
                    Span::styled(entry.name.clone(), styles::text_secondary()),
                    Span::styled(format!("  [{}]", entry.id), styles::text_muted()),
                ];
                if let Some(pos) = self.state.selection_position(&entry.id) {
                    spans.push(Span::styled(
                        format!("  #{pos}"),
                        styles::accent().add_modifier(Modifier::BOLD),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    }

    fn grid_placeholder(&self) -> Option<Line<'static>> {
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

impl Widget for StitchPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [staged_area, grid_area] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(4)]).areas(area);

        Paragraph::new(vec![self.staged_line(), self.job_line()])
            .block(styles::panel_block("Stitch Composition", false))
            .render(staged_area, buf);

        let block = styles::panel_block(
            "Map List  (enter: select, a: all, A: none, t: stitch)",
            true,
        );
        if let Some(line) = self.grid_placeholder() {
            Paragraph::new(line).block(block).render(grid_area, buf);
            return;
        }

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.map_cursor));
        StatefulWidget::render(
            List::new(self.grid_items())
                .block(block)
                .highlight_style(styles::accent().add_modifier(Modifier::REVERSED)),
            grid_area,
            buf,
            &mut list_state,
        );
    }
}
