//! Home tab: live navigation panel.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use mibot_app::state::AppState;

use crate::theme::styles;

pub struct HomePanel<'a> {
    state: &'a AppState,
}

impl<'a> HomePanel<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn robot_lines(&self) -> Vec<Line<'static>> {
        let robot = &self.state.robot;
        let connected_line = if robot.connected {
            Span::styled("● Connected", styles::connection_style(true))
        } else {
            Span::styled("● Disconnected", styles::connection_style(false))
        };
        vec![
            Line::from(Span::styled("MiBOT", styles::accent())),
            Line::from(Span::styled(
                format!(
                    "Connected IP: {}",
                    robot.ip.clone().unwrap_or_else(|| "—".into())
                ),
                styles::text_secondary(),
            )),
            Line::from(connected_line),
        ]
    }

    fn live_map_lines(&self) -> Vec<Line<'static>> {
        let info = &self.state.current_map;
        let mut lines = Vec::new();

        if info.loading && info.is_empty() {
            lines.push(Line::from(Span::styled("Loading...", styles::text_muted())));
            return lines;
        }
        if let Some(err) = &info.error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                styles::notice_style(mibot_core::notice::NoticeLevel::Error),
            )));
            return lines;
        }
        if info.is_empty() {
            lines.push(Line::from(Span::styled(
                "No active navigation",
                styles::text_muted(),
            )));
            return lines;
        }

        lines.push(Line::from(vec![
            Span::styled("Live map: ", styles::text_secondary()),
            Span::styled(
                info.current_map_name.clone().unwrap_or_else(|| "—".into()),
                styles::connection_style(true),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "ID: {}",
                info.current_map_id.clone().unwrap_or_else(|| "—".into())
            ),
            styles::text_muted(),
        )));
        for (n, id, name) in [
            (1, &info.upcoming_map_id_1, &info.upcoming_map_name_1),
            (2, &info.upcoming_map_id_2, &info.upcoming_map_name_2),
        ] {
            lines.push(Line::from(Span::styled(
                format!(
                    "Upcoming {n}: {} ({})",
                    name.clone().unwrap_or_else(|| "None".into()),
                    id.clone().unwrap_or_else(|| "None".into()),
                ),
                styles::text_secondary(),
            )));
        }
        lines
    }

    fn relocation_lines(&self) -> Vec<Line<'static>> {
        let relocate = if self.state.relocate_in_flight {
            Span::styled("Relocating...", styles::accent())
        } else {
            Span::styled("r: relocate", styles::text_muted())
        };
        let force = if self.state.force_relocate_in_flight {
            Span::styled("Force relocating...", styles::accent())
        } else {
            Span::styled("R: force relocate", styles::text_muted())
        };
        vec![
            Line::from(relocate),
            Line::from(force),
            Line::from(Span::styled("n: refresh network   d: discover robot", styles::text_muted())),
        ]
    }
}

impl Widget for HomePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [robot_area, map_area, actions_area] = Layout::horizontal([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .areas(area);

        Paragraph::new(self.robot_lines())
            .block(styles::panel_block("Robot", true))
            .render(robot_area, buf);
        Paragraph::new(self.live_map_lines())
            .block(styles::panel_block("Route", false))
            .render(map_area, buf);
        Paragraph::new(self.relocation_lines())
            .block(styles::panel_block("Actions", false))
            .render(actions_area, buf);
    }
}
