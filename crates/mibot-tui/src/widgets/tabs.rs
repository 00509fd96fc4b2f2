//! Tab bar with the run indicator and dock/undock hint.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs, Widget};

use mibot_app::state::{AppState, Tab};
use mibot_core::status::ChargingState;

use crate::theme::styles;

pub struct TabBar<'a> {
    state: &'a AppState,
}

impl<'a> TabBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn right_side(&self) -> Line<'static> {
        let (run_label, run_style) = styles::run_indicator(self.state.nav_running);
        let dock_hint = if self.state.battery.charging == Some(ChargingState::Docked) {
            "G:undock"
        } else {
            "g:dock"
        };
        Line::from(vec![
            Span::styled(run_label, run_style),
            Span::raw("  "),
            Span::styled(
                format!("space:run  {dock_hint}  e:emergency  m:maps  Q:quit-nav"),
                styles::text_muted(),
            ),
        ])
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [tabs_area, status_area] =
            Layout::horizontal([Constraint::Min(30), Constraint::Length(52)]).areas(area);

        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|t| Line::from(t.title()))
            .collect();
        Tabs::new(titles)
            .select(self.state.tab.index())
            .style(styles::text_secondary())
            .highlight_style(styles::accent().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
            .block(styles::panel_block("", false))
            .render(tabs_area, buf);

        Paragraph::new(self.right_side())
            .block(styles::panel_block("", false))
            .render(status_area, buf);
    }
}
