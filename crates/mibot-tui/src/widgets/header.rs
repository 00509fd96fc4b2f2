//! Status header cards: battery, network, robot, storage.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use mibot_app::state::AppState;

use crate::theme::styles;

/// The four telemetry cards across the top of the dashboard.
pub struct StatusCards<'a> {
    state: &'a AppState,
}

impl<'a> StatusCards<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn battery_lines(&self) -> Vec<Line<'static>> {
        let battery = &self.state.battery;
        let gauge = match battery.battery {
            Some(p) => format!("{p}%"),
            None if battery.loading => "...".to_string(),
            None => "N/A".to_string(),
        };
        let charging = match battery.charging {
            Some(c) => c.label(),
            None => "—",
        };
        let mut lines = vec![
            Line::from(Span::styled(gauge, styles::battery_style(battery.battery))),
            Line::from(Span::styled(
                charging.to_string(),
                styles::charging_style(battery.charging),
            )),
        ];
        if let Some(err) = &battery.error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                styles::notice_style(mibot_core::notice::NoticeLevel::Error),
            )));
        }
        lines
    }

    fn network_lines(&self) -> Vec<Line<'static>> {
        let net = &self.state.connection;
        if net.loading {
            return vec![Line::from(Span::styled("Checking...", styles::text_muted()))];
        }
        if net.connected {
            vec![
                Line::from(Span::styled(
                    net.network_name.clone().unwrap_or_else(|| "Wi-Fi".into()),
                    styles::connection_style(true),
                )),
                Line::from(Span::styled(
                    net.device_ip.clone().unwrap_or_default(),
                    styles::text_secondary(),
                )),
            ]
        } else {
            vec![Line::from(Span::styled(
                "Not Connected",
                styles::connection_style(false),
            ))]
        }
    }

    fn robot_lines(&self) -> Vec<Line<'static>> {
        let robot = &self.state.robot;
        if robot.loading {
            return vec![Line::from(Span::styled(
                "Discovering...",
                styles::text_muted(),
            ))];
        }
        let style = styles::robot_style(robot.connected, robot.found);
        let mut lines = vec![Line::from(Span::styled(
            styles::robot_label(robot.connected, robot.found),
            style,
        ))];
        if let Some(ip) = &robot.ip {
            lines.push(Line::from(Span::styled(ip.clone(), styles::text_secondary())));
        }
        lines
    }

    fn storage_lines(&self) -> Vec<Line<'static>> {
        let storage = &self.state.storage;
        if storage.loading && storage.total.is_none() {
            return vec![Line::from(Span::styled("Loading...", styles::text_muted()))];
        }
        if let Some(err) = &storage.error {
            return vec![Line::from(Span::styled(
                err.clone(),
                styles::notice_style(mibot_core::notice::NoticeLevel::Error),
            ))];
        }
        let used = storage
            .percent
            .clone()
            .unwrap_or_else(|| "?".into());
        let detail = match (&storage.total, &storage.free) {
            (Some(total), Some(free)) => format!("Total {total} | Free {free}"),
            _ => String::new(),
        };
        vec![
            Line::from(Span::styled(format!("Used {used}"), styles::accent())),
            Line::from(Span::styled(detail, styles::text_secondary())),
        ]
    }
}

impl Widget for StatusCards<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [battery, network, robot, storage] = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .areas(area);

        Paragraph::new(self.battery_lines())
            .block(styles::panel_block("Battery", false))
            .render(battery, buf);
        Paragraph::new(self.network_lines())
            .block(styles::panel_block("Network", false))
            .render(network, buf);
        Paragraph::new(self.robot_lines())
            .block(styles::panel_block("Robot", false))
            .render(robot, buf);
        Paragraph::new(self.storage_lines())
            .block(styles::panel_block("Storage", false))
            .render(storage, buf);
    }
}
