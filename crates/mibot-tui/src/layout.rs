//! Screen layout

use ratatui::layout::{Constraint, Layout, Rect};

/// Resolved screen areas for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Status header cards (battery / network / robot / storage)
    pub header: Rect,
    /// Tab bar with the run indicator
    pub tabs: Rect,
    /// Active tab body
    pub body: Rect,
    /// Notice bar at the bottom
    pub notices: Rect,
}

/// Split the terminal into the fixed dashboard regions.
pub fn screen_areas(area: Rect) -> ScreenAreas {
    let [header, tabs, body, notices] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(4),
    ])
    .areas(area);

    ScreenAreas {
        header,
        tabs,
        body,
        notices,
    }
}
