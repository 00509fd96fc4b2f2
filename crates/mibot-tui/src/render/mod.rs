//! Main render/view function (View in TEA pattern)


use ratatui::Frame;

use mibot_app::state::{AppState, Tab};

use crate::layout;
use crate::widgets::{
    EmergencyOverlay, HomePanel, MapsPanel, NoticeBar, StatusCards, StitchPanel, TabBar,
};

/// Render the complete UI (View function in TEA)
pub fn draw(frame: &mut Frame, state: &AppState) {
    let areas = layout::screen_areas(frame.area());

    frame.render_widget(StatusCards::new(state), areas.header);
    frame.render_widget(TabBar::new(state), areas.tabs);

    match state.tab {
        Tab::Home => frame.render_widget(HomePanel::new(state), areas.body),
        Tab::Maps => frame.render_widget(MapsPanel::new(state), areas.body),
        Tab::MapStitch => frame.render_widget(StitchPanel::new(state), areas.body),
    }

    frame.render_widget(NoticeBar::new(state), areas.notices);

    // The lock-out overlay renders last so it covers everything; input is
    // already filtered at the key handler.
    if state.locked_out() {
        frame.render_widget(EmergencyOverlay, frame.area());
    }
}
