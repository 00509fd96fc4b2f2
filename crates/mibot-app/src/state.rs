//! Application state (Model in TEA pattern)

use std::collections::VecDeque;
use std::time::Duration;

use mibot_core::notice::Notice;
use mibot_core::status::{
    BatteryStatus, ConnectionStatus, CurrentMapInfo, EmergencyStatus, MapArt, MapEntry,
    RobotStatus, SelectedMap, StorageStatus,
};

/// Most notices kept in the bar at once; older ones fall off.
const MAX_NOTICES: usize = 6;

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsolePhase {
    /// Normal interactive operation
    #[default]
    Running,

    /// Emergency overlay reload key pressed: the runner tears the whole
    /// model down, rebuilds it, and restarts every poller
    ReloadRequested,

    /// Exiting the console
    Quitting,
}

/// The three dashboard tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Maps,
    MapStitch,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Maps => "Maps",
            Tab::MapStitch => "Map Stitch",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Maps,
            Tab::Maps => Tab::MapStitch,
            Tab::MapStitch => Tab::Home,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Maps => 1,
            Tab::MapStitch => 2,
        }
    }

    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Maps, Tab::MapStitch];

    /// Whether activating this tab refreshes the map list.
    pub fn wants_maps(&self) -> bool {
        matches!(self, Tab::Maps | Tab::MapStitch)
    }
}

/// Map list slice for the Maps / Map Stitch tabs.
#[derive(Debug, Clone, Default)]
pub struct MapsTab {
    pub loading: bool,
    pub entries: Vec<MapEntry>,
    pub error: Option<String>,
}

/// Resolver producing placeholder art for a map at a given list index.
///
/// Injected so a real thumbnail source can replace the placeholder palette
/// without touching the selection workflow.
pub type MapArtResolver = fn(usize) -> MapArt;

/// Fixed placeholder tile palette, cycled by list index.
const ART_PALETTE: [char; 4] = ['▤', '▥', '▦', '▧'];

/// Default art resolver: cycle the placeholder palette by index.
pub fn placeholder_art(index: usize) -> MapArt {
    let palette_index = index % ART_PALETTE.len();
    MapArt {
        palette_index,
        glyph: ART_PALETTE[palette_index],
    }
}

/// The whole console model. One writer: `handler::update()`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: ConsolePhase,
    pub tab: Tab,

    // Status slices, each owned by exactly one fetch path
    pub connection: ConnectionStatus,
    pub robot: RobotStatus,
    pub battery: BatteryStatus,
    pub storage: StorageStatus,
    pub emergency: EmergencyStatus,
    pub current_map: CurrentMapInfo,
    pub maps: MapsTab,

    // Map selection workflow
    pub selected_maps: Vec<SelectedMap>,
    pub stitch_job: Vec<String>,
    pub map_cursor: usize,
    pub art_resolver: MapArtResolver,

    // Navigation / command state
    /// The internal running flag ("isbutton"): true while a stitched route
    /// is believed to be executing.
    pub nav_running: bool,
    pub relocate_in_flight: bool,
    pub force_relocate_in_flight: bool,

    // Poller bookkeeping (the timers themselves live in the runtime)
    pub battery_poll_active: bool,
    pub battery_generation: u64,
    pub map_poll_active: bool,
    pub map_generation: u64,

    // Operator feedback
    pub notices: VecDeque<Notice>,
    pub notice_ttl: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: ConsolePhase::Running,
            tab: Tab::Home,
            connection: ConnectionStatus::default(),
            robot: RobotStatus::default(),
            battery: BatteryStatus::default(),
            storage: StorageStatus::default(),
            emergency: EmergencyStatus::default(),
            current_map: CurrentMapInfo::cleared(),
            maps: MapsTab::default(),
            selected_maps: Vec::new(),
            stitch_job: Vec::new(),
            map_cursor: 0,
            art_resolver: placeholder_art,
            nav_running: false,
            relocate_in_flight: false,
            force_relocate_in_flight: false,
            battery_poll_active: false,
            battery_generation: 0,
            map_poll_active: false,
            map_generation: 0,
            notices: VecDeque::new(),
            notice_ttl: Duration::from_millis(3_000),
        }
    }

    /// Swap in a different art resolver (e.g. real thumbnails).
    pub fn with_art_resolver(mut self, resolver: MapArtResolver) -> Self {
        self.art_resolver = resolver;
        self
    }

    pub fn should_quit(&self) -> bool {
        self.phase == ConsolePhase::Quitting
    }

    /// Navigation is active while the robot is reachable and a stitched
    /// route is believed to be running.
    pub fn navigation_active(&self) -> bool {
        self.robot.connected && self.nav_running
    }

    /// Whether the emergency lock-out overlay blocks all interaction.
    pub fn locked_out(&self) -> bool {
        self.emergency.state.is_triggered()
    }

    // ─────────────────────────────────────────────────────────
    // Notices
    // ─────────────────────────────────────────────────────────

    pub fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    /// Drop notices past their display window. Called on every tick.
    pub fn prune_notices(&mut self) {
        let ttl = self.notice_ttl;
        self.notices.retain(|n| !n.is_expired(ttl));
    }

    // ─────────────────────────────────────────────────────────
    // Map selection workflow
    // ─────────────────────────────────────────────────────────

    /// Toggle a map in/out of the selection. Adding appends at the end
    /// (selection order = stitch order); re-toggling the same id removes it
    /// and restores the prior order, making the operation its own inverse.
    pub fn toggle_select(&mut self, index: usize) {
        let Some(entry) = self.maps.entries.get(index) else {
            return;
        };
        if let Some(pos) = self.selected_maps.iter().position(|m| m.id == entry.id) {
            self.selected_maps.remove(pos);
        } else {
            self.selected_maps.push(SelectedMap {
                id: entry.id.clone(),
                art: (self.art_resolver)(index),
                name: entry.name.clone(),
            });
        }
    }

    /// Replace the selection with the full map list, in list order.
    pub fn select_all(&mut self) {
        self.selected_maps = self
            .maps
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| SelectedMap {
                id: entry.id.clone(),
                art: (self.art_resolver)(idx),
                name: entry.name.clone(),
            })
            .collect();
    }

    pub fn deselect_all(&mut self) {
        self.selected_maps.clear();
    }

    /// 1-based position of a map in the selection, for the grid badge.
    pub fn selection_position(&self, id: &str) -> Option<usize> {
        self.selected_maps
            .iter()
            .position(|m| m.id == id)
            .map(|p| p + 1)
    }

    /// Keep the cursor on a valid entry after the map list changes.
    pub fn clamp_map_cursor(&mut self) {
        if self.maps.entries.is_empty() {
            self.map_cursor = 0;
        } else if self.map_cursor >= self.maps.entries.len() {
            self.map_cursor = self.maps.entries.len() - 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mibot_core::notice::Notice;

    fn state_with_maps(names: &[(&str, &str)]) -> AppState {
        let mut state = AppState::new();
        state.maps.entries = names
            .iter()
            .map(|(id, name)| MapEntry::new(*id, *name))
            .collect();
        state
    }

    #[test]
    fn test_toggle_select_is_involution() {
        let mut state = state_with_maps(&[("1", "A"), ("2", "B"), ("3", "C")]);
        state.toggle_select(0);
        state.toggle_select(2);
        let before = state.selected_maps.clone();

        state.toggle_select(1);
        state.toggle_select(1);

        assert_eq!(state.selected_maps, before);
    }

    #[test]
    fn test_selection_order_is_insertion_order() {
        let mut state = state_with_maps(&[("1", "A"), ("2", "B"), ("3", "C")]);
        state.toggle_select(2);
        state.toggle_select(0);

        let ids: Vec<&str> = state.selected_maps.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1"]);
        assert_eq!(state.selection_position("3"), Some(1));
        assert_eq!(state.selection_position("1"), Some(2));
        assert_eq!(state.selection_position("2"), None);
    }

    #[test]
    fn test_select_all_uses_list_order_and_cycles_art() {
        let mut state = state_with_maps(&[
            ("1", "A"),
            ("2", "B"),
            ("3", "C"),
            ("4", "D"),
            ("5", "E"),
        ]);
        state.select_all();

        let ids: Vec<&str> = state.selected_maps.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
        // Palette has four slots; the fifth map wraps around.
        assert_eq!(
            state.selected_maps[4].art.palette_index,
            state.selected_maps[0].art.palette_index
        );
    }

    #[test]
    fn test_navigation_active_requires_connection() {
        let mut state = AppState::new();
        state.nav_running = true;
        assert!(!state.navigation_active());

        state.robot = RobotStatus::resolve(true, None, None, true);
        assert!(state.navigation_active());
    }

    #[test]
    fn test_notice_ring_is_bounded() {
        let mut state = AppState::new();
        for i in 0..10 {
            state.push_notice(Notice::info(format!("n{i}")));
        }
        assert_eq!(state.notices.len(), MAX_NOTICES);
        assert_eq!(state.notices.front().unwrap().text, "n4");
    }

    #[test]
    fn test_clamp_map_cursor() {
        let mut state = state_with_maps(&[("1", "A"), ("2", "B")]);
        state.map_cursor = 5;
        state.clamp_map_cursor();
        assert_eq!(state.map_cursor, 1);

        state.maps.entries.clear();
        state.clamp_map_cursor();
        assert_eq!(state.map_cursor, 0);
    }

    #[test]
    fn test_placeholder_art_cycles() {
        assert_eq!(placeholder_art(0).palette_index, 0);
        assert_eq!(placeholder_art(4).palette_index, 0);
        assert_eq!(placeholder_art(6).palette_index, 2);
    }
}
