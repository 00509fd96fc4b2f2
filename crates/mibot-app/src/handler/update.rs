//! Main update function - handles state transitions (TEA pattern)

use mibot_core::notice::Notice;

use crate::message::Message;
use crate::state::{AppState, ConsolePhase};

use super::{command, keys, status, UpdateAction, UpdateResult};

/// Process a message and update state.
/// Returns optional follow-up message and/or actions for the runtime.
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = ConsolePhase::Quitting;
            UpdateResult::none()
        }

        Message::ReloadApp => {
            // The emergency overlay is dismissed only through a full
            // rebuild; the runner watches for this phase.
            state.phase = ConsolePhase::ReloadRequested;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = keys::handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.prune_notices();
            UpdateResult::none()
        }

        Message::Bootstrap { robot_ip } => status::handle_bootstrap(robot_ip),

        // ─────────────────────────────────────────────────────────
        // Tabs
        // ─────────────────────────────────────────────────────────
        Message::SwitchTab(tab) => {
            state.tab = tab;
            if tab.wants_maps() {
                state.maps.loading = true;
                state.maps.entries.clear();
                state.maps.error = None;
                UpdateResult::action(UpdateAction::FetchStatus(
                    crate::message::StatusKind::Maps,
                ))
            } else {
                UpdateResult::none()
            }
        }

        Message::NextTab => UpdateResult::message(Message::SwitchTab(state.tab.next())),

        // ─────────────────────────────────────────────────────────
        // Manual status refreshes
        // ─────────────────────────────────────────────────────────
        Message::RefreshNetwork => {
            state.push_notice(Notice::info("Refreshing network status..."));
            UpdateResult::action(UpdateAction::FetchStatus(
                crate::message::StatusKind::Network,
            ))
        }

        Message::DiscoverRobot => UpdateResult::action(UpdateAction::FetchStatus(
            crate::message::StatusKind::Robot,
        )),

        // ─────────────────────────────────────────────────────────
        // Commands
        // ─────────────────────────────────────────────────────────
        Message::ToggleRun => command::handle_toggle_run(state),

        Message::Command(kind) => command::handle_command(state, kind),

        Message::CommandFinished { command, outcome } => {
            command::handle_command_finished(state, command, outcome)
        }

        // ─────────────────────────────────────────────────────────
        // Map selection workflow
        // ─────────────────────────────────────────────────────────
        Message::MapCursorNext => {
            let len = state.maps.entries.len();
            if len > 0 {
                state.map_cursor = (state.map_cursor + 1) % len;
            }
            UpdateResult::none()
        }

        Message::MapCursorPrev => {
            let len = state.maps.entries.len();
            if len > 0 {
                state.map_cursor = (state.map_cursor + len - 1) % len;
            }
            UpdateResult::none()
        }

        Message::ToggleSelectAtCursor => {
            state.toggle_select(state.map_cursor);
            UpdateResult::none()
        }

        Message::SelectAll => {
            state.select_all();
            UpdateResult::none()
        }

        Message::DeselectAll => {
            state.deselect_all();
            UpdateResult::none()
        }

        Message::Stitch => {
            if state.selected_maps.is_empty() {
                state.stitch_job.clear();
                state.push_notice(Notice::error("No map selected for stitching"));
            } else {
                state.stitch_job = state.selected_maps.iter().map(|m| m.id.clone()).collect();
                state.push_notice(Notice::success("Map stitched"));
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Fetch lifecycle
        // ─────────────────────────────────────────────────────────
        Message::RefreshStarted { kind, generation } => {
            status::handle_refresh_started(state, kind, generation)
        }

        Message::NetworkStatusLoaded(result) => status::handle_network_loaded(state, result),

        Message::RobotDiscovered(result) => status::handle_robot_discovered(state, result),

        Message::ComprehensiveStatusLoaded(result) => {
            status::handle_comprehensive_loaded(state, result)
        }

        Message::BatteryStatusLoaded { generation, status } => {
            status::handle_battery_loaded(state, generation, status)
        }

        Message::StorageStatusLoaded(s) => status::handle_storage_loaded(state, s),

        Message::EmergencyStatusLoaded(s) => status::handle_emergency_loaded(state, s),

        Message::CurrentMapInfoLoaded { generation, info } => {
            status::handle_current_map_loaded(state, generation, info)
        }

        Message::MapsLoaded(result) => status::handle_maps_loaded(state, result),
    }
}
