//! Status slice handlers: apply fetch results, discard stale generations,
//! and keep the conditional pollers in sync with their governing state.

use tracing::{debug, warn};

use mibot_core::notice::Notice;
use mibot_core::status::{
    BatteryStatus, ConnectionStatus, CurrentMapInfo, EmergencyStatus, MapEntry, RobotStatus,
    StorageStatus,
};

use crate::message::StatusKind;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// Reconcile the conditional pollers with the state that governs them.
///
/// Battery polls iff the robot is found; current-map polls iff navigation
/// is active. Stopping a poller bumps its generation so any in-flight
/// result is discarded on arrival, and stopping the current-map poller
/// clears the slice immediately rather than waiting for anything.
///
/// Called after every state change that can move `robot.found`,
/// `robot.connected`, or `nav_running`.
pub(crate) fn sync_pollers(state: &mut AppState) -> Vec<UpdateAction> {
    let mut actions = Vec::new();

    let want_battery = state.robot.found;
    if want_battery && !state.battery_poll_active {
        state.battery_poll_active = true;
        actions.push(UpdateAction::StartBatteryPolling {
            generation: state.battery_generation,
        });
    } else if !want_battery && state.battery_poll_active {
        state.battery_poll_active = false;
        state.battery_generation += 1;
        actions.push(UpdateAction::StopBatteryPolling);
    }

    let want_map = state.navigation_active();
    if want_map && !state.map_poll_active {
        state.map_poll_active = true;
        actions.push(UpdateAction::StartCurrentMapPolling {
            generation: state.map_generation,
        });
    } else if !want_map && state.map_poll_active {
        state.map_poll_active = false;
        state.map_generation += 1;
        state.current_map = CurrentMapInfo::cleared();
        actions.push(UpdateAction::StopCurrentMapPolling);
    }

    actions
}

/// A fetch went in flight: mark the slice loading. Generation-tagged kinds
/// are ignored when the tag is stale.
pub(crate) fn handle_refresh_started(
    state: &mut AppState,
    kind: StatusKind,
    generation: u64,
) -> UpdateResult {
    match kind {
        StatusKind::Network => state.connection.loading = true,
        StatusKind::Robot => state.robot.loading = true,
        StatusKind::Comprehensive => {}
        StatusKind::Battery => {
            if generation == state.battery_generation {
                state.battery.loading = true;
            }
        }
        StatusKind::Storage => state.storage.loading = true,
        StatusKind::Emergency => state.emergency.loading = true,
        StatusKind::CurrentMap => {
            if generation == state.map_generation {
                state.current_map.loading = true;
            }
        }
        StatusKind::Maps => state.maps.loading = true,
    }
    UpdateResult::none()
}

/// Network status arrived. A false→true edge on `connected` triggers the
/// comprehensive status fetch, which refreshes the robot slice too.
pub(crate) fn handle_network_loaded(
    state: &mut AppState,
    result: Result<ConnectionStatus, String>,
) -> UpdateResult {
    let was_connected = state.connection.connected;
    state.connection = match result {
        Ok(status) => status,
        Err(message) => {
            debug!("network status fetch failed: {message}");
            ConnectionStatus::unknown()
        }
    };

    if !was_connected && state.connection.connected {
        UpdateResult::action(UpdateAction::FetchStatus(StatusKind::Comprehensive))
    } else {
        UpdateResult::none()
    }
}

/// Robot discovery arrived; surfaces found / not-found / error notices.
pub(crate) fn handle_robot_discovered(
    state: &mut AppState,
    result: Result<RobotStatus, String>,
) -> UpdateResult {
    match result {
        Ok(status) => {
            if status.found {
                let where_at = status.ip.as_deref().unwrap_or("unknown address");
                state.push_notice(Notice::success(format!("Robot found at {where_at}")));
            } else {
                state.push_notice(Notice::warning("Robot not found on the network"));
            }
            state.robot = status;
        }
        Err(message) => {
            state.push_notice(Notice::error(message));
            state.robot = RobotStatus::lost();
        }
    }
    UpdateResult::actions(sync_pollers(state))
}

/// Comprehensive status refreshes connection and robot slices together.
/// Failures change nothing; the next trigger retries.
pub(crate) fn handle_comprehensive_loaded(
    state: &mut AppState,
    result: Result<(ConnectionStatus, RobotStatus), String>,
) -> UpdateResult {
    match result {
        Ok((connection, robot)) => {
            state.connection = connection;
            state.robot = robot;
            UpdateResult::actions(sync_pollers(state))
        }
        Err(message) => {
            debug!("comprehensive status fetch failed: {message}");
            UpdateResult::none()
        }
    }
}

/// Battery poll result; stale generations are dropped.
pub(crate) fn handle_battery_loaded(
    state: &mut AppState,
    generation: u64,
    status: BatteryStatus,
) -> UpdateResult {
    if generation != state.battery_generation {
        debug!("discarding stale battery reading (generation {generation})");
        return UpdateResult::none();
    }
    state.battery = status;
    UpdateResult::none()
}

pub(crate) fn handle_storage_loaded(state: &mut AppState, status: StorageStatus) -> UpdateResult {
    state.storage = status;
    UpdateResult::none()
}

pub(crate) fn handle_emergency_loaded(
    state: &mut AppState,
    status: EmergencyStatus,
) -> UpdateResult {
    let was_triggered = state.emergency.state.is_triggered();
    if !was_triggered && status.state.is_triggered() {
        warn!("emergency stop engaged; locking out the console");
    }
    state.emergency = status;
    UpdateResult::none()
}

/// Current-map poll result; stale generations are dropped, which is what
/// keeps the slice empty when a poll was in flight as navigation stopped.
pub(crate) fn handle_current_map_loaded(
    state: &mut AppState,
    generation: u64,
    info: CurrentMapInfo,
) -> UpdateResult {
    if generation != state.map_generation {
        debug!("discarding stale current-map info (generation {generation})");
        return UpdateResult::none();
    }
    state.current_map = info;
    UpdateResult::none()
}

/// Map list for the Maps / Map Stitch tabs.
pub(crate) fn handle_maps_loaded(
    state: &mut AppState,
    result: Result<Vec<MapEntry>, String>,
) -> UpdateResult {
    match result {
        Ok(entries) => {
            state.maps.entries = entries;
            state.maps.error = None;
        }
        Err(message) => {
            state.maps.entries.clear();
            state.maps.error = Some(message);
        }
    }
    state.maps.loading = false;
    state.clamp_map_cursor();
    UpdateResult::none()
}

/// Follow-up for the bootstrap message: one-shot network fetch plus the two
/// unconditional pollers. An explicit robot IP from the CLI is pushed to
/// the backend before anything else so discovery can skip the subnet scan.
pub(crate) fn handle_bootstrap(robot_ip: Option<String>) -> UpdateResult {
    let mut actions = Vec::new();
    if let Some(ip) = robot_ip {
        actions.push(UpdateAction::DispatchCommand(
            crate::message::CommandRequest::SetRobotIp {
                ip,
                port: crate::settings::DEFAULT_ROBOT_PORT,
            },
        ));
    }
    actions.push(UpdateAction::FetchStatus(StatusKind::Network));
    actions.push(UpdateAction::StartStoragePolling);
    actions.push(UpdateAction::StartEmergencyPolling);
    UpdateResult::actions(actions)
}
