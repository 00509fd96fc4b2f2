//! Tests for handler module

use super::*;
use crate::input_key::InputKey;
use crate::message::{CommandKind, CommandOutcome, CommandRequest, Message, StatusKind};
use crate::state::{AppState, ConsolePhase, Tab};
use mibot_core::notice::NoticeLevel;
use mibot_core::status::{
    BatteryStatus, ChargingState, CurrentMapInfo, EmergencyState, EmergencyStatus, MapEntry,
    RobotStatus,
};

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

/// State with the robot discovered and reachable.
fn connected_state() -> AppState {
    let mut state = AppState::new();
    process(
        &mut state,
        Message::RobotDiscovered(Ok(RobotStatus::resolve(
            true,
            Some("10.0.0.7".into()),
            Some("lab".into()),
            true,
        ))),
    );
    state.notices.clear();
    state
}

fn with_maps(mut state: AppState, maps: &[(&str, &str)]) -> AppState {
    state.maps.entries = maps
        .iter()
        .map(|(id, name)| MapEntry::new(*id, *name))
        .collect();
    state
}

/// Run a message and all its follow-ups, collecting every action.
fn process(state: &mut AppState, message: Message) -> Vec<UpdateAction> {
    let mut actions = Vec::new();
    let mut msg = Some(message);
    while let Some(m) = msg {
        let mut result = update(state, m);
        actions.append(&mut result.actions);
        msg = result.message;
    }
    actions
}

fn dispatched(actions: &[UpdateAction]) -> Vec<&CommandRequest> {
    actions
        .iter()
        .filter_map(|a| match a {
            UpdateAction::DispatchCommand(req) => Some(req),
            _ => None,
        })
        .collect()
}

fn last_notice_level(state: &AppState) -> Option<NoticeLevel> {
    state.notices.back().map(|n| n.level)
}

fn has_warning(state: &AppState, text: &str) -> bool {
    state
        .notices
        .iter()
        .any(|n| n.level == NoticeLevel::Warning && n.text == text)
}

// ─────────────────────────────────────────────────────────
// Lifecycle
// ─────────────────────────────────────────────────────────

#[test]
fn test_quit_message_sets_quitting_phase() {
    let mut state = AppState::new();
    update(&mut state, Message::Quit);
    assert_eq!(state.phase, ConsolePhase::Quitting);
    assert!(state.should_quit());
}

#[test]
fn test_q_key_quits() {
    let state = AppState::new();
    assert!(matches!(
        handle_key(&state, InputKey::Char('q')),
        Some(Message::Quit)
    ));
    assert!(matches!(
        handle_key(&state, InputKey::CharCtrl('c')),
        Some(Message::Quit)
    ));
}

#[test]
fn test_bootstrap_starts_unconditional_pollers() {
    let mut state = AppState::new();
    let actions = process(&mut state, Message::Bootstrap { robot_ip: None });
    assert_eq!(
        actions,
        vec![
            UpdateAction::FetchStatus(StatusKind::Network),
            UpdateAction::StartStoragePolling,
            UpdateAction::StartEmergencyPolling,
        ]
    );
}

#[test]
fn test_bootstrap_with_robot_ip_pushes_override_first() {
    let mut state = AppState::new();
    let actions = process(
        &mut state,
        Message::Bootstrap {
            robot_ip: Some("10.0.0.7".into()),
        },
    );
    assert_eq!(
        actions[0],
        UpdateAction::DispatchCommand(CommandRequest::SetRobotIp {
            ip: "10.0.0.7".into(),
            port: 5000,
        })
    );
}

// ─────────────────────────────────────────────────────────
// Emergency lock-out
// ─────────────────────────────────────────────────────────

#[test]
fn test_emergency_triggered_locks_out() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::EmergencyStatusLoaded(EmergencyStatus::ok(EmergencyState::Triggered)),
    );
    assert!(state.locked_out());

    update(
        &mut state,
        Message::EmergencyStatusLoaded(EmergencyStatus::ok(EmergencyState::Normal)),
    );
    assert!(!state.locked_out());
}

#[test]
fn test_lockout_swallows_command_keys() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::EmergencyStatusLoaded(EmergencyStatus::ok(EmergencyState::Triggered)),
    );

    for key in [
        InputKey::Char(' '),
        InputKey::Char('e'),
        InputKey::Char('q'),
        InputKey::Tab,
        InputKey::Enter,
    ] {
        assert!(handle_key(&state, key.clone()).is_none(), "{key:?} leaked through");
    }
}

#[test]
fn test_lockout_reload_key_requests_rebuild() {
    let mut state = AppState::new();
    update(
        &mut state,
        Message::EmergencyStatusLoaded(EmergencyStatus::ok(EmergencyState::Triggered)),
    );

    assert!(matches!(
        handle_key(&state, InputKey::Char('r')),
        Some(Message::ReloadApp)
    ));
    assert!(matches!(
        handle_key(&state, InputKey::CharCtrl('c')),
        Some(Message::Quit)
    ));

    let actions = process(&mut state, Message::ReloadApp);
    assert!(actions.is_empty());
    assert_eq!(state.phase, ConsolePhase::ReloadRequested);
}

// ─────────────────────────────────────────────────────────
// Dispatch guards
// ─────────────────────────────────────────────────────────

#[test]
fn test_gated_commands_reject_locally_while_disconnected() {
    for kind in [
        CommandKind::Stop,
        CommandKind::Resume,
        CommandKind::Execute,
        CommandKind::QuitNavigation,
        CommandKind::Relocate,
        CommandKind::ForceRelocate,
        CommandKind::Dock,
        CommandKind::Undock,
        CommandKind::RefreshMapsCache,
    ] {
        let mut state = AppState::new();
        state.stitch_job = vec!["1".into()];
        let actions = process(&mut state, Message::Command(kind));
        assert!(
            dispatched(&actions).is_empty(),
            "{kind:?} dispatched while disconnected"
        );
        assert!(
            has_warning(&state, "Robot not connected"),
            "{kind:?} missing the not-connected notice"
        );
    }
}

#[test]
fn test_emergency_exit_is_not_gated() {
    let mut state = AppState::new();
    let actions = process(&mut state, Message::Command(CommandKind::EmergencyExit));
    assert_eq!(dispatched(&actions), vec![&CommandRequest::EmergencyExit]);
}

#[test]
fn test_execute_requires_staged_job() {
    let mut state = connected_state();
    let actions = process(&mut state, Message::Command(CommandKind::Execute));
    assert!(dispatched(&actions).is_empty());
    assert!(has_warning(&state, "Stitch map and then execute"));
}

#[test]
fn test_relocate_flags_are_independent() {
    let mut state = connected_state();

    let first = process(&mut state, Message::Command(CommandKind::Relocate));
    assert_eq!(dispatched(&first), vec![&CommandRequest::Relocate]);
    assert!(state.relocate_in_flight);

    // Second press while in flight is ignored.
    let second = process(&mut state, Message::Command(CommandKind::Relocate));
    assert!(dispatched(&second).is_empty());

    // Force-relocate has its own flag and is not blocked.
    let forced = process(&mut state, Message::Command(CommandKind::ForceRelocate));
    assert_eq!(dispatched(&forced), vec![&CommandRequest::ForceRelocate]);

    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Relocate,
            outcome: CommandOutcome::ok("Relocation successful"),
        },
    );
    assert!(!state.relocate_in_flight);
    assert!(state.force_relocate_in_flight);
}

// ─────────────────────────────────────────────────────────
// Run flag (stop / resume / toggle)
// ─────────────────────────────────────────────────────────

#[test]
fn test_toggle_run_picks_stop_or_resume() {
    let mut state = connected_state();
    let actions = process(&mut state, Message::ToggleRun);
    assert_eq!(dispatched(&actions), vec![&CommandRequest::Resume]);

    let mut state = connected_state();
    state.nav_running = true;
    let actions = process(&mut state, Message::ToggleRun);
    assert_eq!(dispatched(&actions), vec![&CommandRequest::Stop]);
}

#[test]
fn test_stop_clears_run_flag_optimistically() {
    let mut state = connected_state();
    state.nav_running = true;

    let actions = process(&mut state, Message::Command(CommandKind::Stop));
    // The flag drops before any response arrives.
    assert!(!state.nav_running);
    assert_eq!(dispatched(&actions), vec![&CommandRequest::Stop]);

    // A later backend failure does not resurrect the flag.
    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Stop,
            outcome: CommandOutcome::failed("Failed to stop robot"),
        },
    );
    assert!(!state.nav_running);
}

#[test]
fn test_stop_drops_flag_even_while_disconnected() {
    let mut state = AppState::new();
    state.nav_running = true;
    let actions = process(&mut state, Message::Command(CommandKind::Stop));
    assert!(!state.nav_running);
    assert!(dispatched(&actions).is_empty());
}

#[test]
fn test_resume_outcome_drives_run_flag() {
    let mut state = connected_state();
    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Resume,
            outcome: CommandOutcome::ok("Robot navigation resumed"),
        },
    );
    assert!(state.nav_running);

    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Resume,
            outcome: CommandOutcome::failed("Failed to resume navigation"),
        },
    );
    assert!(!state.nav_running);
}

// ─────────────────────────────────────────────────────────
// Map selection workflow
// ─────────────────────────────────────────────────────────

#[test]
fn test_toggle_select_twice_restores_selection() {
    let mut state = with_maps(AppState::new(), &[("1", "A"), ("2", "B")]);
    state.tab = Tab::MapStitch;
    process(&mut state, Message::ToggleSelectAtCursor);
    let before = state.selected_maps.clone();

    state.map_cursor = 1;
    process(&mut state, Message::ToggleSelectAtCursor);
    process(&mut state, Message::ToggleSelectAtCursor);

    assert_eq!(state.selected_maps, before);
}

#[test]
fn test_select_all_keeps_list_order() {
    let mut state = with_maps(AppState::new(), &[("1", "A"), ("2", "B")]);
    process(&mut state, Message::SelectAll);
    let ids: Vec<&str> = state.selected_maps.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn test_stitch_on_empty_selection_fails_and_clears_job() {
    let mut state = AppState::new();
    state.stitch_job = vec!["stale".into()];

    process(&mut state, Message::Stitch);

    assert!(state.stitch_job.is_empty());
    assert_eq!(last_notice_level(&state), Some(NoticeLevel::Error));
}

#[test]
fn test_stitch_stages_selected_ids_in_order() {
    let mut state = with_maps(AppState::new(), &[("1", "A"), ("2", "B"), ("3", "C")]);
    state.map_cursor = 2;
    process(&mut state, Message::ToggleSelectAtCursor);
    state.map_cursor = 0;
    process(&mut state, Message::ToggleSelectAtCursor);

    process(&mut state, Message::Stitch);

    assert_eq!(state.stitch_job, vec!["3".to_string(), "1".to_string()]);
    // Stitch stages the job; the selection itself is untouched.
    assert_eq!(state.selected_maps.len(), 2);
}

#[test]
fn test_execute_dispatches_staged_ids() {
    let mut state = with_maps(connected_state(), &[("1", "A"), ("2", "B")]);
    process(&mut state, Message::SelectAll);
    process(&mut state, Message::Stitch);

    let actions = process(&mut state, Message::Command(CommandKind::Execute));
    assert_eq!(
        dispatched(&actions),
        vec![&CommandRequest::Execute {
            stitched_map_ids: vec!["1".into(), "2".into()],
        }]
    );
}

#[test]
fn test_execute_clears_job_and_selection_on_either_outcome() {
    for (outcome, expect_running) in [
        (CommandOutcome::ok("Navigation started"), true),
        (CommandOutcome::failed("Navigation failed"), false),
        (CommandOutcome::failed("Network error: timed out"), false),
    ] {
        let mut state = with_maps(connected_state(), &[("1", "A")]);
        process(&mut state, Message::SelectAll);
        process(&mut state, Message::Stitch);

        process(
            &mut state,
            Message::CommandFinished {
                command: CommandKind::Execute,
                outcome,
            },
        );

        assert!(state.stitch_job.is_empty());
        assert!(state.selected_maps.is_empty());
        assert_eq!(state.nav_running, expect_running);
    }
}

#[test]
fn test_quit_navigation_cleanup_runs_regardless_of_outcome() {
    for outcome in [
        CommandOutcome::ok("Quit command sent"),
        CommandOutcome::failed("Failed to send quit command"),
        CommandOutcome::failed("Network error: connection reset"),
    ] {
        let mut state = with_maps(connected_state(), &[("1", "A")]);
        process(&mut state, Message::SelectAll);
        process(&mut state, Message::Stitch);
        state.nav_running = true;

        process(
            &mut state,
            Message::CommandFinished {
                command: CommandKind::QuitNavigation,
                outcome,
            },
        );

        assert!(state.stitch_job.is_empty());
        assert!(state.selected_maps.is_empty());
        assert!(!state.nav_running);
    }
}

// ─────────────────────────────────────────────────────────
// Poller lifecycle
// ─────────────────────────────────────────────────────────

#[test]
fn test_battery_polling_follows_found_edges() {
    let mut state = AppState::new();

    let actions = process(
        &mut state,
        Message::RobotDiscovered(Ok(RobotStatus::resolve(true, None, None, false))),
    );
    assert!(actions.contains(&UpdateAction::StartBatteryPolling { generation: 0 }));
    assert!(state.battery_poll_active);

    // Discovering again while found must not restart the timer.
    let actions = process(
        &mut state,
        Message::RobotDiscovered(Ok(RobotStatus::resolve(true, None, None, false))),
    );
    assert!(actions.is_empty());

    let actions = process(&mut state, Message::RobotDiscovered(Ok(RobotStatus::lost())));
    assert!(actions.contains(&UpdateAction::StopBatteryPolling));
    assert!(!state.battery_poll_active);
    assert_eq!(state.battery_generation, 1);
}

#[test]
fn test_stale_battery_reading_is_discarded() {
    let mut state = AppState::new();
    process(
        &mut state,
        Message::RobotDiscovered(Ok(RobotStatus::resolve(true, None, None, false))),
    );
    process(&mut state, Message::RobotDiscovered(Ok(RobotStatus::lost())));

    // A reading from the cancelled poller's generation arrives late.
    process(
        &mut state,
        Message::BatteryStatusLoaded {
            generation: 0,
            status: BatteryStatus::ok(55, ChargingState::Charging),
        },
    );
    assert_eq!(state.battery, BatteryStatus::default());
}

#[test]
fn test_current_map_polls_only_while_navigation_active() {
    let mut state = connected_state();

    let actions = process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Resume,
            outcome: CommandOutcome::ok("Robot navigation resumed"),
        },
    );
    assert!(actions.contains(&UpdateAction::StartCurrentMapPolling { generation: 0 }));
    assert!(state.map_poll_active);

    let actions = process(&mut state, Message::Command(CommandKind::Stop));
    assert!(actions.contains(&UpdateAction::StopCurrentMapPolling));
    assert!(!state.map_poll_active);
}

#[test]
fn test_current_map_clears_instantly_and_discards_inflight_poll() {
    let mut state = connected_state();
    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Resume,
            outcome: CommandOutcome::ok("Robot navigation resumed"),
        },
    );
    process(
        &mut state,
        Message::CurrentMapInfoLoaded {
            generation: 0,
            info: CurrentMapInfo {
                current_map_id: Some("m-1".into()),
                current_map_name: Some("Warehouse".into()),
                ..CurrentMapInfo::cleared()
            },
        },
    );
    assert!(!state.current_map.is_empty());

    // Navigation stops: the slice resets that instant...
    process(&mut state, Message::Command(CommandKind::Stop));
    assert_eq!(state.current_map, CurrentMapInfo::cleared());

    // ...and the poll that was in flight lands on a stale generation.
    process(
        &mut state,
        Message::CurrentMapInfoLoaded {
            generation: 0,
            info: CurrentMapInfo {
                current_map_id: Some("m-1".into()),
                ..CurrentMapInfo::cleared()
            },
        },
    );
    assert_eq!(state.current_map, CurrentMapInfo::cleared());
}

#[test]
fn test_robot_loss_stops_current_map_polling_too() {
    let mut state = connected_state();
    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Resume,
            outcome: CommandOutcome::ok("Robot navigation resumed"),
        },
    );
    assert!(state.map_poll_active);

    let actions = process(&mut state, Message::RobotDiscovered(Ok(RobotStatus::lost())));
    assert!(actions.contains(&UpdateAction::StopCurrentMapPolling));
    assert!(actions.contains(&UpdateAction::StopBatteryPolling));
    assert!(state.current_map.is_empty());
}

// ─────────────────────────────────────────────────────────
// Status plumbing
// ─────────────────────────────────────────────────────────

#[test]
fn test_network_connected_edge_triggers_comprehensive_fetch() {
    let mut state = AppState::new();
    let connected = mibot_core::status::ConnectionStatus {
        connected: true,
        network_name: Some("lab".into()),
        device_ip: Some("10.0.0.2".into()),
        loading: false,
    };

    let actions = process(&mut state, Message::NetworkStatusLoaded(Ok(connected.clone())));
    assert_eq!(
        actions,
        vec![UpdateAction::FetchStatus(StatusKind::Comprehensive)]
    );

    // Still connected: no edge, no refetch.
    let actions = process(&mut state, Message::NetworkStatusLoaded(Ok(connected)));
    assert!(actions.is_empty());
}

#[test]
fn test_dock_success_refreshes_battery() {
    let mut state = connected_state();
    let actions = process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Dock,
            outcome: CommandOutcome::ok("Robot is charging."),
        },
    );
    assert_eq!(actions, vec![UpdateAction::FetchBattery { generation: 0 }]);

    let actions = process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Undock,
            outcome: CommandOutcome::failed("Failed to undock from charging station"),
        },
    );
    assert!(actions.is_empty());
}

#[test]
fn test_refresh_maps_cache_refetches_only_while_polling() {
    let mut state = connected_state();
    let actions = process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::RefreshMapsCache,
            outcome: CommandOutcome::ok("Maps cache refreshed successfully"),
        },
    );
    assert!(actions.is_empty());

    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::Resume,
            outcome: CommandOutcome::ok("Robot navigation resumed"),
        },
    );
    let actions = process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::RefreshMapsCache,
            outcome: CommandOutcome::ok("Maps cache refreshed successfully"),
        },
    );
    assert_eq!(actions, vec![UpdateAction::FetchCurrentMap { generation: 0 }]);
}

#[test]
fn test_switching_to_a_map_tab_fetches_the_list() {
    let mut state = AppState::new();
    let actions = process(&mut state, Message::SwitchTab(Tab::Maps));
    assert_eq!(actions, vec![UpdateAction::FetchStatus(StatusKind::Maps)]);
    assert!(state.maps.loading);

    process(
        &mut state,
        Message::MapsLoaded(Ok(vec![MapEntry::new("1", "A"), MapEntry::new("2", "B")])),
    );
    assert!(!state.maps.loading);
    assert_eq!(state.maps.entries.len(), 2);

    process(
        &mut state,
        Message::MapsLoaded(Err("Not connected to robot".into())),
    );
    assert!(state.maps.entries.is_empty());
    assert_eq!(state.maps.error.as_deref(), Some("Not connected to robot"));
}

#[test]
fn test_switching_home_does_not_fetch() {
    let mut state = AppState::new();
    state.tab = Tab::Maps;
    let actions = process(&mut state, Message::SwitchTab(Tab::Home));
    assert!(actions.is_empty());
}

#[test]
fn test_command_outcome_notice_levels() {
    let mut state = connected_state();
    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::EmergencyExit,
            outcome: CommandOutcome::ok("Emergency exit triggered"),
        },
    );
    assert_eq!(last_notice_level(&state), Some(NoticeLevel::Success));

    process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::EmergencyExit,
            outcome: CommandOutcome::failed("Emergency exit failed"),
        },
    );
    assert_eq!(last_notice_level(&state), Some(NoticeLevel::Error));
}

#[test]
fn test_tick_prunes_expired_notices() {
    let mut state = AppState::new();
    state.notice_ttl = std::time::Duration::ZERO;
    state.push_notice(mibot_core::notice::Notice::info("gone soon"));
    process(&mut state, Message::Tick);
    assert!(state.notices.is_empty());
}

#[test]
fn test_set_robot_ip_success_triggers_discovery() {
    let mut state = AppState::new();
    let actions = process(
        &mut state,
        Message::CommandFinished {
            command: CommandKind::SetRobotIp,
            outcome: CommandOutcome::ok("Robot IP set and validated"),
        },
    );
    assert_eq!(actions, vec![UpdateAction::FetchStatus(StatusKind::Robot)]);
}
