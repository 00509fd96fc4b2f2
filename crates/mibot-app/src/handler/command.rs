//! Command dispatch guards and per-command post-conditions.
//!
//! Every command passes a local guard before any HTTP work is queued: when
//! the guard fails the command produces a notice and no action, so nothing
//! ever reaches the network. Emergency-exit and the set-ip override are the
//! only connection-ungated commands.

use tracing::warn;

use mibot_core::notice::Notice;

use crate::message::{CommandKind, CommandOutcome, CommandRequest, Message};
use crate::state::AppState;

use super::status::sync_pollers;
use super::{UpdateAction, UpdateResult};

/// The START/STOP button: stop while navigation runs, resume otherwise.
pub(crate) fn handle_toggle_run(state: &AppState) -> UpdateResult {
    if state.nav_running {
        UpdateResult::message(Message::Command(CommandKind::Stop))
    } else {
        UpdateResult::message(Message::Command(CommandKind::Resume))
    }
}

/// Apply the guards for a command intent and queue the HTTP dispatch.
pub(crate) fn handle_command(state: &mut AppState, kind: CommandKind) -> UpdateResult {
    match kind {
        CommandKind::Stop => {
            state.push_notice(Notice::info("Stopping navigation..."));
            // Optimistic: the running flag drops before any response, and is
            // not reconciled if the backend later reports failure.
            state.nav_running = false;
            let mut actions = sync_pollers(state);
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::actions(actions);
            }
            actions.push(UpdateAction::DispatchCommand(CommandRequest::Stop));
            UpdateResult::actions(actions)
        }

        CommandKind::Resume => {
            state.push_notice(Notice::info("Resuming navigation..."));
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::DispatchCommand(CommandRequest::Resume))
        }

        CommandKind::Execute => {
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::none();
            }
            if state.stitch_job.is_empty() {
                state.push_notice(Notice::warning("Stitch map and then execute"));
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::DispatchCommand(CommandRequest::Execute {
                stitched_map_ids: state.stitch_job.clone(),
            }))
        }

        CommandKind::QuitNavigation => {
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::DispatchCommand(CommandRequest::QuitNavigation))
        }

        CommandKind::Relocate => {
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::none();
            }
            if state.relocate_in_flight {
                return UpdateResult::none();
            }
            state.relocate_in_flight = true;
            UpdateResult::action(UpdateAction::DispatchCommand(CommandRequest::Relocate))
        }

        CommandKind::ForceRelocate => {
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::none();
            }
            if state.force_relocate_in_flight {
                return UpdateResult::none();
            }
            state.force_relocate_in_flight = true;
            UpdateResult::action(UpdateAction::DispatchCommand(CommandRequest::ForceRelocate))
        }

        CommandKind::Dock => {
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::none();
            }
            state.push_notice(Notice::info("Navigating to charging point..."));
            UpdateResult::action(UpdateAction::DispatchCommand(CommandRequest::Dock))
        }

        CommandKind::Undock => {
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::none();
            }
            state.push_notice(Notice::info("Undocking from charging pile..."));
            UpdateResult::action(UpdateAction::DispatchCommand(CommandRequest::Undock))
        }

        // Reaches the robot through a hardware channel, so it stays
        // available while the backend considers the robot unreachable.
        CommandKind::EmergencyExit => {
            UpdateResult::action(UpdateAction::DispatchCommand(CommandRequest::EmergencyExit))
        }

        CommandKind::RefreshMapsCache => {
            if !state.robot.connected {
                state.push_notice(Notice::warning("Robot not connected"));
                return UpdateResult::none();
            }
            UpdateResult::action(UpdateAction::DispatchCommand(
                CommandRequest::RefreshMapsCache,
            ))
        }

        // Only dispatched from bootstrap, where the request carries its
        // arguments; a bare intent has nothing to send.
        CommandKind::SetRobotIp => {
            warn!("SetRobotIp intent without arguments ignored");
            UpdateResult::none()
        }
    }
}

/// Apply a command response in arrival order.
pub(crate) fn handle_command_finished(
    state: &mut AppState,
    command: CommandKind,
    outcome: CommandOutcome,
) -> UpdateResult {
    if outcome.success {
        state.push_notice(Notice::success(outcome.message));
    } else {
        state.push_notice(Notice::error(outcome.message));
    }

    match command {
        // The running flag was already dropped optimistically at dispatch.
        CommandKind::Stop => UpdateResult::none(),

        CommandKind::Resume => {
            state.nav_running = outcome.success;
            UpdateResult::actions(sync_pollers(state))
        }

        CommandKind::Execute => {
            state.nav_running = outcome.success;
            // The staged job is consumed exactly once, win or lose.
            state.stitch_job.clear();
            state.selected_maps.clear();
            UpdateResult::actions(sync_pollers(state))
        }

        CommandKind::QuitNavigation => {
            // Guaranteed cleanup regardless of outcome.
            state.stitch_job.clear();
            state.selected_maps.clear();
            state.nav_running = false;
            UpdateResult::actions(sync_pollers(state))
        }

        CommandKind::Relocate => {
            state.relocate_in_flight = false;
            UpdateResult::none()
        }

        CommandKind::ForceRelocate => {
            state.force_relocate_in_flight = false;
            UpdateResult::none()
        }

        CommandKind::Dock | CommandKind::Undock => {
            if outcome.success {
                UpdateResult::action(UpdateAction::FetchBattery {
                    generation: state.battery_generation,
                })
            } else {
                UpdateResult::none()
            }
        }

        CommandKind::EmergencyExit => UpdateResult::none(),

        CommandKind::RefreshMapsCache => {
            // Pick up renamed maps right away, but only while the poll is
            // live; outside navigation the slice must stay cleared.
            if outcome.success && state.map_poll_active {
                UpdateResult::action(UpdateAction::FetchCurrentMap {
                    generation: state.map_generation,
                })
            } else {
                UpdateResult::none()
            }
        }

        CommandKind::SetRobotIp => {
            if outcome.success {
                UpdateResult::message(Message::DiscoverRobot)
            } else {
                UpdateResult::none()
            }
        }
    }
}
