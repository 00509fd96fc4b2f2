//! Action handlers: UpdateAction dispatch, command execution, and poller
//! lifecycle ownership.
//!
//! The update loop stays pure; everything here spawns tokio tasks that
//! report back through the message channel. `PollerSet` owns the watch
//! senders that cancel the recurring pollers, so dropping it (console
//! teardown or an emergency reload) deterministically stops every timer.

use tokio::sync::{mpsc, watch};
use tracing::warn;

use mibot_api::envelope::CommandAck;
use mibot_api::ApiClient;

use crate::handler::UpdateAction;
use crate::message::{CommandOutcome, CommandRequest, Message, StatusKind};
use crate::poller;
use crate::settings::Settings;

/// Cancellation handles for the recurring pollers.
#[derive(Debug, Default)]
pub struct PollerSet {
    battery: Option<watch::Sender<bool>>,
    current_map: Option<watch::Sender<bool>>,
    storage: Option<watch::Sender<bool>>,
    emergency: Option<watch::Sender<bool>>,
}

impl PollerSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn stop_slot(slot: &mut Option<watch::Sender<bool>>) {
        if let Some(tx) = slot.take() {
            // Receiver may already be gone; either way the task ends.
            let _ = tx.send(true);
        }
    }

    pub fn stop_battery(&mut self) {
        Self::stop_slot(&mut self.battery);
    }

    pub fn stop_current_map(&mut self) {
        Self::stop_slot(&mut self.current_map);
    }

    /// Cancel every timer. Used at teardown and on emergency reload.
    pub fn stop_all(&mut self) {
        Self::stop_slot(&mut self.battery);
        Self::stop_slot(&mut self.current_map);
        Self::stop_slot(&mut self.storage);
        Self::stop_slot(&mut self.emergency);
    }

    pub fn battery_active(&self) -> bool {
        self.battery.is_some()
    }

    pub fn current_map_active(&self) -> bool {
        self.current_map.is_some()
    }

    pub fn storage_active(&self) -> bool {
        self.storage.is_some()
    }

    pub fn emergency_active(&self) -> bool {
        self.emergency.is_some()
    }
}

/// Execute an action by spawning the matching background task.
pub fn handle_action(
    action: UpdateAction,
    client: &ApiClient,
    msg_tx: &mpsc::Sender<Message>,
    pollers: &mut PollerSet,
    settings: &Settings,
) {
    match action {
        UpdateAction::FetchStatus(kind) => match kind {
            StatusKind::Network => {
                poller::spawn_network_fetch(client.clone(), msg_tx.clone());
            }
            StatusKind::Robot => {
                poller::spawn_robot_discovery(client.clone(), msg_tx.clone());
            }
            StatusKind::Comprehensive => {
                poller::spawn_comprehensive_fetch(client.clone(), msg_tx.clone());
            }
            StatusKind::Maps => {
                poller::spawn_maps_fetch(client.clone(), msg_tx.clone());
            }
            // Generation-tagged and recurring kinds have dedicated actions.
            other => warn!("FetchStatus({other:?}) has no one-shot form, ignored"),
        },

        UpdateAction::FetchBattery { generation } => {
            poller::spawn_battery_fetch(client.clone(), msg_tx.clone(), generation);
        }

        UpdateAction::FetchCurrentMap { generation } => {
            poller::spawn_current_map_fetch(client.clone(), msg_tx.clone(), generation);
        }

        UpdateAction::DispatchCommand(request) => {
            spawn_command(client.clone(), msg_tx.clone(), request);
        }

        UpdateAction::StartBatteryPolling { generation } => {
            PollerSet::stop_slot(&mut pollers.battery);
            pollers.battery = Some(poller::spawn_battery_poller(
                client.clone(),
                msg_tx.clone(),
                settings.battery_poll_period(),
                generation,
            ));
        }

        UpdateAction::StopBatteryPolling => pollers.stop_battery(),

        UpdateAction::StartCurrentMapPolling { generation } => {
            PollerSet::stop_slot(&mut pollers.current_map);
            pollers.current_map = Some(poller::spawn_current_map_poller(
                client.clone(),
                msg_tx.clone(),
                settings.current_map_poll_period(),
                generation,
            ));
        }

        UpdateAction::StopCurrentMapPolling => pollers.stop_current_map(),

        UpdateAction::StartStoragePolling => {
            PollerSet::stop_slot(&mut pollers.storage);
            pollers.storage = Some(poller::spawn_storage_poller(
                client.clone(),
                msg_tx.clone(),
                settings.storage_poll_period(),
            ));
        }

        UpdateAction::StartEmergencyPolling => {
            PollerSet::stop_slot(&mut pollers.emergency);
            pollers.emergency = Some(poller::spawn_emergency_poller(
                client.clone(),
                msg_tx.clone(),
                settings.emergency_poll_period(),
            ));
        }
    }
}

/// Fire a control command and feed the resolved outcome back to the loop.
/// At most one request per dispatch, no retry.
fn spawn_command(client: ApiClient, tx: mpsc::Sender<Message>, request: CommandRequest) {
    tokio::spawn(async move {
        let command = request.kind();
        let outcome = dispatch(&client, request).await;
        let _ = tx.send(Message::CommandFinished { command, outcome }).await;
    });
}

async fn dispatch(client: &ApiClient, request: CommandRequest) -> CommandOutcome {
    let kind = request.kind();
    let result = match request {
        CommandRequest::Stop => client.stop().await,
        CommandRequest::Resume => client.resume().await,
        CommandRequest::Execute { stitched_map_ids } => {
            client.execute(&stitched_map_ids).await
        }
        CommandRequest::QuitNavigation => client.quit().await,
        CommandRequest::Relocate => client.relocate().await,
        CommandRequest::ForceRelocate => client.force_relocate().await,
        CommandRequest::Dock => client.auto_charge().await,
        CommandRequest::Undock => client.undock().await,
        CommandRequest::EmergencyExit => client.emergency_exit().await,
        CommandRequest::RefreshMapsCache => client.refresh_maps_cache().await,
        CommandRequest::SetRobotIp { ip, port } => {
            client.set_robot_ip(&ip, port).await.map(|reply| CommandAck {
                success: reply.success,
                message: reply.message,
            })
        }
    };

    match result {
        Ok(ack) if ack.success => CommandOutcome::ok(ack.message_or(kind.success_fallback())),
        Ok(ack) => CommandOutcome::failed(ack.message_or(kind.failure_fallback())),
        // Error::Http already reads "Network error: ..."
        Err(e) => CommandOutcome::failed(e.to_string()),
    }
}
