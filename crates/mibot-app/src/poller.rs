//! Background status fetch tasks.
//!
//! One-shot fetches and recurring pollers both follow the same shape: send
//! `RefreshStarted` so the slice shows its in-flight window, perform the
//! HTTP call, fold any failure into the slice's error form, and send the
//! result message. Tasks never touch `AppState`; the update loop is the
//! only writer.
//!
//! Recurring pollers return the `watch` sender that cancels them. A
//! cancellation signalled mid-fetch takes effect at the next loop head; the
//! late result is discarded by its stale generation tag.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use mibot_api::ApiClient;
use mibot_core::status::{
    BatteryStatus, ConnectionStatus, CurrentMapInfo, EmergencyStatus, MapEntry, RobotStatus,
    StorageStatus,
};

use crate::message::{Message, StatusKind};

// ─────────────────────────────────────────────────────────
// Fetch + fold helpers
// ─────────────────────────────────────────────────────────

async fn fetch_network(client: &ApiClient) -> Result<ConnectionStatus, String> {
    match client.network_status().await {
        Ok(reply) => Ok(reply.into_status()),
        Err(e) => Err(e.to_string()),
    }
}

async fn fetch_robot(client: &ApiClient) -> Result<RobotStatus, String> {
    match client.discover_robot().await {
        Ok(reply) if reply.success => Ok(reply.into_status()),
        Ok(reply) => Err(reply
            .message
            .unwrap_or_else(|| "Error discovering robot".to_string())),
        Err(e) => {
            debug!("robot discovery failed: {e}");
            Err("Failed to discover robot".to_string())
        }
    }
}

async fn fetch_comprehensive(
    client: &ApiClient,
) -> Result<(ConnectionStatus, RobotStatus), String> {
    match client.comprehensive_status().await {
        Ok(reply) if reply.success => Ok(reply.into_statuses()),
        Ok(reply) => Err(reply
            .message
            .unwrap_or_else(|| "Error getting status".to_string())),
        Err(e) => Err(e.to_string()),
    }
}

async fn fetch_battery(client: &ApiClient) -> BatteryStatus {
    match client.battery().await {
        Ok(reply) => reply.into_status(),
        Err(_) => BatteryStatus::failed("Failed to get battery status"),
    }
}

async fn fetch_storage(client: &ApiClient) -> StorageStatus {
    match client.storage().await {
        Ok(reply) => reply.into_status(),
        Err(_) => StorageStatus::failed("Failed to get storage status"),
    }
}

async fn fetch_emergency(client: &ApiClient) -> EmergencyStatus {
    match client.emergency_status().await {
        Ok(reply) => reply.into_status(),
        Err(_) => EmergencyStatus::failed("Failed to get emergency status"),
    }
}

async fn fetch_current_map(client: &ApiClient) -> CurrentMapInfo {
    match client.current_map().await {
        Ok(reply) => reply.into_status(),
        Err(_) => CurrentMapInfo {
            error: Some("Failed to get current map info".to_string()),
            ..CurrentMapInfo::cleared()
        },
    }
}

async fn fetch_maps(client: &ApiClient) -> Result<Vec<MapEntry>, String> {
    match client.maps().await {
        Ok(reply) if reply.success => Ok(reply.into_entries()),
        Ok(reply) => Err(reply
            .message
            .unwrap_or_else(|| "No maps found on robot".to_string())),
        Err(_) => Err("Not connected to robot".to_string()),
    }
}

// ─────────────────────────────────────────────────────────
// One-shot fetch tasks
// ─────────────────────────────────────────────────────────

pub fn spawn_network_fetch(client: ApiClient, tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let started = Message::RefreshStarted {
            kind: StatusKind::Network,
            generation: 0,
        };
        if tx.send(started).await.is_err() {
            return;
        }
        let result = fetch_network(&client).await;
        let _ = tx.send(Message::NetworkStatusLoaded(result)).await;
    });
}

pub fn spawn_robot_discovery(client: ApiClient, tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let started = Message::RefreshStarted {
            kind: StatusKind::Robot,
            generation: 0,
        };
        if tx.send(started).await.is_err() {
            return;
        }
        let result = fetch_robot(&client).await;
        let _ = tx.send(Message::RobotDiscovered(result)).await;
    });
}

pub fn spawn_comprehensive_fetch(client: ApiClient, tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let result = fetch_comprehensive(&client).await;
        let _ = tx.send(Message::ComprehensiveStatusLoaded(result)).await;
    });
}

pub fn spawn_battery_fetch(client: ApiClient, tx: mpsc::Sender<Message>, generation: u64) {
    tokio::spawn(async move {
        let started = Message::RefreshStarted {
            kind: StatusKind::Battery,
            generation,
        };
        if tx.send(started).await.is_err() {
            return;
        }
        let status = fetch_battery(&client).await;
        let _ = tx
            .send(Message::BatteryStatusLoaded { generation, status })
            .await;
    });
}

pub fn spawn_current_map_fetch(client: ApiClient, tx: mpsc::Sender<Message>, generation: u64) {
    tokio::spawn(async move {
        let started = Message::RefreshStarted {
            kind: StatusKind::CurrentMap,
            generation,
        };
        if tx.send(started).await.is_err() {
            return;
        }
        let info = fetch_current_map(&client).await;
        let _ = tx
            .send(Message::CurrentMapInfoLoaded { generation, info })
            .await;
    });
}

pub fn spawn_maps_fetch(client: ApiClient, tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let started = Message::RefreshStarted {
            kind: StatusKind::Maps,
            generation: 0,
        };
        if tx.send(started).await.is_err() {
            return;
        }
        let result = fetch_maps(&client).await;
        let _ = tx.send(Message::MapsLoaded(result)).await;
    });
}

// ─────────────────────────────────────────────────────────
// Recurring pollers
// ─────────────────────────────────────────────────────────

/// Battery poll, active while the robot is found. The first tick fires
/// immediately, so starting the poller is also the initial fetch.
pub fn spawn_battery_poller(
    client: ApiClient,
    tx: mpsc::Sender<Message>,
    period: Duration,
    generation: u64,
) -> watch::Sender<bool> {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let started = Message::RefreshStarted {
                        kind: StatusKind::Battery,
                        generation,
                    };
                    if tx.send(started).await.is_err() {
                        break;
                    }
                    let status = fetch_battery(&client).await;
                    if tx.send(Message::BatteryStatusLoaded { generation, status }).await.is_err() {
                        break;
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }
        debug!("battery poller stopped (generation {generation})");
    });
    shutdown_tx
}

/// Current-map poll, active while navigation runs.
pub fn spawn_current_map_poller(
    client: ApiClient,
    tx: mpsc::Sender<Message>,
    period: Duration,
    generation: u64,
) -> watch::Sender<bool> {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let started = Message::RefreshStarted {
                        kind: StatusKind::CurrentMap,
                        generation,
                    };
                    if tx.send(started).await.is_err() {
                        break;
                    }
                    let info = fetch_current_map(&client).await;
                    if tx.send(Message::CurrentMapInfoLoaded { generation, info }).await.is_err() {
                        break;
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }
        debug!("current-map poller stopped (generation {generation})");
    });
    shutdown_tx
}

/// Storage poll, unconditional from bootstrap until teardown.
pub fn spawn_storage_poller(
    client: ApiClient,
    tx: mpsc::Sender<Message>,
    period: Duration,
) -> watch::Sender<bool> {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let started = Message::RefreshStarted {
                        kind: StatusKind::Storage,
                        generation: 0,
                    };
                    if tx.send(started).await.is_err() {
                        break;
                    }
                    let status = fetch_storage(&client).await;
                    if tx.send(Message::StorageStatusLoaded(status)).await.is_err() {
                        break;
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }
        debug!("storage poller stopped");
    });
    shutdown_tx
}

/// Emergency-stop poll, unconditional from bootstrap until teardown. This
/// is the one poller that never stops while the console runs; it keeps
/// going through the lock-out so recovery is observed.
pub fn spawn_emergency_poller(
    client: ApiClient,
    tx: mpsc::Sender<Message>,
    period: Duration,
) -> watch::Sender<bool> {
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let started = Message::RefreshStarted {
                        kind: StatusKind::Emergency,
                        generation: 0,
                    };
                    if tx.send(started).await.is_err() {
                        break;
                    }
                    let status = fetch_emergency(&client).await;
                    if tx.send(Message::EmergencyStatusLoaded(status)).await.is_err() {
                        break;
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }
        debug!("emergency poller stopped");
    });
    shutdown_tx
}
