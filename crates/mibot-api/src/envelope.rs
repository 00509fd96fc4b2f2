//! Wire envelope types for backend replies.
//!
//! The backend is a thin bridge to the robot and is loose with types:
//! charging arrives as a bool or an integer code, map ids as numbers or
//! strings, and several replies carry auxiliary fields the console ignores.
//! Deserialization here is tolerant; conversion into the typed status
//! slices happens in the `into_*` methods.

use serde::{Deserialize, Deserializer};

use mibot_core::status::{
    BatteryStatus, ChargingState, ConnectionStatus, CurrentMapInfo, EmergencyState,
    EmergencyStatus, MapEntry, RobotStatus, StorageStatus,
};

/// Reply to a fire-and-forget control command (stop, resume, quit, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct CommandAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl CommandAck {
    /// Backend message if present and non-empty, else the given fallback.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => fallback,
        }
    }
}

/// `GET /api/network/status`
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkStatusReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub device_ip: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NetworkStatusReply {
    pub fn into_status(self) -> ConnectionStatus {
        if self.success {
            ConnectionStatus {
                connected: self.connected,
                network_name: self.network_name,
                device_ip: self.device_ip,
                loading: false,
            }
        } else {
            ConnectionStatus::unknown()
        }
    }
}

/// `GET /api/robot/discover`
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub robot_found: bool,
    #[serde(default)]
    pub robot_ip: Option<String>,
    #[serde(default)]
    pub robot_wifi_name: Option<String>,
    #[serde(default)]
    pub device_wifi_name: Option<String>,
    #[serde(default)]
    pub device_ip: Option<String>,
    #[serde(default)]
    pub same_network: bool,
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub robot_port: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DiscoverReply {
    pub fn into_status(self) -> RobotStatus {
        if self.success {
            RobotStatus::resolve(
                self.robot_found,
                self.robot_ip,
                self.robot_wifi_name,
                self.connected,
            )
        } else {
            RobotStatus::lost()
        }
    }
}

/// Nested sections of `GET /api/robot/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceSection {
    #[serde(default)]
    pub wifi_name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub connected: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RobotSection {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub wifi_name: Option<String>,
    #[serde(default)]
    pub found: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkSection {
    #[serde(default)]
    pub same_network: bool,
    #[serde(default)]
    pub connected: bool,
}

/// `GET /api/robot/status`: device, robot, and combined network reachability.
#[derive(Debug, Clone, Deserialize)]
pub struct ComprehensiveStatusReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub device: DeviceSection,
    #[serde(default)]
    pub robot: RobotSection,
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub message: Option<String>,
}

impl ComprehensiveStatusReply {
    /// Split into the two slices this reply refreshes at once.
    pub fn into_statuses(self) -> (ConnectionStatus, RobotStatus) {
        let connection = ConnectionStatus {
            connected: self.device.connected,
            network_name: self.device.wifi_name,
            device_ip: self.device.ip,
            loading: false,
        };
        let robot = RobotStatus::resolve(
            self.robot.found,
            self.robot.ip,
            self.robot.wifi_name,
            self.network.connected,
        );
        (connection, robot)
    }
}

/// `GET /api/robot/battery`
#[derive(Debug, Clone, Deserialize)]
pub struct BatteryReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub battery: Option<u8>,
    #[serde(default, deserialize_with = "de_opt_charging")]
    pub charging: Option<ChargingState>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BatteryReply {
    pub fn into_status(self) -> BatteryStatus {
        if self.success {
            match (self.battery, self.charging) {
                (Some(battery), Some(charging)) => BatteryStatus::ok(battery, charging),
                _ => BatteryStatus::failed("Battery reading incomplete"),
            }
        } else {
            BatteryStatus::failed(
                self.message
                    .unwrap_or_else(|| "Failed to get battery status".to_string()),
            )
        }
    }
}

/// `GET /api/robot/storage`: values are `df -h` strings, carried verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub total: Option<String>,
    #[serde(default)]
    pub free: Option<String>,
    #[serde(default)]
    pub percent: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StorageReply {
    pub fn into_status(self) -> StorageStatus {
        if self.success {
            match (self.total, self.free, self.percent) {
                (Some(total), Some(free), Some(percent)) => {
                    StorageStatus::ok(total, free, percent)
                }
                _ => StorageStatus::failed("Storage reading incomplete"),
            }
        } else {
            StorageStatus::failed(
                self.message
                    .unwrap_or_else(|| "Failed to get storage status".to_string()),
            )
        }
    }
}

/// `GET /api/robot/emergency_status`
#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub status: i64,
    /// Auxiliary robot-side text, distinct from the failure `message`.
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EmergencyReply {
    pub fn into_status(self) -> EmergencyStatus {
        if self.success {
            EmergencyStatus::ok(EmergencyState::from_code(self.status))
        } else {
            EmergencyStatus::failed(
                self.message
                    .unwrap_or_else(|| "Failed to get emergency status".to_string()),
            )
        }
    }
}

/// One map entry as the robot reports it; ids may arrive as numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct MapEntryWire {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /api/robot/maps`
#[derive(Debug, Clone, Deserialize)]
pub struct MapsReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub maps: Vec<MapEntryWire>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MapsReply {
    /// Entries with a usable id, in backend order.
    pub fn into_entries(self) -> Vec<MapEntry> {
        self.maps
            .into_iter()
            .filter_map(|m| {
                let id = m.id?;
                let name = m.name.unwrap_or_else(|| id.clone());
                Some(MapEntry { id, name })
            })
            .collect()
    }
}

/// `GET /api/robot/current_map`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMapReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub current_map_id: Option<String>,
    #[serde(default)]
    pub current_map_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub upcoming_map_id_1: Option<String>,
    #[serde(default)]
    pub upcoming_map_name_1: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub upcoming_map_id_2: Option<String>,
    #[serde(default)]
    pub upcoming_map_name_2: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CurrentMapReply {
    pub fn into_status(self) -> CurrentMapInfo {
        if self.success {
            CurrentMapInfo {
                current_map_id: self.current_map_id,
                current_map_name: self.current_map_name,
                upcoming_map_id_1: self.upcoming_map_id_1,
                upcoming_map_name_1: self.upcoming_map_name_1,
                upcoming_map_id_2: self.upcoming_map_id_2,
                upcoming_map_name_2: self.upcoming_map_name_2,
                loading: false,
                error: None,
            }
        } else {
            CurrentMapInfo {
                error: Some(
                    self.message
                        .unwrap_or_else(|| "Failed to get current map info".to_string()),
                ),
                ..CurrentMapInfo::cleared()
            }
        }
    }
}

/// `POST /api/robot/set_ip`
#[derive(Debug, Clone, Deserialize)]
pub struct SetIpReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub robot_ip: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Tolerant field deserializers
// ─────────────────────────────────────────────────────────

/// Charging arrives as `false`/`true` or `0`/`1`/`2`; unknown codes and
/// nulls become `None`.
fn de_opt_charging<'de, D>(deserializer: D) -> Result<Option<ChargingState>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Bool(b)) => Some(ChargingState::from_bool(b)),
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(ChargingState::from_code),
        _ => None,
    })
}

/// Map ids arrive as strings or numbers; both normalize to `String`.
fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
