//! Status entities reflected from the robot backend.
//!
//! Each struct here is one independently-owned state slice: pollers and
//! command responses replace a slice wholesale, they never patch fields of a
//! slice another writer owns.

use serde::{Deserialize, Serialize};

/// Device network connectivity, refreshed at startup or on operator action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub network_name: Option<String>,
    pub device_ip: Option<String>,
    pub loading: bool,
}

impl ConnectionStatus {
    /// Empty slice shown while nothing has been fetched yet.
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Robot discovery and reachability.
///
/// `connected` means combined network + robot reachability and implies
/// `found`; [`RobotStatus::resolve`] enforces that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotStatus {
    pub found: bool,
    pub ip: Option<String>,
    pub wifi_name: Option<String>,
    pub connected: bool,
    pub loading: bool,
}

impl RobotStatus {
    /// Build a status slice from backend fields, clamping `connected` so the
    /// `connected ⇒ found` invariant holds even on inconsistent replies.
    pub fn resolve(
        found: bool,
        ip: Option<String>,
        wifi_name: Option<String>,
        connected: bool,
    ) -> Self {
        Self {
            found,
            ip,
            wifi_name,
            connected: connected && found,
            loading: false,
        }
    }

    /// Slice after a failed discovery: nothing known.
    pub fn lost() -> Self {
        Self::default()
    }
}

/// Charging state as reported by the robot.
///
/// The wire encodes this as `false`/`0` (not charging), `true`/`1`
/// (charging), or `2` (docked on the charging pile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargingState {
    NotCharging,
    Charging,
    Docked,
}

impl ChargingState {
    /// Decode the integer form; unknown codes map to `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::NotCharging),
            1 => Some(Self::Charging),
            2 => Some(Self::Docked),
            _ => None,
        }
    }

    pub fn from_bool(charging: bool) -> Self {
        if charging {
            Self::Charging
        } else {
            Self::NotCharging
        }
    }

    pub fn is_charging(&self) -> bool {
        !matches!(self, Self::NotCharging)
    }

    pub fn is_docked(&self) -> bool {
        matches!(self, Self::Docked)
    }

    /// Human-readable label shown next to the battery gauge.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotCharging => "Not Charging",
            Self::Charging => "Charging",
            Self::Docked => "Docked",
        }
    }
}

/// Battery telemetry, polled while the robot is found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatteryStatus {
    /// Percentage 0-100.
    pub battery: Option<u8>,
    pub charging: Option<ChargingState>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BatteryStatus {
    pub fn ok(battery: u8, charging: ChargingState) -> Self {
        Self {
            battery: Some(battery.min(100)),
            charging: Some(charging),
            loading: false,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            battery: None,
            charging: None,
            loading: false,
            error: Some(message.into()),
        }
    }
}

/// Robot disk usage. The backend reports `df -h`-style human-readable
/// strings ("29G", "45%"); they are carried verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStatus {
    pub total: Option<String>,
    pub free: Option<String>,
    pub percent: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl StorageStatus {
    pub fn ok(total: String, free: String, percent: String) -> Self {
        Self {
            total: Some(total),
            free: Some(free),
            percent: Some(percent),
            loading: false,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            total: None,
            free: None,
            percent: None,
            loading: false,
            error: Some(message.into()),
        }
    }

    /// Percent-used as a number for the gauge, if the string parses.
    pub fn percent_value(&self) -> Option<u16> {
        self.percent
            .as_deref()?
            .trim_end_matches('%')
            .parse::<u16>()
            .ok()
            .map(|p| p.min(100))
    }
}

/// Physical emergency stop state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmergencyState {
    #[default]
    Normal,
    Triggered,
}

impl EmergencyState {
    /// Decode the wire code; anything other than `1` is treated as normal.
    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Self::Triggered
        } else {
            Self::Normal
        }
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered)
    }
}

/// Emergency stop slice, polled unconditionally every 2 seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmergencyStatus {
    pub state: EmergencyState,
    pub loading: bool,
    pub error: Option<String>,
}

impl EmergencyStatus {
    pub fn ok(state: EmergencyState) -> Self {
        Self {
            state,
            loading: false,
            error: None,
        }
    }

    /// A failed emergency poll keeps the state at Normal: the lock-out only
    /// engages on a positive Triggered reading from the backend.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            state: EmergencyState::Normal,
            loading: false,
            error: Some(message.into()),
        }
    }
}

/// Live navigation map info, polled only while navigation is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentMapInfo {
    pub current_map_id: Option<String>,
    pub current_map_name: Option<String>,
    pub upcoming_map_id_1: Option<String>,
    pub upcoming_map_name_1: Option<String>,
    pub upcoming_map_id_2: Option<String>,
    pub upcoming_map_name_2: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CurrentMapInfo {
    /// The empty shape the slice is reset to the instant navigation stops.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.current_map_id.is_none()
            && self.current_map_name.is_none()
            && self.upcoming_map_id_1.is_none()
            && self.upcoming_map_id_2.is_none()
    }
}

/// One entry of the robot's map list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub id: String,
    pub name: String,
}

impl MapEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Placeholder art tile for a map thumbnail.
///
/// Produced by an injected resolver so a real thumbnail source can replace
/// the placeholder palette without touching the selection workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapArt {
    /// Palette slot, used by the renderer to pick a color.
    pub palette_index: usize,
    pub glyph: char,
}

/// A map chosen for stitching. Selection order is stitch order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMap {
    pub id: String,
    pub art: MapArt,
    pub name: String,
}
