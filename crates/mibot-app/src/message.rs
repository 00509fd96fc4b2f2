//! Message types for the application (TEA pattern)

use mibot_core::status::{
    BatteryStatus, ConnectionStatus, CurrentMapInfo, EmergencyStatus, MapEntry, RobotStatus,
    StorageStatus,
};

use crate::input_key::InputKey;
use crate::state::Tab;

/// Which backend status a fetch targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Network,
    Robot,
    Comprehensive,
    Battery,
    Storage,
    Emergency,
    CurrentMap,
    Maps,
}

/// The control commands the dispatcher can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Stop,
    Resume,
    Execute,
    QuitNavigation,
    Relocate,
    ForceRelocate,
    Dock,
    Undock,
    EmergencyExit,
    RefreshMapsCache,
    SetRobotIp,
}

impl CommandKind {
    /// Notice text when the backend confirms but supplies no message.
    pub fn success_fallback(&self) -> &'static str {
        match self {
            Self::Stop => "Robot navigation stopped",
            Self::Resume => "Robot navigation resumed",
            Self::Execute => "Navigation started",
            Self::QuitNavigation => "Quit command sent",
            Self::Relocate => "Relocation successful",
            Self::ForceRelocate => "Force relocation successful",
            Self::Dock => "Successfully docked to charging point",
            Self::Undock => "Successfully undocked from charging point",
            Self::EmergencyExit => "Emergency exit triggered",
            Self::RefreshMapsCache => "Maps cache refreshed successfully",
            Self::SetRobotIp => "Robot IP set and validated",
        }
    }

    /// Notice text when the backend reports failure without a message.
    pub fn failure_fallback(&self) -> &'static str {
        match self {
            Self::Stop => "Failed to stop robot",
            Self::Resume => "Failed to resume navigation",
            Self::Execute => "Navigation failed",
            Self::QuitNavigation => "Failed to send quit command",
            Self::Relocate => "Relocation failed",
            Self::ForceRelocate => "Force relocation failed",
            Self::Dock => "Could not find charging station",
            Self::Undock => "Failed to undock from charging station",
            Self::EmergencyExit => "Emergency exit failed",
            Self::RefreshMapsCache => "Failed to refresh maps cache",
            Self::SetRobotIp => "Failed to set robot IP",
        }
    }
}

/// A fully-formed command request, ready for the HTTP layer.
///
/// Built by `update()` after the local guards pass; the payload-carrying
/// variants capture their arguments at dispatch time so the background task
/// never reads shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandRequest {
    Stop,
    Resume,
    Execute { stitched_map_ids: Vec<String> },
    QuitNavigation,
    Relocate,
    ForceRelocate,
    Dock,
    Undock,
    EmergencyExit,
    RefreshMapsCache,
    SetRobotIp { ip: String, port: u16 },
}

impl CommandRequest {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Stop => CommandKind::Stop,
            Self::Resume => CommandKind::Resume,
            Self::Execute { .. } => CommandKind::Execute,
            Self::QuitNavigation => CommandKind::QuitNavigation,
            Self::Relocate => CommandKind::Relocate,
            Self::ForceRelocate => CommandKind::ForceRelocate,
            Self::Dock => CommandKind::Dock,
            Self::Undock => CommandKind::Undock,
            Self::EmergencyExit => CommandKind::EmergencyExit,
            Self::RefreshMapsCache => CommandKind::RefreshMapsCache,
            Self::SetRobotIp { .. } => CommandKind::SetRobotIp,
        }
    }
}

/// Resolved result of a dispatched command: the success flag plus the text
/// to surface (backend message, per-command fallback, or network error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
}

impl CommandOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic housekeeping (notice expiry)
    Tick,

    /// Issued once at startup (and again after an emergency reload)
    Bootstrap { robot_ip: Option<String> },

    /// Exit the console
    Quit,

    /// Full application reload requested from the emergency overlay
    ReloadApp,

    // ─────────────────────────────────────────────────────────
    // Operator Intents
    // ─────────────────────────────────────────────────────────
    /// Switch to a specific tab
    SwitchTab(Tab),
    /// Cycle to the next tab
    NextTab,
    /// Manual network status refresh
    RefreshNetwork,
    /// Manual robot discovery
    DiscoverRobot,
    /// The START/STOP button: stop when navigation runs, resume otherwise
    ToggleRun,
    /// Issue a control command (guards applied in `update()`)
    Command(CommandKind),

    // ─────────────────────────────────────────────────────────
    // Map Selection Workflow
    // ─────────────────────────────────────────────────────────
    MapCursorNext,
    MapCursorPrev,
    ToggleSelectAtCursor,
    SelectAll,
    DeselectAll,
    Stitch,

    // ─────────────────────────────────────────────────────────
    // Fetch Lifecycle (from poller/fetch tasks)
    // ─────────────────────────────────────────────────────────
    /// A fetch went in flight; sets the slice's `loading` flag.
    RefreshStarted { kind: StatusKind, generation: u64 },

    /// One-shot network status result (Err carries the human message)
    NetworkStatusLoaded(Result<ConnectionStatus, String>),
    /// Robot discovery result
    RobotDiscovered(Result<RobotStatus, String>),
    /// Comprehensive status refreshes connection + robot slices together
    ComprehensiveStatusLoaded(Result<(ConnectionStatus, RobotStatus), String>),
    /// Battery poll result, tagged with the generation that issued it
    BatteryStatusLoaded {
        generation: u64,
        status: BatteryStatus,
    },
    StorageStatusLoaded(StorageStatus),
    EmergencyStatusLoaded(EmergencyStatus),
    /// Current-map poll result, tagged with the generation that issued it
    CurrentMapInfoLoaded {
        generation: u64,
        info: CurrentMapInfo,
    },
    /// Map list for the Maps / Map Stitch tabs
    MapsLoaded(Result<Vec<MapEntry>, String>),

    // ─────────────────────────────────────────────────────────
    // Command Completion
    // ─────────────────────────────────────────────────────────
    CommandFinished {
        command: CommandKind,
        outcome: CommandOutcome,
    },
}
