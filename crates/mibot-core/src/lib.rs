//! # mibot-core - Core Domain Types
//!
//! Foundation crate for the MiBOT operator console. Provides the status
//! entities reflected from the robot backend, operator notices, error
//! handling, and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Status Entities (`status`)
//! - [`ConnectionStatus`] - Device network connectivity
//! - [`RobotStatus`] - Robot discovery and reachability
//! - [`BatteryStatus`], [`ChargingState`] - Battery telemetry
//! - [`StorageStatus`] - Robot disk usage
//! - [`EmergencyStatus`], [`EmergencyState`] - Physical emergency stop state
//! - [`CurrentMapInfo`] - Live navigation map info
//! - [`MapEntry`], [`SelectedMap`], [`MapArt`] - Map list and stitch selection
//!
//! ### Notices (`notice`)
//! - [`Notice`], [`NoticeLevel`] - Transient operator feedback (the toast analog)
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use mibot_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod notice;
pub mod status;

/// Prelude for common imports used throughout all console crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use notice::{Notice, NoticeLevel};
pub use status::{
    BatteryStatus, ChargingState, ConnectionStatus, CurrentMapInfo, EmergencyState,
    EmergencyStatus, MapArt, MapEntry, RobotStatus, SelectedMap, StorageStatus,
};
