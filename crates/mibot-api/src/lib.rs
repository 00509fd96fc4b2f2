//! # mibot-api - Robot Backend Client
//!
//! HTTP client for the MiBOT backend service. Every backend reply uses a
//! uniform envelope: a `success` flag plus either domain fields or a
//! `message` string; this crate owns the wire types, the tolerant
//! deserialization the real backend requires (bool-or-int charging codes,
//! numeric-or-string map ids), and the conversion into the status slices
//! from [`mibot_core`].
//!
//! Depends on [`mibot_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Client
//! - [`ApiClient`] - One async method per backend operation
//!
//! ### Wire Types (`envelope`)
//! - [`CommandAck`] - Reply to fire-and-forget control commands
//! - [`NetworkStatusReply`], [`DiscoverReply`], [`ComprehensiveStatusReply`]
//! - [`BatteryReply`], [`StorageReply`], [`EmergencyReply`]
//! - [`MapsReply`], [`CurrentMapReply`], [`SetIpReply`]

pub mod client;
pub mod envelope;

pub use client::ApiClient;
pub use envelope::{
    BatteryReply, CommandAck, ComprehensiveStatusReply, CurrentMapReply, DiscoverReply,
    EmergencyReply, MapsReply, NetworkStatusReply, SetIpReply, StorageReply,
};
