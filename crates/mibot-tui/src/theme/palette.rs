//! Color palette for the console theme.

use ratatui::style::Color;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_OK: Color = Color::Green;
pub const STATUS_ALERT: Color = Color::Red;
pub const STATUS_WARNING: Color = Color::Yellow;
pub const STATUS_INFO: Color = Color::Blue;

// --- Map art tiles, cycled by palette index ---
pub const MAP_ART: [Color; 4] = [Color::Cyan, Color::Magenta, Color::Blue, Color::Green];

// --- Emergency overlay ---
pub const EMERGENCY_FG: Color = Color::Red;
pub const OVERLAY_DIM: Color = Color::DarkGray;
