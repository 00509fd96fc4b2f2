//! # mibot-tui - Terminal UI for the MiBOT Operator Console
//!
//! This crate provides the ratatui-based terminal interface: terminal
//! lifecycle, keyboard event pumping, the render function over
//! [`mibot_app::AppState`], and the widget set (status header cards, tabs,
//! home/maps/stitch panels, notice bar, emergency lock-out overlay).
//!
//! The view layer is pure over the model: widgets derive labels and colors
//! from state and never mutate it.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

// Re-export main entry point
pub use runner::run;
