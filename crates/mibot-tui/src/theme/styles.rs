//! Semantic style builders: the pure view-state reducer over status slices.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use mibot_core::notice::NoticeLevel;
use mibot_core::status::{ChargingState, MapArt};

use super::palette;

// --- Text styles ---
pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

// --- Battery bucket ---

/// Battery percentage bucketed into three colors: below 20 alert, below 50
/// warning, otherwise ok. Missing readings render muted.
pub fn battery_style(percent: Option<u8>) -> Style {
    match percent {
        Some(p) if p < 20 => Style::default().fg(palette::STATUS_ALERT),
        Some(p) if p < 50 => Style::default().fg(palette::STATUS_WARNING),
        Some(_) => Style::default().fg(palette::STATUS_OK),
        None => text_muted(),
    }
}

pub fn charging_style(charging: Option<ChargingState>) -> Style {
    match charging {
        Some(c) if c.is_charging() => Style::default().fg(palette::STATUS_OK),
        Some(_) => text_secondary(),
        None => text_muted(),
    }
}

// --- Connectivity indicators ---

pub fn connection_style(connected: bool) -> Style {
    if connected {
        Style::default().fg(palette::STATUS_OK)
    } else {
        Style::default().fg(palette::STATUS_ALERT)
    }
}

/// Robot indicator: connected green, found-but-unreachable yellow,
/// missing red.
pub fn robot_style(connected: bool, found: bool) -> Style {
    if connected {
        Style::default().fg(palette::STATUS_OK)
    } else if found {
        Style::default().fg(palette::STATUS_WARNING)
    } else {
        Style::default().fg(palette::STATUS_ALERT)
    }
}

/// Robot indicator label matching [`robot_style`].
pub fn robot_label(connected: bool, found: bool) -> &'static str {
    if connected {
        "Robot Connected"
    } else if found {
        "Robot Found"
    } else {
        "Robot Not Found"
    }
}

// --- Run flag ---

pub fn run_indicator(nav_running: bool) -> (&'static str, Style) {
    if nav_running {
        (
            "■ STOP",
            Style::default()
                .fg(palette::STATUS_ALERT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "▶ START",
            Style::default()
                .fg(palette::STATUS_OK)
                .add_modifier(Modifier::BOLD),
        )
    }
}

// --- Notices ---

pub fn notice_style(level: NoticeLevel) -> Style {
    let color = match level {
        NoticeLevel::Info => palette::STATUS_INFO,
        NoticeLevel::Success => palette::STATUS_OK,
        NoticeLevel::Warning => palette::STATUS_WARNING,
        NoticeLevel::Error => palette::STATUS_ALERT,
    };
    Style::default().fg(color)
}

// --- Map art ---

pub fn map_art_style(art: MapArt) -> Style {
    Style::default().fg(palette::MAP_ART[art.palette_index % palette::MAP_ART.len()])
}

// --- Block builders ---

pub fn panel_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Style::default().fg(palette::BORDER_ACTIVE)
        } else {
            Style::default().fg(palette::BORDER_DIM)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_buckets() {
        assert_eq!(
            battery_style(Some(15)).fg,
            Some(palette::STATUS_ALERT),
            "15% is the alert bucket"
        );
        assert_eq!(battery_style(Some(19)).fg, Some(palette::STATUS_ALERT));
        assert_eq!(battery_style(Some(20)).fg, Some(palette::STATUS_WARNING));
        assert_eq!(battery_style(Some(49)).fg, Some(palette::STATUS_WARNING));
        assert_eq!(battery_style(Some(50)).fg, Some(palette::STATUS_OK));
        assert_eq!(battery_style(Some(100)).fg, Some(palette::STATUS_OK));
        assert_eq!(battery_style(None).fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_charging_labels_and_styles() {
        assert_eq!(ChargingState::NotCharging.label(), "Not Charging");
        assert_eq!(
            charging_style(Some(ChargingState::Charging)).fg,
            Some(palette::STATUS_OK)
        );
        assert_eq!(
            charging_style(Some(ChargingState::NotCharging)).fg,
            Some(palette::TEXT_SECONDARY)
        );
    }

    #[test]
    fn test_robot_indicator_tiers() {
        assert_eq!(robot_style(true, true).fg, Some(palette::STATUS_OK));
        assert_eq!(robot_style(false, true).fg, Some(palette::STATUS_WARNING));
        assert_eq!(robot_style(false, false).fg, Some(palette::STATUS_ALERT));
        assert_eq!(robot_label(false, true), "Robot Found");
    }

    #[test]
    fn test_map_art_palette_wraps() {
        let art = MapArt {
            palette_index: 7,
            glyph: '▤',
        };
        // Out-of-range indexes wrap instead of panicking.
        let _ = map_art_style(art);
    }
}
