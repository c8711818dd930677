//! Render projection of a timer snapshot
//!
//! Pure functions only: every host surface turns a `TimerSnapshot` into a
//! `RenderSnapshot` here and draws from that.

use serde::{Deserialize, Serialize};

use super::timer_engine::TimerSnapshot;

/// Progress fraction at which the bar turns from Low to Mid.
pub const MID_THRESHOLD: f64 = 0.5;
/// Progress fraction at which the bar turns from Mid to High.
pub const HIGH_THRESHOLD: f64 = 0.8;

/// Discrete bar color category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Low,
    Mid,
    High,
}

impl ColorBand {
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= HIGH_THRESHOLD {
            ColorBand::High
        } else if fraction >= MID_THRESHOLD {
            ColorBand::Mid
        } else {
            ColorBand::Low
        }
    }

    /// Fill color for the progress bar (green, amber, red)
    pub fn css_color(&self) -> &'static str {
        match self {
            ColorBand::Low => "#22c55e",
            ColorBand::Mid => "#f59e0b",
            ColorBand::High => "#ef4444",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBand::Low => "low",
            ColorBand::Mid => "mid",
            ColorBand::High => "high",
        }
    }
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub remaining_seconds: u64,
    pub progress_fraction: f64,
    pub color_band: ColorBand,
    pub formatted_time: String,
}

/// Project a timer snapshot into renderable data.
pub fn project(snapshot: &TimerSnapshot) -> RenderSnapshot {
    let remaining_seconds = snapshot
        .total_seconds
        .saturating_sub(snapshot.current_seconds);
    let progress_fraction = progress_fraction(snapshot.current_seconds, snapshot.total_seconds);

    RenderSnapshot {
        remaining_seconds,
        progress_fraction,
        color_band: ColorBand::from_fraction(progress_fraction),
        formatted_time: format_time(remaining_seconds),
    }
}

/// Elapsed share of the total, clamped to `0.0..=1.0`.
pub fn progress_fraction(current_seconds: u64, total_seconds: u64) -> f64 {
    // Engine guarantees a positive total
    if total_seconds == 0 {
        return 0.0;
    }
    (current_seconds as f64 / total_seconds as f64).clamp(0.0, 1.0)
}

/// Format seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
