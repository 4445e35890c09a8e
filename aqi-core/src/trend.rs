use serde::Serialize;
use std::fmt;

/// AQI change (in index points) that must be exceeded before a trend is reported.
pub const TREND_THRESHOLD: f64 = 5.0;

/// Direction of travel between two readings. Lower AQI is better.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Deteriorating,
    Stable,
}

impl Trend {
    /// Parse a trend name, falling back to `Stable` for anything unrecognized.
    pub fn parse_lenient(name: &str) -> Trend {
        match name.trim().to_ascii_lowercase().as_str() {
            "improving" => Trend::Improving,
            "deteriorating" => Trend::Deteriorating,
            _ => Trend::Stable,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Deteriorating => "deteriorating",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare two readings. Changes of exactly 5 points or less are `Stable`.
pub fn trend(current: f64, previous: f64) -> Trend {
    let difference = current - previous;
    if difference < -TREND_THRESHOLD {
        Trend::Improving
    } else if difference > TREND_THRESHOLD {
        Trend::Deteriorating
    } else {
        Trend::Stable
    }
}

pub fn trend_indicator(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "↓",
        Trend::Deteriorating => "↑",
        Trend::Stable => "→",
    }
}
