use serde::Serialize;
use std::fmt;

/// Alert-priority tier derived from an AQI category.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Minimal,
    Low,
    Moderate,
    High,
    Severe,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Minimal => "minimal",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::Severe => "severe",
        }
    }

    /// One tier up, saturating at `Severe`.
    pub fn escalate(self) -> Severity {
        match self {
            Severity::Minimal => Severity::Low,
            Severity::Low => Severity::Moderate,
            Severity::Moderate => Severity::High,
            Severity::High | Severity::Severe => Severity::Severe,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the six EPA AQI bands.
///
/// Bounds are inclusive. The last band has no upper bound.
/// See: <https://www.airnow.gov/aqi/aqi-basics/>
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct AqiCategory {
    /// Stable machine-readable name, e.g. "unhealthy_sensitive"
    pub key: &'static str,
    pub lower: u32,
    /// `None` for the open-ended top band
    pub upper: Option<u32>,
    pub color: &'static str,
    pub gradient_start: &'static str,
    pub gradient_end: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
    pub severity: Severity,
    pub emoji: &'static str,
}

pub const GOOD: AqiCategory = AqiCategory {
    key: "good",
    lower: 0,
    upper: Some(50),
    color: "#00e400",
    gradient_start: "#00e400",
    gradient_end: "#7ef07e",
    label: "Good",
    description: "Air quality is satisfactory, and air pollution poses little or no risk.",
    recommendation: "It's a great day to be active outside.",
    severity: Severity::Minimal,
    emoji: "😊",
};

pub const MODERATE: AqiCategory = AqiCategory {
    key: "moderate",
    lower: 51,
    upper: Some(100),
    color: "#ffff00",
    gradient_start: "#ffff00",
    gradient_end: "#ffd84d",
    label: "Moderate",
    description: "Air quality is acceptable. However, there may be a risk for some people, \
                  particularly those who are unusually sensitive to air pollution.",
    recommendation: "Unusually sensitive people should consider making outdoor activities shorter \
                     and less intense.",
    severity: Severity::Low,
    emoji: "🙂",
};

pub const UNHEALTHY_SENSITIVE: AqiCategory = AqiCategory {
    key: "unhealthy_sensitive",
    lower: 101,
    upper: Some(150),
    color: "#ff7e00",
    gradient_start: "#ff7e00",
    gradient_end: "#ffb366",
    label: "Unhealthy for Sensitive Groups",
    description: "Members of sensitive groups may experience health effects. \
                  The general public is less likely to be affected.",
    recommendation: "Sensitive groups should reduce prolonged or heavy outdoor exertion.",
    severity: Severity::Moderate,
    emoji: "😷",
};

pub const UNHEALTHY: AqiCategory = AqiCategory {
    key: "unhealthy",
    lower: 151,
    upper: Some(200),
    color: "#ff0000",
    gradient_start: "#ff0000",
    gradient_end: "#ff6b6b",
    label: "Unhealthy",
    description: "Some members of the general public may experience health effects; \
                  members of sensitive groups may experience more serious health effects.",
    recommendation: "Everyone should reduce prolonged or heavy outdoor exertion. \
                     Sensitive groups should avoid it.",
    severity: Severity::High,
    emoji: "😨",
};

pub const VERY_UNHEALTHY: AqiCategory = AqiCategory {
    key: "very_unhealthy",
    lower: 201,
    upper: Some(300),
    color: "#8f3f97",
    gradient_start: "#8f3f97",
    gradient_end: "#c17ac9",
    label: "Very Unhealthy",
    description: "Health alert: the risk of health effects is increased for everyone.",
    recommendation: "Avoid all physical activity outdoors. Move activities indoors.",
    severity: Severity::Severe,
    emoji: "⚠️",
};

pub const HAZARDOUS: AqiCategory = AqiCategory {
    key: "hazardous",
    lower: 301,
    upper: None,
    color: "#7e0023",
    gradient_start: "#7e0023",
    gradient_end: "#b3334f",
    label: "Hazardous",
    description: "Health warning of emergency conditions: everyone is more likely to be affected.",
    recommendation: "Everyone should stay indoors with windows closed and run an air purifier.",
    severity: Severity::Severe,
    emoji: "☢️",
};

/// The category table in ascending order of bounds.
pub static CATEGORIES: [AqiCategory; 6] = [
    GOOD,
    MODERATE,
    UNHEALTHY_SENSITIVE,
    UNHEALTHY,
    VERY_UNHEALTHY,
    HAZARDOUS,
];

impl AqiCategory {
    /// Look a band up by its `key`.
    pub fn from_key(key: &str) -> Option<&'static AqiCategory> {
        CATEGORIES.iter().find(|category| category.key == key)
    }

    /// CSS two-stop gradient for card backgrounds.
    pub(crate) fn css_gradient(&self) -> String {
        format!(
            "linear-gradient(135deg, {} 0%, {} 100%)",
            self.gradient_start, self.gradient_end
        )
    }

    pub fn contains(&self, aqi: f64) -> bool {
        aqi >= f64::from(self.lower)
            && match self.upper {
                Some(upper) => aqi <= f64::from(upper),
                None => true,
            }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}
