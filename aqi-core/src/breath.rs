//! Breath score: a 0..=100 respiratory comfort index.
//!
//! The score starts from a curve over AQI, loses points for individual
//! pollutants above their health thresholds and for nearby wildfires, and is
//! nudged by humidity and temperature. 100 is clean air.

use crate::scale::format;
use serde::Serialize;

/// Total pollutant penalty never exceeds this.
pub const MAX_POLLUTANT_PENALTY: f64 = 40.0;
pub const DEFAULT_HUMIDITY: f64 = 50.0;
/// Degrees Fahrenheit.
pub const DEFAULT_TEMPERATURE_F: f64 = 70.0;

/// Pollutant concentrations. PM in µg/m³, NO2/O3/SO2 in ppb, CO in ppm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pollutants {
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub co: Option<f64>,
    pub so2: Option<f64>,
}

/// Everything the score is computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub aqi: f64,
    pub pollutants: Pollutants,
    /// Distance to the closest active fire, if any fire was detected.
    pub wildfire_distance_km: Option<f64>,
    pub humidity: f64,
    pub temperature_f: f64,
}

impl Conditions {
    pub fn new(aqi: f64) -> Conditions {
        Conditions {
            aqi,
            pollutants: Pollutants::default(),
            wildfire_distance_km: None,
            humidity: DEFAULT_HUMIDITY,
            temperature_f: DEFAULT_TEMPERATURE_F,
        }
    }
}

/// Score before penalties. Steeper losses in the unhealthy bands.
pub fn base_score(aqi: f64) -> f64 {
    if aqi <= 50.0 {
        100.0 - (aqi / 50.0) * 15.0
    } else if aqi <= 100.0 {
        85.0 - ((aqi - 50.0) / 50.0) * 15.0
    } else if aqi <= 150.0 {
        70.0 - ((aqi - 100.0) / 50.0) * 20.0
    } else if aqi <= 200.0 {
        50.0 - ((aqi - 150.0) / 50.0) * 20.0
    } else if aqi <= 300.0 {
        30.0 - ((aqi - 200.0) / 100.0) * 20.0
    } else {
        (10.0 - ((aqi - 300.0) / 200.0) * 10.0).max(0.0)
    }
}

fn excess(value: Option<f64>, threshold: f64, weight: f64) -> Option<f64> {
    match value {
        Some(v) if v > threshold => Some((v - threshold) * weight),
        _ => None,
    }
}

/// Each pollutant contributes from its highest exceeded threshold only.
pub fn pollutant_penalty(pollutants: &Pollutants) -> f64 {
    let pm25 = excess(pollutants.pm25, 35.4, 0.3).or_else(|| excess(pollutants.pm25, 12.0, 0.1));
    let pm10 = excess(pollutants.pm10, 154.0, 0.2).or_else(|| excess(pollutants.pm10, 54.0, 0.05));
    let no2 = excess(pollutants.no2, 100.0, 0.15).or_else(|| excess(pollutants.no2, 53.0, 0.05));
    let o3 = excess(pollutants.o3, 70.0, 0.2);
    let co = excess(pollutants.co, 9.0, 2.0).or_else(|| excess(pollutants.co, 4.4, 0.5));
    let so2 = excess(pollutants.so2, 75.0, 0.25);

    let total: f64 = [pm25, pm10, no2, o3, co, so2].iter().flatten().sum();
    total.min(MAX_POLLUTANT_PENALTY)
}

pub fn wildfire_penalty(distance_km: Option<f64>) -> f64 {
    match distance_km {
        Some(d) if d < 10.0 => 30.0,
        Some(d) if d < 25.0 => 20.0,
        Some(d) if d < 50.0 => 12.0,
        Some(d) if d < 100.0 => 5.0,
        _ => 0.0,
    }
}

/// Comfortable humidity earns a small bonus; extremes cost points.
pub fn weather_modifier(humidity: f64, temperature_f: f64) -> f64 {
    let mut modifier = 0.0;
    if (30.0..=60.0).contains(&humidity) {
        modifier += 2.0;
    } else if !(20.0..=80.0).contains(&humidity) {
        modifier -= 3.0;
    }
    if !(32.0..=95.0).contains(&temperature_f) {
        modifier -= 2.0;
    }
    modifier
}

/// Protective equipment advice for a score band.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct MaskRecommendation {
    pub min_score: u8,
    pub required: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub rating: &'static str,
    pub message: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Descending by `min_score`; the last entry catches everything.
pub static MASK_RECOMMENDATIONS: [MaskRecommendation; 7] = [
    MaskRecommendation {
        min_score: 90,
        required: false,
        kind: "None",
        rating: "Excellent",
        message: "😊 Perfect air! Breathe freely without any protection.",
        icon: "😊",
        color: "#10b981",
    },
    MaskRecommendation {
        min_score: 75,
        required: false,
        kind: "None (optional for sensitive groups)",
        rating: "Good",
        message: "🙂 Good air quality. Mask optional for sensitive individuals.",
        icon: "🙂",
        color: "#3b82f6",
    },
    MaskRecommendation {
        min_score: 60,
        required: false,
        kind: "Cloth mask (optional)",
        rating: "Moderate",
        message: "😐 Moderate air. Consider a cloth mask for prolonged outdoor activity.",
        icon: "😐",
        color: "#f59e0b",
    },
    MaskRecommendation {
        min_score: 45,
        required: true,
        kind: "KN95 or surgical mask",
        rating: "Unhealthy for Sensitive Groups",
        message: "😷 Mask recommended! Use KN95 or surgical mask outdoors.",
        icon: "😷",
        color: "#f97316",
    },
    MaskRecommendation {
        min_score: 30,
        required: true,
        kind: "N95 mask (properly fitted)",
        rating: "Unhealthy",
        message: "😨 Air quality poor. N95 mask required for outdoor activities.",
        icon: "😨",
        color: "#ef4444",
    },
    MaskRecommendation {
        min_score: 15,
        required: true,
        kind: "N95/P100 respirator",
        rating: "Very Unhealthy",
        message: "⚠️ Dangerous air! N95/P100 respirator essential. Limit outdoor time.",
        icon: "⚠️",
        color: "#dc2626",
    },
    MaskRecommendation {
        min_score: 0,
        required: true,
        kind: "P100 respirator + stay indoors",
        rating: "Hazardous",
        message: "☢️ HAZARDOUS! Stay indoors. P100 respirator if you must go out.",
        icon: "☢️",
        color: "#991b1b",
    },
];

/// First band whose floor the score reaches, so 89.4 is Good.
pub fn mask_recommendation(score: f64) -> &'static MaskRecommendation {
    MASK_RECOMMENDATIONS
        .iter()
        .find(|mask| score >= f64::from(mask.min_score))
        .unwrap_or(&MASK_RECOMMENDATIONS[MASK_RECOMMENDATIONS.len() - 1])
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct AgeGuidance {
    pub children: &'static str,
    pub adults: &'static str,
    pub seniors: &'static str,
    pub sensitive: &'static str,
}

static AGE_GUIDANCE: [(f64, AgeGuidance); 4] = [
    (
        75.0,
        AgeGuidance {
            children: "👶 Safe for outdoor play and sports",
            adults: "🏃 All outdoor activities safe",
            seniors: "👴 Normal outdoor activities fine",
            sensitive: "🫁 Safe for those with respiratory conditions",
        },
    ),
    (
        60.0,
        AgeGuidance {
            children: "👶 Outdoor play OK, but watch for symptoms",
            adults: "🏃 Reduce prolonged outdoor exertion",
            seniors: "👴 Take breaks during outdoor activities",
            sensitive: "🫁 Limit outdoor exposure, use inhaler if needed",
        },
    ),
    (
        45.0,
        AgeGuidance {
            children: "👶 Limit outdoor play, stay indoors when possible",
            adults: "🏃 Avoid strenuous outdoor activities",
            seniors: "👴 Stay indoors, use air purifier",
            sensitive: "🫁 Avoid outdoor exposure, keep rescue medication handy",
        },
    ),
    (
        f64::NEG_INFINITY,
        AgeGuidance {
            children: "👶 Keep children indoors, close windows",
            adults: "🏃 Avoid all outdoor activities",
            seniors: "👴 Stay indoors, seek medical help if symptoms appear",
            sensitive: "🫁 STAY INDOORS. Medical emergency if breathing difficulties",
        },
    ),
];

pub fn age_guidance(score: f64) -> &'static AgeGuidance {
    tier(&AGE_GUIDANCE, score)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub struct OutdoorActivity {
    pub level: &'static str,
    pub duration: &'static str,
    pub intensity: &'static str,
    pub message: &'static str,
    pub color: &'static str,
}

static OUTDOOR_ACTIVITY: [(f64, OutdoorActivity); 5] = [
    (
        85.0,
        OutdoorActivity {
            level: "All activities safe",
            duration: "Unlimited",
            intensity: "Any intensity",
            message: "✅ Perfect conditions for all outdoor activities",
            color: "#10b981",
        },
    ),
    (
        70.0,
        OutdoorActivity {
            level: "Most activities safe",
            duration: "Normal duration",
            intensity: "Moderate to high",
            message: "✅ Good for exercise, some may experience symptoms",
            color: "#3b82f6",
        },
    ),
    (
        55.0,
        OutdoorActivity {
            level: "Reduce prolonged exertion",
            duration: "< 2 hours",
            intensity: "Light to moderate",
            message: "⚠️ Limit intense outdoor workouts",
            color: "#f59e0b",
        },
    ),
    (
        40.0,
        OutdoorActivity {
            level: "Avoid outdoor exertion",
            duration: "< 30 minutes",
            intensity: "Light only",
            message: "🚫 Avoid outdoor exercise, short walks only",
            color: "#f97316",
        },
    ),
    (
        f64::NEG_INFINITY,
        OutdoorActivity {
            level: "Stay indoors",
            duration: "0",
            intensity: "None",
            message: "🚨 DO NOT go outside unless absolutely necessary",
            color: "#dc2626",
        },
    ),
];

pub fn outdoor_activity(score: f64) -> &'static OutdoorActivity {
    tier(&OUTDOOR_ACTIVITY, score)
}

fn tier<T, const N: usize>(table: &'static [(f64, T); N], score: f64) -> &'static T {
    table
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, entry)| entry)
        .unwrap_or(&table[N - 1].1)
}

/// Human-readable reasons the air may be hard on the lungs, in a fixed order.
pub fn risk_factors(conditions: &Conditions) -> Vec<String> {
    let mut factors = Vec::new();
    let pollutants = &conditions.pollutants;
    let above = |value: Option<f64>, limit: f64| value.map_or(false, |v| v > limit);

    if conditions.aqi > 150.0 {
        factors.push(format!("Very high AQI ({})", format(Some(conditions.aqi))));
    }
    if above(pollutants.pm25, 35.4) {
        factors.push("Elevated fine particulate matter (PM2.5)".to_string());
    }
    if above(pollutants.pm10, 154.0) {
        factors.push("High coarse particulate matter (PM10)".to_string());
    }
    if above(pollutants.o3, 70.0) {
        factors.push("Ground-level ozone exceeds safe limits".to_string());
    }
    if above(pollutants.no2, 100.0) {
        factors.push("Nitrogen dioxide pollution".to_string());
    }
    if let Some(distance) = conditions.wildfire_distance_km {
        if distance < 50.0 {
            factors.push(format!(
                "Active wildfire {}km away - smoke inhalation risk",
                format(Some(distance))
            ));
        }
    }
    if conditions.humidity > 80.0 {
        factors.push("High humidity may worsen respiratory symptoms".to_string());
    } else if conditions.humidity < 20.0 {
        factors.push("Low humidity - increased airway irritation".to_string());
    }
    if conditions.temperature_f > 95.0 {
        factors.push("Heat stress - affects breathing capacity".to_string());
    } else if conditions.temperature_f < 32.0 {
        factors.push("Cold air - may trigger asthma/bronchospasm".to_string());
    }

    if factors.is_empty() {
        factors.push("No significant respiratory risks detected".to_string());
    }
    factors
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Components of a breath score, each rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub base_score: f64,
    pub pollutant_penalty: f64,
    pub wildfire_penalty: f64,
    pub weather_modifier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreathScore {
    pub score: f64,
    pub rating: &'static str,
    pub mask: &'static MaskRecommendation,
    pub breakdown: Breakdown,
    pub risk_factors: Vec<String>,
    pub age_guidance: &'static AgeGuidance,
    pub outdoor_activity: &'static OutdoorActivity,
}

impl BreathScore {
    pub fn calculate(conditions: &Conditions) -> BreathScore {
        let base = base_score(conditions.aqi);
        let pollutant = pollutant_penalty(&conditions.pollutants);
        let wildfire = wildfire_penalty(conditions.wildfire_distance_km);
        let weather = weather_modifier(conditions.humidity, conditions.temperature_f);

        let score = (base - pollutant - wildfire + weather).clamp(0.0, 100.0);
        let mask = mask_recommendation(score);

        BreathScore {
            score: round_tenth(score),
            rating: mask.rating,
            mask,
            breakdown: Breakdown {
                base_score: round_tenth(base),
                pollutant_penalty: round_tenth(pollutant),
                wildfire_penalty: round_tenth(wildfire),
                weather_modifier: round_tenth(weather),
            },
            risk_factors: risk_factors(conditions),
            age_guidance: age_guidance(score),
            outdoor_activity: outdoor_activity(score),
        }
    }
}
