//! Health guidance and alerting built on top of the category table.

use crate::category::{AqiCategory, Severity, CATEGORIES};
use crate::scale::classify;
use serde::Serialize;

/// AQI above which an alert is raised unless the caller picks another threshold.
pub const DEFAULT_ALERT_THRESHOLD: f64 = 100.0;

const HIGH_ALERT_AQI: f64 = 150.0;
const DETERIORATING_FORECAST_AQI: f64 = 120.0;

/// Index of the band `aqi` falls in, 0 (Good) through 5 (Hazardous).
fn band(aqi: f64) -> usize {
    let category = classify(aqi);
    CATEGORIES
        .iter()
        .position(|c| c.key == category.key)
        .unwrap_or(0)
}

pub fn sensitive_group_advice(aqi: f64) -> &'static str {
    match band(aqi) {
        0 => "Safe for all sensitive groups",
        1 => "Unusually sensitive individuals should consider reducing prolonged outdoor exertion",
        2 => "Children, elderly, and people with respiratory conditions should limit outdoor activities",
        3 => "Sensitive groups should avoid all outdoor activities",
        _ => "Sensitive groups must remain indoors with air filtration",
    }
}

pub fn activity_recommendation(aqi: f64) -> &'static str {
    match band(aqi) {
        0 => "Perfect for all outdoor activities: enjoy your day!",
        1 => "Good for outdoor activities: normal schedule recommended",
        2 => "Consider rescheduling intensive outdoor exercise to morning hours",
        3 => "Move outdoor activities indoors if possible",
        _ => "Cancel all outdoor activities: remain indoors",
    }
}

/// Actions to attach to an alert. Lists grow as the AQI crosses 100, 150 and 200.
pub fn alert_actions(aqi: f64) -> Vec<&'static str> {
    let mut actions = Vec::new();
    let band = band(aqi);
    if band >= 2 {
        actions.push("Check AQI before going outside");
        actions.push("Keep windows closed during peak pollution hours");
    }
    if band >= 3 {
        actions.push("Wear an N95 mask outdoors");
        actions.push("Avoid outdoor exercise");
        actions.push("Use air purifiers indoors");
    }
    if band >= 4 {
        actions.push("Stay indoors as much as possible");
        actions.push("Seek medical attention if experiencing symptoms");
    }
    actions
}

/// Calm air, reported either as "Calm" or a zero wind speed.
fn is_stagnant(wind: &str) -> bool {
    if wind.to_ascii_lowercase().contains("calm") {
        return true;
    }
    wind.split_whitespace()
        .next()
        .and_then(|speed| speed.parse::<f64>().ok())
        .is_some_and(|speed| speed == 0.0)
}

/// Overall risk tier for a reading. Stagnant air pushes Low and Moderate up a tier.
pub fn risk(aqi: f64, wind: Option<&str>) -> Severity {
    let base = classify(aqi).severity;
    match (base, wind) {
        (Severity::Low | Severity::Moderate, Some(wind)) if is_stagnant(wind) => base.escalate(),
        _ => base,
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Moderate,
    High,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastTrend {
    Deteriorating,
    Elevated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub active: bool,
    pub aqi: f64,
    pub threshold: f64,
    pub category: &'static AqiCategory,
    pub severity: Option<AlertSeverity>,
    pub headline: Option<String>,
    pub message: String,
    pub actions: Vec<&'static str>,
    pub forecast_trend: Option<ForecastTrend>,
}

impl Alert {
    /// Raise an alert when `aqi` is strictly above `threshold`.
    pub fn evaluate(aqi: f64, threshold: f64) -> Alert {
        let category = classify(aqi);
        let active = aqi > threshold;
        if !active {
            return Alert {
                active: false,
                aqi,
                threshold,
                category,
                severity: None,
                headline: None,
                message: format!("Air quality is within safe limits (AQI: {})", aqi.round()),
                actions: Vec::new(),
                forecast_trend: None,
            };
        }
        let severity = if aqi > HIGH_ALERT_AQI {
            AlertSeverity::High
        } else {
            AlertSeverity::Moderate
        };
        let forecast_trend = if aqi > DETERIORATING_FORECAST_AQI {
            ForecastTrend::Deteriorating
        } else {
            ForecastTrend::Elevated
        };
        Alert {
            active,
            aqi,
            threshold,
            category,
            severity: Some(severity),
            headline: Some(format!("Air Quality Alert: {}", category.label)),
            message: format!("AQI is predicted to reach {}.", aqi.round()),
            actions: alert_actions(aqi),
            forecast_trend: Some(forecast_trend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_group_advice_follows_bands() {
        assert_eq!(sensitive_group_advice(50.0), "Safe for all sensitive groups");
        assert!(sensitive_group_advice(51.0).starts_with("Unusually sensitive"));
        assert!(sensitive_group_advice(150.0).starts_with("Children"));
        assert_eq!(sensitive_group_advice(250.0), sensitive_group_advice(450.0));
    }

    #[test]
    fn test_activity_recommendation() {
        assert_eq!(
            activity_recommendation(-3.0),
            "Perfect for all outdoor activities: enjoy your day!"
        );
        assert_eq!(
            activity_recommendation(75.0),
            "Good for outdoor activities: normal schedule recommended"
        );
        assert_eq!(
            activity_recommendation(320.0),
            "Cancel all outdoor activities: remain indoors"
        );
        assert_eq!(
            activity_recommendation(180.0),
            "Move outdoor activities indoors if possible"
        );
    }

    #[test]
    fn test_alert_actions_accumulate() {
        assert!(alert_actions(100.0).is_empty());
        assert_eq!(alert_actions(101.0).len(), 2);
        assert_eq!(alert_actions(151.0).len(), 5);
        assert_eq!(alert_actions(201.0).len(), 7);
        assert_eq!(alert_actions(480.0), alert_actions(201.0));
    }

    #[test]
    fn test_risk_escalates_in_calm_air() {
        assert_eq!(risk(40.0, None), Severity::Minimal);
        assert_eq!(risk(40.0, Some("calm")), Severity::Minimal);
        assert_eq!(risk(80.0, Some("Calm")), Severity::Moderate);
        assert_eq!(risk(120.0, Some("0 mph")), Severity::High);
        assert_eq!(risk(120.0, Some("12 mph")), Severity::Moderate);
        assert_eq!(risk(120.0, Some("10 mph")), Severity::Moderate);
        assert_eq!(risk(180.0, Some("calm")), Severity::High);
        assert_eq!(risk(350.0, None), Severity::Severe);
    }

    #[test]
    fn test_alert_inactive_at_threshold() {
        let alert = Alert::evaluate(100.0, DEFAULT_ALERT_THRESHOLD);
        assert!(!alert.active);
        assert!(alert.actions.is_empty());
        assert_eq!(alert.message, "Air quality is within safe limits (AQI: 100)");
    }

    #[test]
    fn test_alert_active() {
        let alert = Alert::evaluate(110.0, DEFAULT_ALERT_THRESHOLD);
        assert!(alert.active);
        assert_eq!(alert.severity, Some(AlertSeverity::Moderate));
        assert_eq!(alert.forecast_trend, Some(ForecastTrend::Elevated));
        assert_eq!(
            alert.headline.as_deref(),
            Some("Air Quality Alert: Unhealthy for Sensitive Groups")
        );

        let alert = Alert::evaluate(160.0, DEFAULT_ALERT_THRESHOLD);
        assert_eq!(alert.severity, Some(AlertSeverity::High));
        assert_eq!(alert.forecast_trend, Some(ForecastTrend::Deteriorating));
        assert_eq!(alert.actions.len(), 5);
    }

    #[test]
    fn test_alert_custom_threshold() {
        let alert = Alert::evaluate(60.0, 50.0);
        assert!(alert.active);
        assert_eq!(alert.category.label, "Moderate");
        assert!(alert.actions.is_empty());
    }
}
