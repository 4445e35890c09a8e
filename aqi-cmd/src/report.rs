//! Single-reading commands: render text or JSON and print to stdout.

use aqi_core::advisory::{self, Alert};
use aqi_core::breath::{BreathScore, Conditions};
use aqi_core::category::Severity;
use aqi_core::comparison::Comparison;
use aqi_core::no2::No2Reading;
use aqi_core::{trend, trend_indicator, Classification};
use log::{debug, info, warn};
use serde::Serialize;

pub fn render_classification(classification: &Classification) -> String {
    let category = classification.category;
    format!(
        "AQI {} {} {} ({:.0}% of scale)\n\
         severity: {}\n\
         color: {}\n\
         {}\n\
         {}",
        classification.aqi,
        category.emoji,
        category.label,
        classification.percentage,
        category.severity,
        category.color,
        category.description,
        category.recommendation,
    )
}

pub fn run_classify(aqi: f64, scale_max: f64, json: bool) -> anyhow::Result<()> {
    let classification = Classification::of(aqi, scale_max);
    debug!("Classified {} as {}", aqi, classification.category.key);
    if json {
        println!("{}", serde_json::to_string_pretty(&classification)?);
    } else {
        println!("{}", render_classification(&classification));
    }
    Ok(())
}

pub fn render_trend(current: f64, previous: f64) -> String {
    let trend = trend(current, previous);
    format!(
        "{} {} ({:+})",
        trend_indicator(trend),
        trend,
        aqi_core::format(Some(current - previous))
    )
}

pub fn run_trend(current: f64, previous: f64) -> anyhow::Result<()> {
    println!("{}", render_trend(current, previous));
    Ok(())
}

pub fn render_no2(reading: &No2Reading) -> String {
    format!(
        "NO2 {:.2} ppb -> AQI {} {} {}",
        reading.ppb, reading.aqi, reading.category.emoji, reading.category.label
    )
}

pub fn run_no2(molecules: f64, json: bool) -> anyhow::Result<()> {
    let reading = No2Reading::from_column_density(molecules);
    info!("Converted {:e} molecules/cm² to {} ppb", molecules, reading.ppb);
    if json {
        println!("{}", serde_json::to_string_pretty(&reading)?);
    } else {
        println!("{}", render_no2(&reading));
    }
    Ok(())
}

pub fn render_comparison(comparison: &Comparison) -> String {
    format!(
        "satellite {:.2} ppb, ground {:.2} ppb\n\
         difference {:.2} ppb ({:.2}%), agreement: {}",
        comparison.satellite_ppb,
        comparison.ground_ppb,
        comparison.absolute_difference,
        comparison.deviation_percent,
        comparison.agreement.as_str(),
    )
}

pub fn run_compare(satellite_molecules: f64, ground_ppb: f64, json: bool) -> anyhow::Result<()> {
    let comparison = Comparison::from_column_density(satellite_molecules, ground_ppb);
    info!(
        "Comparison complete: {} agreement",
        comparison.agreement.as_str()
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("{}", render_comparison(&comparison));
    }
    Ok(())
}

/// Alert plus the guidance shown next to it.
#[derive(Debug, Serialize)]
pub struct AlertReport {
    #[serde(flatten)]
    pub alert: Alert,
    pub risk: Severity,
    pub sensitive_groups: &'static str,
    pub outdoor_activities: &'static str,
}

impl AlertReport {
    pub fn new(aqi: f64, threshold: f64, wind: Option<&str>) -> AlertReport {
        AlertReport {
            alert: Alert::evaluate(aqi, threshold),
            risk: advisory::risk(aqi, wind),
            sensitive_groups: advisory::sensitive_group_advice(aqi),
            outdoor_activities: advisory::activity_recommendation(aqi),
        }
    }
}

pub fn render_alert(report: &AlertReport) -> String {
    let alert = &report.alert;
    let mut lines = Vec::new();
    if let Some(headline) = &alert.headline {
        lines.push(headline.clone());
    }
    lines.push(alert.message.clone());
    lines.push(format!("risk: {}", report.risk));
    lines.push(format!("sensitive groups: {}", report.sensitive_groups));
    lines.push(format!("outdoor activities: {}", report.outdoor_activities));
    for action in &alert.actions {
        lines.push(format!("- {}", action));
    }
    lines.join("\n")
}

pub fn run_alert(aqi: f64, threshold: f64, wind: Option<&str>, json: bool) -> anyhow::Result<()> {
    let report = AlertReport::new(aqi, threshold, wind);
    if report.alert.active {
        warn!("Alert triggered: AQI {} above {}", aqi, threshold);
    } else {
        info!("No alert: AQI {} within {}", aqi, threshold);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_alert(&report));
    }
    Ok(())
}

pub fn render_breath(result: &BreathScore) -> String {
    let breakdown = &result.breakdown;
    let mut lines = vec![
        format!("Breath score {:.1} {} {}", result.score, result.mask.icon, result.rating),
        format!(
            "base {:.1}, pollutants -{:.1}, wildfire -{:.1}, weather {:+.1}",
            breakdown.base_score,
            breakdown.pollutant_penalty,
            breakdown.wildfire_penalty,
            breakdown.weather_modifier
        ),
        format!("mask: {}", result.mask.kind),
        result.mask.message.to_string(),
        format!(
            "outdoors: {} ({}, {})",
            result.outdoor_activity.level,
            result.outdoor_activity.duration,
            result.outdoor_activity.intensity
        ),
    ];
    let guidance = result.age_guidance;
    for line in [guidance.children, guidance.adults, guidance.seniors, guidance.sensitive] {
        lines.push(line.to_string());
    }
    for factor in &result.risk_factors {
        lines.push(format!("- {}", factor));
    }
    lines.join("\n")
}

pub fn run_breath(conditions: &Conditions, json: bool) -> anyhow::Result<()> {
    let result = BreathScore::calculate(conditions);
    info!("Breath score {} ({})", result.score, result.rating);
    if result.mask.required {
        warn!("Mask required: {}", result.mask.kind);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_breath(&result));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqi_core::DEFAULT_SCALE_MAX;

    #[test]
    fn test_render_classification() {
        let text = render_classification(&Classification::of(150.0, DEFAULT_SCALE_MAX));
        assert!(text.starts_with("AQI 150 😷 Unhealthy for Sensitive Groups (50% of scale)"));
        assert!(text.contains("severity: moderate"));
        assert!(text.contains("color: #ff7e00"));
    }

    #[test]
    fn test_render_trend() {
        assert_eq!(render_trend(80.0, 90.0), "↓ improving (-10)");
        assert_eq!(render_trend(95.0, 90.0), "→ stable (+5)");
        assert_eq!(render_trend(120.0, 90.0), "↑ deteriorating (+30)");
    }

    #[test]
    fn test_render_no2() {
        let reading = No2Reading::from_column_density(1e15);
        assert_eq!(render_no2(&reading), "NO2 20.00 ppb -> AQI 18 😊 Good");
    }

    #[test]
    fn test_render_comparison() {
        let text = render_comparison(&Comparison::new(24.0, 20.0));
        assert!(text.contains("difference 4.00 ppb (20.00%), agreement: moderate"));
    }

    #[test]
    fn test_alert_report() {
        let report = AlertReport::new(160.0, 100.0, Some("calm"));
        let text = render_alert(&report);
        assert!(text.starts_with("Air Quality Alert: Unhealthy"));
        assert!(text.contains("risk: high"));
        assert!(text.contains("- Wear an N95 mask outdoors"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["active"], true);
        assert_eq!(json["severity"], "high");
        assert_eq!(json["risk"], "high");
        assert_eq!(json["category"]["key"], "unhealthy");
    }

    #[test]
    fn test_render_breath() {
        let text = render_breath(&BreathScore::calculate(&Conditions::new(42.0)));
        assert!(text.starts_with("Breath score 89.4 🙂 Good"));
        assert!(text.contains("base 87.4, pollutants -0.0, wildfire -0.0, weather +2.0"));
        assert!(text.contains("mask: None (optional for sensitive groups)"));
        assert!(text.contains("outdoors: All activities safe (Unlimited, Any intensity)"));
        assert!(text.ends_with("- No significant respiratory risks detected"));
    }

    #[test]
    fn test_quiet_alert_report() {
        let report = AlertReport::new(42.0, 100.0, None);
        let text = render_alert(&report);
        assert!(text.starts_with("Air quality is within safe limits (AQI: 42)"));
        assert!(!text.contains("- "));
    }
}
