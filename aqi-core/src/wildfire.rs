//! Active fire detections near a point of interest.
//!
//! Detections come from satellite thermal anomaly products (FIRMS): a
//! position, a brightness temperature in Kelvin and a detection confidence
//! in percent.

use serde::Serialize;
use std::fmt;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// How far from the origin detections are kept unless the caller says otherwise.
pub const DEFAULT_SEARCH_RADIUS_KM: f64 = 100.0;

/// Great-circle distance between two points in decimal degrees (haversine).
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FireSeverity {
    Low,
    Moderate,
    High,
    Extreme,
}

impl FireSeverity {
    /// Extreme needs both a hot and a confident detection; the lower tiers
    /// accept either.
    pub fn from_detection(brightness_k: f64, confidence: f64) -> FireSeverity {
        if brightness_k >= 380.0 && confidence >= 80.0 {
            FireSeverity::Extreme
        } else if brightness_k >= 360.0 || confidence >= 70.0 {
            FireSeverity::High
        } else if brightness_k >= 340.0 || confidence >= 50.0 {
            FireSeverity::Moderate
        } else {
            FireSeverity::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FireSeverity::Low => "low",
            FireSeverity::Moderate => "moderate",
            FireSeverity::High => "high",
            FireSeverity::Extreme => "extreme",
        }
    }
}

impl fmt::Display for FireSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw detection as reported by the satellite product.
#[derive(Debug, Clone, PartialEq)]
pub struct FireDetection {
    pub latitude: f64,
    pub longitude: f64,
    pub brightness: f64,
    pub confidence: f64,
}

/// A detection placed relative to an origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fire {
    pub latitude: f64,
    pub longitude: f64,
    pub brightness: f64,
    pub confidence: f64,
    pub distance_km: f64,
    pub severity: FireSeverity,
}

impl Fire {
    pub fn locate(detection: &FireDetection, origin_lat: f64, origin_lon: f64) -> Fire {
        let distance = distance_km(
            origin_lat,
            origin_lon,
            detection.latitude,
            detection.longitude,
        );
        Fire {
            latitude: detection.latitude,
            longitude: detection.longitude,
            brightness: detection.brightness,
            confidence: detection.confidence,
            distance_km: (distance * 100.0).round() / 100.0,
            severity: FireSeverity::from_detection(detection.brightness, detection.confidence),
        }
    }
}

/// Detections within `radius_km` of the origin, closest first.
pub fn fires_within(
    detections: &[FireDetection],
    origin_lat: f64,
    origin_lon: f64,
    radius_km: f64,
) -> Vec<Fire> {
    let mut fires: Vec<Fire> = detections
        .iter()
        .map(|detection| Fire::locate(detection, origin_lat, origin_lon))
        .filter(|fire| fire.distance_km <= radius_km)
        .collect();
    fires.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    fires
}
