//! Command implementations for the AQI CLI.
//!
//! Provides subcommands for classifying single readings, converting satellite
//! NO2 measurements, comparing satellite and ground readings, evaluating
//! alerts, scoring breathing conditions, and working through CSV files: a
//! history of daily readings, an NO2 time series to forecast, and FIRMS fire
//! detections.

use aqi_core::advisory::DEFAULT_ALERT_THRESHOLD;
use aqi_core::breath::{Conditions, Pollutants, DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE_F};
use aqi_core::wildfire::DEFAULT_SEARCH_RADIUS_KM;
use aqi_core::DEFAULT_SCALE_MAX;
use clap::Subcommand;

pub mod fires;
pub mod forecast;
pub mod history;
pub mod report;

#[derive(Subcommand)]
pub enum Command {
    /// Classify a single AQI reading
    Classify {
        /// AQI value
        #[arg(allow_negative_numbers = true)]
        aqi: f64,

        /// Top of the progress-bar scale
        #[arg(long, default_value_t = DEFAULT_SCALE_MAX)]
        scale_max: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compare two readings and report the trend
    Trend {
        /// Current AQI
        #[arg(allow_negative_numbers = true)]
        current: f64,

        /// Previous AQI
        #[arg(allow_negative_numbers = true)]
        previous: f64,
    },

    /// Convert an NO2 column density (molecules/cm²) to AQI
    No2 {
        /// Tropospheric NO2 column, molecules/cm²
        #[arg(allow_negative_numbers = true)]
        molecules: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compare a satellite NO2 column with a ground station reading
    Compare {
        /// Satellite NO2 column, molecules/cm²
        #[arg(allow_negative_numbers = true)]
        satellite_molecules: f64,

        /// Ground station NO2, ppb
        #[arg(allow_negative_numbers = true)]
        ground_ppb: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Evaluate whether a reading should raise an alert
    Alert {
        /// AQI value
        #[arg(allow_negative_numbers = true)]
        aqi: f64,

        /// Alert when the AQI is above this value
        #[arg(short, long, default_value_t = DEFAULT_ALERT_THRESHOLD)]
        threshold: f64,

        /// Wind description, e.g. "Calm" or "5 mph"
        #[arg(short, long)]
        wind: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Score how easy the air is to breathe and what protection to wear
    Breath {
        /// AQI value
        #[arg(allow_negative_numbers = true)]
        aqi: f64,

        /// PM2.5, µg/m³
        #[arg(long)]
        pm25: Option<f64>,

        /// PM10, µg/m³
        #[arg(long)]
        pm10: Option<f64>,

        /// NO2, ppb
        #[arg(long)]
        no2: Option<f64>,

        /// Ozone, ppb
        #[arg(long)]
        o3: Option<f64>,

        /// Carbon monoxide, ppm
        #[arg(long)]
        co: Option<f64>,

        /// SO2, ppb
        #[arg(long)]
        so2: Option<f64>,

        /// Distance to the closest active fire, km
        #[arg(long)]
        fire_distance: Option<f64>,

        /// Relative humidity, %
        #[arg(long, default_value_t = DEFAULT_HUMIDITY)]
        humidity: f64,

        /// Temperature, °F
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE_F, allow_negative_numbers = true)]
        temperature: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Forecast NO2 24 hours past a CSV time series (columns: timestamp,no2)
    Forecast {
        /// Input CSV path
        #[arg(short = 'i', long)]
        input: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List FIRMS fire detections near a location
    Fires {
        /// FIRMS CSV export path
        #[arg(short = 'i', long)]
        input: String,

        /// Latitude, decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude, decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Search radius, km
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_RADIUS_KM)]
        radius: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Classify a CSV of daily readings (columns: date,aqi)
    History {
        /// Input CSV path
        #[arg(short = 'i', long)]
        input: String,

        /// Output CSV path
        #[arg(short = 'o', long)]
        output: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Classify {
            aqi,
            scale_max,
            json,
        } => report::run_classify(aqi, scale_max, json),
        Command::Trend { current, previous } => report::run_trend(current, previous),
        Command::No2 { molecules, json } => report::run_no2(molecules, json),
        Command::Compare {
            satellite_molecules,
            ground_ppb,
            json,
        } => report::run_compare(satellite_molecules, ground_ppb, json),
        Command::Alert {
            aqi,
            threshold,
            wind,
            json,
        } => report::run_alert(aqi, threshold, wind.as_deref(), json),
        Command::Breath {
            aqi,
            pm25,
            pm10,
            no2,
            o3,
            co,
            so2,
            fire_distance,
            humidity,
            temperature,
            json,
        } => {
            let conditions = Conditions {
                aqi,
                pollutants: Pollutants {
                    pm25,
                    pm10,
                    no2,
                    o3,
                    co,
                    so2,
                },
                wildfire_distance_km: fire_distance,
                humidity,
                temperature_f: temperature,
            };
            report::run_breath(&conditions, json)
        }
        Command::Forecast { input, json } => forecast::run_forecast(&input, json),
        Command::Fires {
            input,
            lat,
            lon,
            radius,
            json,
        } => fires::run_fires(&input, lat, lon, radius, json),
        Command::History { input, output } => history::run_history(&input, &output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_classify_defaults() {
        let cli = TestCli::try_parse_from(["aqi-cli", "classify", "-12"]).unwrap();
        match cli.command {
            Command::Classify {
                aqi,
                scale_max,
                json,
            } => {
                assert_eq!(aqi, -12.0);
                assert_eq!(scale_max, DEFAULT_SCALE_MAX);
                assert!(!json);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_alert_args() {
        let cli =
            TestCli::try_parse_from(["aqi-cli", "alert", "140", "--wind", "Calm", "-t", "120"])
                .unwrap();
        match cli.command {
            Command::Alert {
                aqi,
                threshold,
                wind,
                json,
            } => {
                assert_eq!(aqi, 140.0);
                assert_eq!(threshold, 120.0);
                assert_eq!(wind.as_deref(), Some("Calm"));
                assert!(!json);
            }
            _ => panic!("expected alert"),
        }
    }

    #[test]
    fn test_negative_positionals() {
        let cli = TestCli::try_parse_from(["aqi-cli", "alert", "-5"]).unwrap();
        assert!(matches!(cli.command, Command::Alert { aqi, .. } if aqi == -5.0));

        let cli = TestCli::try_parse_from(["aqi-cli", "no2", "-1e15"]).unwrap();
        assert!(matches!(cli.command, Command::No2 { molecules, .. } if molecules == -1e15));

        let cli = TestCli::try_parse_from(["aqi-cli", "compare", "-2e15", "-3"]).unwrap();
        match cli.command {
            Command::Compare {
                satellite_molecules,
                ground_ppb,
                ..
            } => {
                assert_eq!(satellite_molecules, -2e15);
                assert_eq!(ground_ppb, -3.0);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_breath_args() {
        let cli = TestCli::try_parse_from([
            "aqi-cli",
            "breath",
            "160",
            "--pm25",
            "48.2",
            "--fire-distance",
            "22",
            "--temperature",
            "-4",
        ])
        .unwrap();
        match cli.command {
            Command::Breath {
                aqi,
                pm25,
                pm10,
                fire_distance,
                humidity,
                temperature,
                ..
            } => {
                assert_eq!(aqi, 160.0);
                assert_eq!(pm25, Some(48.2));
                assert_eq!(pm10, None);
                assert_eq!(fire_distance, Some(22.0));
                assert_eq!(humidity, DEFAULT_HUMIDITY);
                assert_eq!(temperature, -4.0);
            }
            _ => panic!("expected breath"),
        }
    }

    #[test]
    fn test_fires_args() {
        let cli = TestCli::try_parse_from([
            "aqi-cli", "fires", "-i", "firms.csv", "--lat", "38.5", "--lon", "-121.5",
        ])
        .unwrap();
        match cli.command {
            Command::Fires {
                input,
                lat,
                lon,
                radius,
                json,
            } => {
                assert_eq!(input, "firms.csv");
                assert_eq!(lat, 38.5);
                assert_eq!(lon, -121.5);
                assert_eq!(radius, DEFAULT_SEARCH_RADIUS_KM);
                assert!(!json);
            }
            _ => panic!("expected fires"),
        }
    }

    #[test]
    fn test_forecast_requires_input() {
        assert!(TestCli::try_parse_from(["aqi-cli", "forecast"]).is_err());
    }

    #[test]
    fn test_history_requires_paths() {
        assert!(TestCli::try_parse_from(["aqi-cli", "history", "-i", "in.csv"]).is_err());
    }
}
