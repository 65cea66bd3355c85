// Forecast domain models and daily aggregation
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_FORECAST_DAYS: usize = 5;

/// Column order used when exporting aggregated forecasts.
pub const FORECAST_DAY_COLUMNS: [&str; 4] = ["date", "min_temp", "max_temp", "condition"];

/// The part of the provider's forecast payload we read. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
}

/// One 3-hour forecast entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    pub dt_txt: String,
    pub main: SampleTemperatures,
    #[serde(default)]
    pub weather: Vec<SampleCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleTemperatures {
    pub temp_min: f64,
    pub temp_max: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleCondition {
    #[serde(default)]
    pub description: String,
}

impl ForecastSample {
    /// Date portion of `dt_txt` ("YYYY-MM-DD HH:MM:SS").
    pub fn date(&self) -> &str {
        self.dt_txt.split(' ').next().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub condition: String,
}

/// Buckets samples by calendar date and reduces the first `max_days` dates.
///
/// Buckets keep input order, so `condition` comes from the first sample seen for
/// that date in `samples`, not necessarily the earliest one by time.
pub fn aggregate(samples: &[ForecastSample], max_days: usize) -> Vec<ForecastDay> {
    let mut buckets: BTreeMap<&str, Vec<&ForecastSample>> = BTreeMap::new();
    for sample in samples {
        buckets.entry(sample.date()).or_default().push(sample);
    }

    buckets
        .into_iter()
        .take(max_days)
        .map(|(date, bucket)| {
            let min_temp = bucket
                .iter()
                .map(|s| s.main.temp_min)
                .fold(f64::INFINITY, f64::min);
            let max_temp = bucket
                .iter()
                .map(|s| s.main.temp_max)
                .fold(f64::NEG_INFINITY, f64::max);

            ForecastDay {
                date: date.to_string(),
                min_temp: round_one_decimal(min_temp),
                max_temp: round_one_decimal(max_temp),
                condition: bucket[0].description().to_string(),
            }
        })
        .collect()
}

/// Rounds on the exact binary value with ties to even, so 18.25 becomes 18.2.
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(dt_txt: &str, temp_min: f64, temp_max: f64, description: &str) -> ForecastSample {
        ForecastSample {
            dt_txt: dt_txt.to_string(),
            main: SampleTemperatures { temp_min, temp_max },
            weather: vec![SampleCondition {
                description: description.to_string(),
            }],
        }
    }

    #[test]
    fn test_aggregate_single_day() {
        let samples = vec![
            sample("2024-06-01 00:00:00", 10.0, 15.0, "clear"),
            sample("2024-06-01 03:00:00", 8.0, 18.0, "cloudy"),
        ];

        let days = aggregate(&samples, DEFAULT_FORECAST_DAYS);

        assert_eq!(
            days,
            vec![ForecastDay {
                date: "2024-06-01".to_string(),
                min_temp: 8.0,
                max_temp: 18.0,
                condition: "clear".to_string(),
            }]
        );
    }

    #[test]
    fn test_aggregate_unsorted_input() {
        let samples = vec![
            sample("2024-06-02 06:00:00", 12.0, 20.0, "rain"),
            sample("2024-06-01 21:00:00", 9.0, 11.0, "mist"),
            sample("2024-06-02 00:00:00", 11.0, 14.0, "drizzle"),
            sample("2024-06-01 00:00:00", 7.0, 13.0, "clear"),
        ];

        let days = aggregate(&samples, DEFAULT_FORECAST_DAYS);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-06-01");
        assert_eq!(days[0].min_temp, 7.0);
        assert_eq!(days[0].max_temp, 13.0);
        // First seen in input order, not the earliest timestamp
        assert_eq!(days[0].condition, "mist");
        assert_eq!(days[1].date, "2024-06-02");
        assert_eq!(days[1].min_temp, 11.0);
        assert_eq!(days[1].max_temp, 20.0);
        assert_eq!(days[1].condition, "rain");
    }

    #[test]
    fn test_aggregate_limits_days() {
        let samples: Vec<ForecastSample> = (1..=7)
            .map(|d| sample(&format!("2024-06-0{d} 12:00:00"), 10.0, 20.0, "clear"))
            .collect();

        let days = aggregate(&samples, DEFAULT_FORECAST_DAYS);
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].date, "2024-06-01");
        assert_eq!(days[4].date, "2024-06-05");

        assert_eq!(aggregate(&samples, 2).len(), 2);
        assert_eq!(aggregate(&samples, 30).len(), 7);
    }

    #[test]
    fn test_aggregate_properties() {
        let samples = vec![
            sample("2024-06-03 00:00:00", -2.34, 4.56, "snow"),
            sample("2024-06-01 00:00:00", 10.0, 10.0, "clear"),
            sample("2024-06-03 03:00:00", -5.06, 1.0, "snow"),
            sample("2024-06-02 00:00:00", 3.0, 9.99, "fog"),
        ];

        let days = aggregate(&samples, DEFAULT_FORECAST_DAYS);

        assert_eq!(days.len(), 3);
        for pair in days.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        for day in &days {
            assert!(day.min_temp <= day.max_temp);
        }
        assert_eq!(days[2].min_temp, -5.1);
        assert_eq!(days[2].max_temp, 4.6);
        assert_eq!(days[1].max_temp, 10.0);

        // Deterministic
        assert_eq!(aggregate(&samples, DEFAULT_FORECAST_DAYS), days);
    }

    #[test]
    fn test_aggregate_rounds_ties_to_even() {
        let samples = vec![
            sample("2024-06-01 00:00:00", 18.25, 18.75, "clear"),
            sample("2024-06-02 00:00:00", -2.25, 0.15, "clear"),
        ];

        let days = aggregate(&samples, DEFAULT_FORECAST_DAYS);

        assert_eq!(days[0].min_temp, 18.2);
        assert_eq!(days[0].max_temp, 18.8);
        assert_eq!(days[1].min_temp, -2.2);
        // 0.15 is stored just below 0.15
        assert_eq!(days[1].max_temp, 0.1);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[], DEFAULT_FORECAST_DAYS).is_empty());
    }

    #[test]
    fn test_payload_ignores_unknown_fields() {
        let payload: ForecastPayload = serde_json::from_value(json!({
            "cod": "200",
            "cnt": 1,
            "city": {"name": "London"},
            "list": [{
                "dt": 1717200000,
                "dt_txt": "2024-06-01 00:00:00",
                "main": {"temp": 12.0, "temp_min": 10.0, "temp_max": 15.0, "humidity": 80},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}]
            }]
        }))
        .unwrap();

        assert_eq!(payload.list.len(), 1);
        assert_eq!(payload.list[0].date(), "2024-06-01");
        assert_eq!(payload.list[0].description(), "clear sky");
    }

    #[test]
    fn test_sample_without_weather_has_empty_condition() {
        let payload: ForecastPayload = serde_json::from_value(json!({
            "list": [{"dt_txt": "2024-06-01 00:00:00", "main": {"temp_min": 1.0, "temp_max": 2.0}}]
        }))
        .unwrap();

        let days = aggregate(&payload.list, DEFAULT_FORECAST_DAYS);
        assert_eq!(days[0].condition, "");
    }
}
