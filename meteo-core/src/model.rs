use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Placeholder shown for any field the upstream payload left out.
pub const MISSING: &str = "N/A";

/// A scalar from the forecast payload. Meteosource sends most values as
/// numbers, but `units=auto` and older payloads also carry strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    Text(String),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Number(n) => write!(f, "{n}"),
            Reading::Text(s) => f.write_str(s),
        }
    }
}

/// Field decoder that turns a value of the wrong shape into `None`
/// instead of failing the whole entry.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Wind {
    #[serde(default, deserialize_with = "lenient")]
    pub speed: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub dir: Option<Reading>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub total: Option<Reading>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Probability {
    #[serde(default, deserialize_with = "lenient")]
    pub precipitation: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub storm: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub freeze: Option<Reading>,
}

/// One entry of `daily.data`. Every field is optional, and a field of the
/// wrong shape reads as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastDay {
    #[serde(default, deserialize_with = "lenient")]
    pub day: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub temperature: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub temperature_min: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub temperature_max: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub feels_like: Option<Reading>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind: Option<Wind>,
    #[serde(default, deserialize_with = "lenient")]
    pub precipitation: Option<Precipitation>,
    #[serde(default, deserialize_with = "lenient")]
    pub probability: Option<Probability>,
    #[serde(default, deserialize_with = "lenient")]
    pub humidity: Option<Reading>,
}

impl ForecastDay {
    /// The raw `day` field as text, whatever JSON type it came as.
    pub fn raw_day(&self) -> Option<String> {
        self.day.as_ref().map(Reading::to_string)
    }
}

/// Display-ready strings for one forecast day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub formatted_day: String,
    pub weather: String,
    pub icon: String,
    pub summary: String,
    pub temperature: String,
    pub temperature_min: String,
    pub temperature_max: String,
    pub feels_like: String,
    pub wind_speed: String,
    pub wind_dir: String,
    pub precipitation_type: String,
    pub precipitation_total: String,
    pub probability_precipitation: String,
    pub probability_storm: String,
    pub probability_freeze: String,
    pub humidity: String,
}

fn or_missing(value: Option<&Reading>) -> String {
    value
        .map(Reading::to_string)
        .unwrap_or_else(|| MISSING.to_string())
}

impl DayView {
    /// Build the view of `day`, with `formatted_day` computed by the caller.
    /// An absent day gives the all-placeholder view.
    pub fn from_day(day: Option<&ForecastDay>, formatted_day: String) -> Self {
        let wind = day.and_then(|d| d.wind.as_ref());
        let precipitation = day.and_then(|d| d.precipitation.as_ref());
        let probability = day.and_then(|d| d.probability.as_ref());

        Self {
            formatted_day,
            weather: or_missing(day.and_then(|d| d.weather.as_ref())),
            icon: day
                .and_then(|d| d.icon.as_ref())
                .map(Reading::to_string)
                .unwrap_or_default(),
            summary: or_missing(day.and_then(|d| d.summary.as_ref())),
            temperature: or_missing(day.and_then(|d| d.temperature.as_ref())),
            temperature_min: or_missing(day.and_then(|d| d.temperature_min.as_ref())),
            temperature_max: or_missing(day.and_then(|d| d.temperature_max.as_ref())),
            feels_like: or_missing(day.and_then(|d| d.feels_like.as_ref())),
            wind_speed: or_missing(wind.and_then(|w| w.speed.as_ref())),
            wind_dir: or_missing(wind.and_then(|w| w.dir.as_ref())),
            precipitation_type: or_missing(precipitation.and_then(|p| p.kind.as_ref())),
            precipitation_total: or_missing(precipitation.and_then(|p| p.total.as_ref())),
            probability_precipitation: or_missing(
                probability.and_then(|p| p.precipitation.as_ref()),
            ),
            probability_storm: or_missing(probability.and_then(|p| p.storm.as_ref())),
            probability_freeze: or_missing(probability.and_then(|p| p.freeze.as_ref())),
            humidity: or_missing(day.and_then(|d| d.humidity.as_ref())),
        }
    }
}
