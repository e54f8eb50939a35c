//! Cache-or-fetch of the forecast document and its reshaping into page fields.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::cache::TtlCache;
use crate::dates::localize_day;
use crate::model::{DayView, ForecastDay};
use crate::provider::ForecastProvider;

pub const CACHE_KEY: &str = "weather_data";
pub const CACHE_TTL: Duration = Duration::from_secs(43_200);

/// Number of days shown after today.
pub const EXTENDED_DAYS: usize = 7;

/// Everything the forecast page displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPage {
    pub today: DayView,
    /// Days 1 through 7; today is not repeated here.
    pub upcoming: Vec<DayView>,
}

/// Builds [`ForecastPage`]s, hitting the upstream provider at most once per TTL window.
pub struct WeatherPage {
    provider: Box<dyn ForecastProvider>,
    cache: TtlCache<Value>,
}

impl WeatherPage {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self {
            provider,
            cache: TtlCache::new(),
        }
    }

    pub async fn build(&self) -> Result<ForecastPage> {
        let fetch = || self.provider.daily_forecast();
        let doc = self
            .cache
            .get_or_try_insert_with(CACHE_KEY, CACHE_TTL, fetch)
            .await?;

        assemble(&doc)
    }
}

/// The `daily.data` array of the document; anything else counts as empty.
fn daily_entries(doc: &Value) -> &[Value] {
    doc.pointer("/daily/data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn view_of(day: Option<&ForecastDay>) -> DayView {
    let raw = day.and_then(ForecastDay::raw_day);
    let formatted = localize_day(raw.as_deref());
    DayView::from_day(day, formatted)
}

/// Reshape an upstream document into page fields.
pub fn assemble(doc: &Value) -> Result<ForecastPage> {
    let days = daily_entries(doc)
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            ForecastDay::deserialize(raw)
                .with_context(|| format!("Malformed forecast entry at daily.data[{i}]"))
        })
        .collect::<Result<Vec<_>>>()?;

    let today = view_of(days.first());
    let upcoming = days
        .iter()
        .skip(1)
        .take(EXTENDED_DAYS)
        .map(|d| view_of(Some(d)))
        .collect();

    Ok(ForecastPage { today, upcoming })
}
