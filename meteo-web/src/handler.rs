use askama::Template;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use meteo_core::{DayView, ForecastPage, WeatherPage};
use std::sync::Arc;
use thiserror::Error;

const FAILURE_MESSAGE: &str = "Erreur lors de la récupération des données météo : ";

/// Shared application state.
pub struct AppState {
    pub pages: WeatherPage,
}

#[derive(Template)]
#[template(path = "meteo/index.html")]
struct MeteoTemplate<'a> {
    day: &'a str,
    weather: &'a str,
    icon: &'a str,
    summary: &'a str,
    temperature: &'a str,
    temperature_min: &'a str,
    temperature_max: &'a str,
    feels_like: &'a str,
    wind_speed: &'a str,
    wind_dir: &'a str,
    precipitation_type: &'a str,
    precipitation_total: &'a str,
    probability_precipitation: &'a str,
    probability_storm: &'a str,
    probability_freeze: &'a str,
    humidity: &'a str,
    daily: &'a [DayView],
}

impl<'a> From<&'a ForecastPage> for MeteoTemplate<'a> {
    fn from(page: &'a ForecastPage) -> Self {
        let today = &page.today;
        Self {
            day: &today.formatted_day,
            weather: &today.weather,
            icon: &today.icon,
            summary: &today.summary,
            temperature: &today.temperature,
            temperature_min: &today.temperature_min,
            temperature_max: &today.temperature_max,
            feels_like: &today.feels_like,
            wind_speed: &today.wind_speed,
            wind_dir: &today.wind_dir,
            precipitation_type: &today.precipitation_type,
            precipitation_total: &today.precipitation_total,
            probability_precipitation: &today.probability_precipitation,
            probability_storm: &today.probability_storm,
            probability_freeze: &today.probability_freeze,
            humidity: &today.humidity,
            daily: &page.upcoming,
        }
    }
}

/// Anything that stops the page from being produced.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("{0:#}")]
    Weather(anyhow::Error),
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!("weather API error: {self}");
        let body = format!("{FAILURE_MESSAGE}{self}");
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/meteo", get(meteo))
        .route("/health", get(health))
        .with_state(state)
}

/// `GET /meteo`: today's forecast plus the next seven days.
pub async fn meteo(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let page = state.pages.build().await.map_err(PageError::Weather)?;
    let html = MeteoTemplate::from(&page).render()?;

    Ok(Html(html))
}

pub async fn health() -> &'static str {
    "ok"
}
