//! Core library for the `meteo` forecast page.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream forecast provider (Meteosource via RapidAPI)
//! - A TTL cache for the fetched document
//! - Payload models, French date formatting and page assembly
//!
//! It is used by `meteo-web`, which only adds HTTP serving and HTML rendering.

pub mod cache;
pub mod config;
pub mod dates;
pub mod model;
pub mod page;
pub mod provider;

pub use cache::TtlCache;
pub use config::Config;
pub use model::{DayView, ForecastDay, MISSING, Reading};
pub use page::{ForecastPage, WeatherPage};
pub use provider::{ForecastProvider, MeteosourceProvider, provider_from_config};
