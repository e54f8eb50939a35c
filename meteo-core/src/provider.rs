use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::Config;

pub mod meteosource;

pub use meteosource::MeteosourceProvider;

/// The one location this service reports on (Xertigny, Vosges).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

pub const XERTIGNY: Location = Location {
    lat: 48.2719,
    lon: 6.4822,
};

/// Source of the raw daily forecast document.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the daily forecast as the upstream JSON document.
    async fn daily_forecast(&self) -> anyhow::Result<Value>;
}

/// Construct the upstream provider from config. Needs the API key to be resolvable.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config.api_key()?;
    let provider =
        MeteosourceProvider::with_base_url(api_key, &config.upstream.base_url, XERTIGNY)?;

    Ok(Box::new(provider))
}

/// Shorten an upstream body so it fits in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_with_file_key() {
        let mut cfg = Config::default();
        cfg.upstream.api_key = Some("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let short = truncate_body(&body);

        assert!(short.ends_with("..."));
        assert!(short.len() <= 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
