use crate::{Config, ForecastError, ForecastQuery, ForecastResult};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// Executes a [`ForecastQuery`] against some forecast source.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &ForecastQuery) -> Result<ForecastResult, ForecastError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config.api_key()?;
    let provider = WeatherApiProvider::with_base_url(api_key, config.base_url.clone())
        .with_timeout(config.timeout())?;

    Ok(Box::new(provider))
}
