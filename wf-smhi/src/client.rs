//! Retrying client for the two Vattenwebb endpoints used per fetch cycle.
//!
//! A cycle is `data/point` (yields the production time token) followed by
//! `data/chart` for that token. Each GET is retried on transport failures
//! with a linearly growing delay; shape errors are returned immediately.

use crate::{
    chart::production_time,
    config::ClientConfig,
    error::Result,
};
use log::{debug, error, info, warn};
use serde_json::Value;
use std::{future::Future, time::Duration};

/// SWEREF 99 TM position of a river cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// A single GET as handed to a [`Transport`].
#[derive(Debug, Clone, Copy)]
pub struct JsonRequest<'a> {
    pub url: &'a str,
    pub user_agent: &'a str,
    pub timeout: Duration,
}

/// Something that can GET a URL and decode the body as JSON.
///
/// Failures to connect, non-success statuses and undecodable bodies should
/// be reported as transient errors so the client retries them.
pub trait Transport {
    fn get_json(&self, request: JsonRequest<'_>) -> impl Future<Output = Result<Value>> + Send;
}

#[cfg(feature = "api")]
impl Transport for reqwest::Client {
    async fn get_json(&self, request: JsonRequest<'_>) -> Result<Value> {
        let response = self
            .get(request.url)
            .header(reqwest::header::USER_AGENT, request.user_agent)
            .timeout(request.timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }
}

/// Raw payloads of one fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedData {
    pub point_data: Value,
    pub chart_data: Value,
    pub production_time: String,
}

#[derive(Debug, Clone)]
pub struct SmhiClient<T> {
    transport: T,
    config: ClientConfig,
}

#[cfg(feature = "api")]
impl SmhiClient<reqwest::Client> {
    /// Client backed by a fresh `reqwest` connection pool.
    pub fn with_config(config: ClientConfig) -> Self {
        SmhiClient::new(reqwest::Client::new(), config)
    }
}

impl<T: Transport> SmhiClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        SmhiClient { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Point lookup by coordinates when given, otherwise by subid.
    pub fn point_url(&self, subid: u32, coordinates: Option<Coordinates>) -> String {
        match coordinates {
            Some(Coordinates { x, y }) => {
                format!("{}data/point?x={}&y={}", self.config.base_url, x, y)
            }
            None => format!("{}data/point?subid={}", self.config.base_url, subid),
        }
    }

    pub fn chart_url(&self, subid: u32, production_time: &str) -> String {
        format!(
            "{}data/chart?subid={}&productionTime={}",
            self.config.base_url, subid, production_time
        )
    }

    /// Fetch point and chart data for one station.
    ///
    /// Fails with `MissingField` without touching the chart endpoint when the
    /// point response has no production time.
    pub async fn fetch_data(
        &self,
        subid: u32,
        coordinates: Option<Coordinates>,
    ) -> Result<FetchedData> {
        let point_url = self.point_url(subid, coordinates);
        let point_data = self.fetch_with_retry(&point_url, "point data").await?;
        let production_time = production_time(&point_data)?;

        let chart_url = self.chart_url(subid, &production_time);
        let chart_data = self.fetch_with_retry(&chart_url, "chart data").await?;

        Ok(FetchedData {
            point_data,
            chart_data,
            production_time,
        })
    }

    /// GET a JSON document, retrying transient failures up to
    /// `max_attempts` times and sleeping `retry_delay * attempt` in between.
    pub async fn fetch_with_retry(&self, url: &str, description: &str) -> Result<Value> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            debug!("Fetching {description}: {url} (attempt {attempt}/{max_attempts})");
            let request = JsonRequest {
                url,
                user_agent: &self.config.user_agent,
                timeout: self.config.timeout,
            };
            let err = match self.transport.get_json(request).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_transient() => return Err(e),
                Err(e) => e,
            };
            warn!("Attempt {attempt}/{max_attempts}: Error fetching {description}: {err}");
            if attempt >= max_attempts {
                error!("Failed to fetch {description} after {max_attempts} attempts");
                return Err(err);
            }
            let delay = self.config.backoff(attempt);
            info!(
                "Sleeping for {} milliseconds before retry for {description}",
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
