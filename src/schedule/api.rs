use super::dto::ScheduleResponse;
use super::model::Event;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};
use url::Url;

const CACHE_BUSTER_PARAM: &str = "t";

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

/// Where the component gets its events from.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<Event>, APIError>;
}

pub struct ScheduleAPI {
    client: Client,
    data_url: Url,
}

impl ScheduleAPI {
    pub fn new(data_url: Url) -> Self {
        Self {
            client: Client::new(),
            data_url,
        }
    }
}

#[async_trait]
impl EventSource for ScheduleAPI {
    /**
    Returns the events in payload order.
    A timestamp query parameter keeps intermediate caches from answering.
    */
    #[tracing::instrument(skip(self), fields(url = %self.data_url))]
    async fn fetch_events(&self) -> Result<Vec<Event>, APIError> {
        let timestamp = Utc::now().timestamp_millis();

        info!("Getting events");

        let json_response = self
            .client
            .get(self.data_url.clone())
            .query(&[(CACHE_BUSTER_PARAM, timestamp)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        match serde_json::from_str::<ScheduleResponse>(&json_response) {
            Ok(parsed_response) => {
                let events = parsed_response.to_models();

                info!("Got {} events", events.len());

                Ok(events)
            }
            Err(e) => {
                error!("Response parse failed: {:?}", e);
                Err(APIError::InvalidResponse(e))
            }
        }
    }
}

/// Waits `settle_delay` so the freshly loaded grid library can finish initializing, then fetches.
pub async fn fetch_after_settle(
    source: &dyn EventSource,
    settle_delay: Duration,
) -> Result<Vec<Event>, APIError> {
    tokio::time::sleep(settle_delay).await;

    source.fetch_events().await
}
