//! Remote event service client
//!
//! HTTP client for the authoritative event service. Transport and status
//! failures are mapped onto [`RemoteError`] kinds so callers can apply the
//! fallback predicate instead of inspecting protocol details.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::models::{Event, EventDraft, EventPatch, EventStatistics, RegistrantDetails, Registration};
use crate::services::auth::StaffContext;
use crate::utils::errors::{RemoteError, RemoteResult, Result, ShepherdError};

/// Client for the remote event service
#[derive(Debug, Clone)]
pub struct RemoteEventService {
    client: Client,
    base_url: String,
}

impl RemoteEventService {
    /// Create a new RemoteEventService instance
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.service.timeout_seconds))
            .user_agent("Shepherd/1.0")
            .build()
            .map_err(ShepherdError::Http)?;

        Ok(Self {
            client,
            base_url: settings.service.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full event list
    pub async fn list_events(&self, ctx: &StaffContext) -> RemoteResult<Vec<Event>> {
        let url = format!("{}/events", self.base_url);
        debug!(url = %url, "Fetching event list from remote");
        self.execute(self.client.get(&url), ctx).await
    }

    /// Fetch the remote-computed statistics summary
    pub async fn fetch_statistics(&self, ctx: &StaffContext) -> RemoteResult<EventStatistics> {
        let url = format!("{}/events/statistics", self.base_url);
        debug!(url = %url, "Fetching statistics from remote");
        self.execute(self.client.get(&url), ctx).await
    }

    /// Create an event on the remote service
    pub async fn create_event(&self, ctx: &StaffContext, draft: &EventDraft) -> RemoteResult<Event> {
        let url = format!("{}/events", self.base_url);
        self.execute(self.client.post(&url).json(draft), ctx).await
    }

    /// Apply a partial update on the remote service
    pub async fn update_event(
        &self,
        ctx: &StaffContext,
        id: i64,
        patch: &EventPatch,
    ) -> RemoteResult<Event> {
        let url = format!("{}/events/{}", self.base_url, id);
        self.execute(self.client.patch(&url).json(patch), ctx).await
    }

    /// Delete an event on the remote service
    pub async fn delete_event(&self, ctx: &StaffContext, id: i64) -> RemoteResult<bool> {
        let url = format!("{}/events/{}", self.base_url, id);
        let token = ctx.bearer_token().ok_or(RemoteError::Unauthorized)?;
        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_transport_error)?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            status if status.is_success() => Ok(true),
            status => Err(map_status_error(status, response).await),
        }
    }

    /// Register an attendee on the remote service
    pub async fn register(
        &self,
        ctx: &StaffContext,
        event_id: i64,
        details: &RegistrantDetails,
    ) -> RemoteResult<Registration> {
        let url = format!("{}/events/{}/registrations", self.base_url, event_id);
        self.execute(self.client.post(&url).json(details), ctx).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        ctx: &StaffContext,
    ) -> RemoteResult<T> {
        let token = ctx.bearer_token().ok_or(RemoteError::Unauthorized)?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_status_error(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout
    } else if error.is_connect() {
        RemoteError::Unreachable
    } else {
        warn!(error = %error, "Remote event service transport failure");
        RemoteError::Unreachable
    }
}

async fn map_status_error(status: StatusCode, response: Response) -> RemoteError {
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::Unauthorized,
        StatusCode::NOT_FOUND => RemoteError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            RemoteError::Validation(body)
        }
        status if status.is_server_error() => {
            RemoteError::ServerError(format!("HTTP {}: {}", status, body))
        }
        status => RemoteError::ServerError(format!("HTTP {}: {}", status, body)),
    }
}
