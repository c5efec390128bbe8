//! HTTP API client for the tournament service.

use crate::logging::log_api_request;
use anyhow::{Context, Result};
use async_trait::async_trait;
use podium::{FinalizePayload, SubmissionTransport, TransportError};
use serde_json::Value;
use std::time::{Duration, Instant};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// API client for communicating with the tournament service
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    access_token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            access_token: None,
        }
    }

    /// Attach a bearer token sent with the finalize call
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn participants_path(tournament_id: &str) -> String {
        format!("/api/tournaments/{tournament_id}/participants")
    }

    fn finalize_path(tournament_id: &str) -> String {
        format!("/api/tournaments/{tournament_id}/finalize")
    }

    /// Fetch the raw participant records of a tournament
    ///
    /// The service answers either with a bare array or with an object
    /// holding the array under `participants`.
    pub async fn fetch_participants(&self, tournament_id: &str) -> Result<Vec<Value>> {
        let path = Self::participants_path(tournament_id);
        let started = Instant::now();

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await;
        let elapsed = started.elapsed().as_millis() as u64;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log_api_request("GET", &path, None, elapsed);
                return Err(e).context("Failed to fetch participants");
            }
        };
        log_api_request("GET", &path, Some(response.status().as_u16()), elapsed);

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {}", e));
            anyhow::bail!("Loading participants failed ({}): {}", status, error_text);
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse participant list")?;

        participant_records(body)
    }

    /// Submit final standings
    pub async fn finalize(&self, payload: &FinalizePayload) -> Result<(), TransportError> {
        let path = Self::finalize_path(&payload.tournament_id);
        let started = Instant::now();

        let mut request = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(payload);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await;
        let elapsed = started.elapsed().as_millis() as u64;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                log_api_request("POST", &path, None, elapsed);
                return Err(TransportError::Network(e.to_string()));
            }
        };

        let status = response.status();
        log_api_request("POST", &path, Some(status.as_u16()), elapsed);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("no reason").to_string());
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl SubmissionTransport for ApiClient {
    async fn submit(&self, payload: &FinalizePayload) -> Result<(), TransportError> {
        self.finalize(payload).await
    }
}

/// Extract the record array from a participants response body
pub fn participant_records(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(records) => Ok(records),
        Value::Object(mut fields) => match fields.remove("participants") {
            Some(Value::Array(records)) => Ok(records),
            Some(_) => anyhow::bail!("Field 'participants' is not a list"),
            None => anyhow::bail!("Response has no 'participants' list"),
        },
        _ => anyhow::bail!("Unexpected participant response shape"),
    }
}
