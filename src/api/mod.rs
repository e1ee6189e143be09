pub mod models;

pub use models::{CreatedQuestion, QuestionId, QuestionPayload};

use std::time::Duration;

use indexmap::IndexMap;
use log::{debug, error, info};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::settings::{Settings, SettingsError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Unreadable response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl ApiError {
    /// True when the server was never reached (as opposed to answering with an error).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.status().is_none() && !e.is_decode())
    }
}

/// Client for the Pub Quiz question API.
#[derive(Clone)]
pub struct QuizApiClient {
    client: Client,
    base_url: Url,
    health_timeout: Duration,
}

impl QuizApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        Self::with_base_url(settings.base_url()?, settings.health_timeout())
    }

    pub fn with_base_url(base_url: Url, health_timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("PubQuiz/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            health_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// `GET /health`, bounded by the configured probe timeout.
    pub async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.endpoint("health")?)
            .timeout(self.health_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Rejected {
                status: response.status(),
                detail: None,
            });
        }
        Ok(())
    }

    /// `GET /categories`, keeping the server's category order.
    pub async fn categories(&self) -> Result<IndexMap<String, Vec<String>>, ApiError> {
        let response = self.client.get(self.endpoint("categories")?).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.ok().filter(|t| !t.is_empty());
            error!("Category request failed with HTTP {}", status);
            return Err(ApiError::Rejected { status, detail });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// `POST /questions/` with the given payload.
    pub async fn create_question(&self, payload: &QuestionPayload) -> Result<CreatedQuestion, ApiError> {
        info!(
            "Submitting question ({} / {} / {})",
            payload.question_type, payload.category, payload.subcategory
        );

        let response = self
            .client
            .post(self.endpoint("questions/")?)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|body| models::extract_detail(&body));
            error!("Question rejected with HTTP {}: {}", status, text);
            return Err(ApiError::Rejected { status, detail });
        }

        debug!("Create question response: {}", text);
        let created: CreatedQuestion =
            serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        info!("Question created with id {}", created.id);
        Ok(created)
    }
}
