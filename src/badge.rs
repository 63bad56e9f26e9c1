//! Score badge rendering via shields.io

use crate::config;
use thiserror::Error;
use tracing::warn;

/// Default base URL for the badge service
const DEFAULT_BASE_URL: &str = "https://img.shields.io";

/// Errors from badge rendering
#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Badge color tier for an aggregate score
pub fn color_for(score: f64) -> &'static str {
    if score < 0.3 {
        "red"
    } else if score < 0.7 {
        "orange"
    } else {
        "brightgreen"
    }
}

/// Badge text for a score: rounded to three decimal places, shortest form
/// (1.0 renders as "1", 0.7 as "0.7")
pub fn format_score(score: f64) -> String {
    let rounded = (score * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

/// shields.io badge client
pub struct BadgeClient {
    client: reqwest::Client,
    base_url: String,
}

impl BadgeClient {
    /// Creates a new BadgeClient with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: config::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the SVG badge for an aggregate score.
    ///
    /// The badge label is fixed to "dependencies score"; the value is the
    /// rounded score, colored by tier.
    pub async fn render(&self, score: f64) -> Result<String, BadgeError> {
        let url = format!(
            "{}/badge/dependencies--score-{}-{}",
            self.base_url,
            format_score(score),
            color_for(score)
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if !status.is_success() {
            warn!("badge service returned status {}: {}", status, url);
            return Err(BadgeError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let svg = response.text().await?;

        if svg.is_empty() {
            return Err(BadgeError::InvalidResponse(
                "Empty badge body".to_string(),
            ));
        }

        Ok(svg)
    }
}

impl Default for BadgeClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
