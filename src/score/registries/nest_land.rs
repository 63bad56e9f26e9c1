//! nest.land registry (Arweave-backed Deno modules)

use crate::config;
use crate::score::error::{RegistryError, VersionTokenError};
use crate::score::registry::{RegistryHost, split_version_segment};
use serde::Deserialize;
use tracing::warn;
use url::Url;

/// Default base URL for the nest.land API
const DEFAULT_BASE_URL: &str = "https://x.nest.land";

/// Response from the nest.land package API
#[derive(Debug, Deserialize)]
struct NestPackageResponse {
    /// Upload names like "module@0.1.0", oldest first
    #[serde(rename = "packageUploadNames", default)]
    package_upload_names: Vec<String>,
}

/// Registry host for `https://x.nest.land/{module}@{version}/...`
pub struct NestLandRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NestLandRegistry {
    /// Creates a new NestLandRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: config::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Module name and version token from a nest.land specifier
    fn locate(specifier: &Url) -> Option<(String, Option<String>)> {
        if specifier.host_str() != Some("x.nest.land") {
            return None;
        }
        let first = specifier.path_segments()?.next()?;
        let (name, version) = split_version_segment(first);
        if name.is_empty() || name == "api" {
            return None;
        }
        Some((name.to_string(), version.map(str::to_string)))
    }
}

impl Default for NestLandRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl RegistryHost for NestLandRegistry {
    fn name(&self) -> &'static str {
        "nest.land"
    }

    fn matches(&self, specifier: &Url) -> bool {
        Self::locate(specifier).is_some()
    }

    fn pinned_version(&self, specifier: &Url) -> Result<String, VersionTokenError> {
        match Self::locate(specifier) {
            Some((_, version)) => Ok(version.unwrap_or_default()),
            None => Err(VersionTokenError {
                specifier: specifier.to_string(),
            }),
        }
    }

    async fn list_versions(&self, specifier: &Url) -> Result<Vec<String>, RegistryError> {
        let Some((module, _)) = Self::locate(specifier) else {
            return Err(RegistryError::InvalidResponse(format!(
                "Not a nest.land module: {specifier}"
            )));
        };

        let url = format!("{}/api/package/{}", self.base_url, module);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(module));
        }

        if !status.is_success() {
            warn!("nest.land API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let package: NestPackageResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse nest.land package response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        // Uploads arrive oldest first; reverse so the head is the latest
        let mut versions: Vec<String> = package
            .package_upload_names
            .iter()
            .filter_map(|upload| upload.split_once('@').map(|(_, v)| v.to_string()))
            .collect();
        versions.reverse();

        Ok(versions)
    }
}
