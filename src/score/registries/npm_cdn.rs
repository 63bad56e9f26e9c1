//! npm-backed CDN hosts (esm.sh, unpkg, skypack, jsDelivr)
//!
//! These CDNs serve npm packages under their own URL shapes but share one
//! source of truth for published versions: the npm registry API.

use std::collections::HashMap;

use crate::config;
use crate::score::error::{RegistryError, VersionTokenError};
use crate::score::registry::RegistryHost;
use crate::score::semver::parse_version;
use chrono::{DateTime, Utc};
use regex::Regex;
use semver::Version;
use serde::Deserialize;
use tracing::warn;
use url::Url;

/// Default base URL for the npm registry API
const DEFAULT_BASE_URL: &str = "https://registry.npmjs.org";

/// Response from the npm registry API
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    versions: HashMap<String, serde_json::Value>,
    /// Publish timestamps keyed by version (plus "created"/"modified")
    #[serde(default)]
    time: HashMap<String, String>,
}

/// Registry host for one npm-backed CDN
pub struct NpmCdnRegistry {
    client: reqwest::Client,
    base_url: String,
    name: &'static str,
    host: &'static str,
    /// Captures the package name (scoped or not) and the optional version token
    path_re: Regex,
}

impl NpmCdnRegistry {
    fn with_host(name: &'static str, host: &'static str, path_prefix: &str) -> Self {
        Self {
            client: config::http_client(),
            base_url: DEFAULT_BASE_URL.to_string(),
            name,
            host,
            path_re: Regex::new(&format!(
                "^{path_prefix}(@[^/]+/[^@/]+|[^@/]+)(?:@([^/]*))?(?:/.*)?$"
            ))
            .unwrap(),
        }
    }

    /// `https://esm.sh/{package}@{version}/...`
    pub fn esm_sh() -> Self {
        Self::with_host("esm.sh", "esm.sh", "/")
    }

    /// `https://unpkg.com/{package}@{version}/...`
    pub fn unpkg() -> Self {
        Self::with_host("unpkg.com", "unpkg.com", "/")
    }

    /// `https://cdn.skypack.dev/{package}@{version}`
    pub fn skypack() -> Self {
        Self::with_host("skypack", "cdn.skypack.dev", "/")
    }

    /// `https://cdn.jsdelivr.net/npm/{package}@{version}/...`
    pub fn jsdelivr() -> Self {
        Self::with_host("jsdelivr", "cdn.jsdelivr.net", "/npm/")
    }

    /// Points version listing at a custom npm registry API
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }

    /// Package name and version token from a CDN specifier
    fn locate(&self, specifier: &Url) -> Option<(String, Option<String>)> {
        if specifier.host_str() != Some(self.host) {
            return None;
        }
        let captures = self.path_re.captures(specifier.path())?;
        let name = captures.get(1)?.as_str().to_string();
        let version = captures.get(2).map(|m| m.as_str().to_string());
        Some((name, version))
    }
}

#[async_trait::async_trait]
impl RegistryHost for NpmCdnRegistry {
    fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, specifier: &Url) -> bool {
        self.locate(specifier).is_some()
    }

    fn pinned_version(&self, specifier: &Url) -> Result<String, VersionTokenError> {
        match self.locate(specifier) {
            Some((_, version)) => Ok(version.unwrap_or_default()),
            None => Err(VersionTokenError {
                specifier: specifier.to_string(),
            }),
        }
    }

    async fn list_versions(&self, specifier: &Url) -> Result<Vec<String>, RegistryError> {
        let Some((package, _)) = self.locate(specifier) else {
            return Err(RegistryError::InvalidResponse(format!(
                "Not an npm package specifier: {specifier}"
            )));
        };

        let encoded_name = Self::encode_package_name(&package);
        let url = format!("{}/{}", self.base_url, encoded_name);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package));
        }

        if !status.is_success() {
            warn!("npm registry returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let package_info: NpmPackageResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse npm registry response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let NpmPackageResponse { versions, time } = package_info;

        // Newest first: publish time when the registry provides it, semver
        // order as the tiebreak and the fallback for untimed versions
        let mut entries: Vec<(String, Option<DateTime<Utc>>, Option<Version>)> = versions
            .into_keys()
            .map(|v| {
                let published = time
                    .get(&v)
                    .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                    .map(|dt| dt.with_timezone(&Utc));
                let parsed = parse_version(&v);
                (v, published, parsed)
            })
            .collect();

        entries.sort_by(|(_, ta, va), (_, tb, vb)| tb.cmp(ta).then_with(|| vb.cmp(va)));

        Ok(entries.into_iter().map(|(v, _, _)| v).collect())
    }
}
