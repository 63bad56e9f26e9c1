//! Version information resolution for external modules

use crate::score::error::RegistryError;
use crate::score::registry::RegistryTable;
use crate::score::semver::parse_version;
use semver::Version;
use tracing::{debug, warn};
use url::Url;

/// Pinned and published version details for one external module
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionInfo {
    /// Version token written in the specifier; None when unextractable
    pub current_version: Option<String>,
    /// Most recently published version; None when no registry matched
    pub latest_version: Option<String>,
    /// `current_version` as strict semver, when it parses
    pub current_semver: Option<Version>,
    /// `latest_version` as strict semver, when it parses
    pub latest_semver: Option<Version>,
}

impl VersionInfo {
    /// Info for a module no known registry serves
    pub fn unresolved() -> Self {
        Self::default()
    }
}

/// Resolves version information for a specifier against the registry table.
///
/// No matching registry is not an error; the result simply carries no latest
/// version. A registry that matches but cannot answer is fatal for the whole
/// report, so the error propagates instead of degrading the record.
pub async fn resolve_version_info(
    table: &RegistryTable,
    specifier: &Url,
) -> Result<VersionInfo, RegistryError> {
    let Some(host) = table.lookup(specifier) else {
        return Ok(VersionInfo::unresolved());
    };

    debug!("resolving {} via {}", specifier, host.name());

    let current_version = match host.pinned_version(specifier) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!("Failed to extract version token: {}", e);
            None
        }
    };

    let versions = host.list_versions(specifier).await?;
    let latest_version = versions.first().cloned();

    let current_semver = current_version.as_deref().and_then(parse_version);
    let latest_semver = latest_version.as_deref().and_then(parse_version);

    Ok(VersionInfo {
        current_version,
        latest_version,
        current_semver,
        latest_semver,
    })
}
