//! Registry host trait and the ordered lookup table

#[cfg(test)]
use mockall::automock;

use crate::score::error::{RegistryError, VersionTokenError};
use crate::score::registries::{
    DenoLandRegistry, GithubRawRegistry, NestLandRegistry, NpmCdnRegistry,
};
use std::sync::Arc;
use url::Url;

/// Trait for a registry that hosts URL-imported modules
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RegistryHost: Send + Sync {
    /// Short host name for logs
    fn name(&self) -> &'static str;

    /// Whether this host serves the given module specifier
    fn matches(&self, specifier: &Url) -> bool;

    /// The version token written in the specifier
    ///
    /// # Returns
    /// * `Ok(token)` - The pinned version; empty when the version slot is
    ///   present but unfilled (an unpinned import)
    /// * `Err(VersionTokenError)` - The specifier has no version slot at all
    fn pinned_version(&self, specifier: &Url) -> Result<String, VersionTokenError>;

    /// All published versions for the module behind the specifier
    ///
    /// # Returns
    /// * `Ok(versions)` - Ordered from newest to oldest
    /// * `Err(RegistryError)` - If the fetch fails; fatal for the request
    async fn list_versions(&self, specifier: &Url) -> Result<Vec<String>, RegistryError>;
}

/// Ordered registry table; the first matching host wins.
///
/// The set of hosts is closed: every supported registry is constructed here
/// and nowhere else. A specifier no host recognizes is not an error, it just
/// scores as "Registry not found".
pub struct RegistryTable {
    hosts: Vec<Arc<dyn RegistryHost>>,
}

impl RegistryTable {
    pub fn new(hosts: Vec<Arc<dyn RegistryHost>>) -> Self {
        Self { hosts }
    }

    /// The first host that recognizes the specifier, if any
    pub fn lookup(&self, specifier: &Url) -> Option<&dyn RegistryHost> {
        self.hosts
            .iter()
            .find(|host| host.matches(specifier))
            .map(|host| host.as_ref())
    }
}

impl Default for RegistryTable {
    fn default() -> Self {
        Self::new(vec![
            Arc::new(DenoLandRegistry::default()),
            Arc::new(NpmCdnRegistry::esm_sh()),
            Arc::new(NpmCdnRegistry::unpkg()),
            Arc::new(NpmCdnRegistry::skypack()),
            Arc::new(NpmCdnRegistry::jsdelivr()),
            Arc::new(NestLandRegistry::default()),
            Arc::new(GithubRawRegistry::default()),
        ])
    }
}

/// Splits a path segment like `foo@1.0.0` into module name and version token
///
/// The token is `None` when the segment has no `@` separator, `Some("")`
/// when the separator is present but the version is empty.
pub(crate) fn split_version_segment(segment: &str) -> (&str, Option<&str>) {
    match segment.split_once('@') {
        Some((name, version)) => (name, Some(version)),
        None => (segment, None),
    }
}
