use semver::Version;

/// Parse a version token into a strict semver version.
///
/// Strips a single leading `v` or `=` (registry tags are often written
/// `v1.2.3`). Partial versions like "1.2", branch names, and the empty
/// string yield None.
pub fn parse_version(token: &str) -> Option<Version> {
    let normalized = token
        .strip_prefix('v')
        .or_else(|| token.strip_prefix('='))
        .unwrap_or(token);
    Version::parse(normalized).ok()
}
