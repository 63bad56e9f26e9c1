//! Freshness decision table comparing pinned and latest versions

use crate::score::version::VersionInfo;

/// Outcome of the freshness comparison for one module
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Freshness {
    pub score: f64,
    pub message: &'static str,
}

impl Freshness {
    fn new(score: f64, message: &'static str) -> Self {
        Self { score, message }
    }
}

/// Classifies a module's version information into a freshness score.
///
/// Pure over its input. Rows are checked in order and the first match wins,
/// so reordering them changes behavior: a missing latest version outranks a
/// missing current version, and exact string equality outranks semver
/// comparison.
pub fn classify(info: &VersionInfo) -> Freshness {
    let Some(latest_version) = info.latest_version.as_deref() else {
        return Freshness::new(0.0, "Registry not found");
    };

    let Some(current_version) = info.current_version.as_deref() else {
        return Freshness::new(0.0, "Failed to parse the current version");
    };

    if current_version == latest_version {
        return Freshness::new(1.0, "Latest version is used");
    }

    let Some(current) = &info.current_semver else {
        return Freshness::new(0.0, "Version is not pinned");
    };

    let Some(latest) = &info.latest_semver else {
        return Freshness::new(0.4, "Failed to parse the latest version");
    };

    if current.major != latest.major {
        return Freshness::new(0.5, "Major versions do not match");
    }

    if current.minor != latest.minor {
        return Freshness::new(0.7, "Minor versions do not match");
    }

    if current.patch != latest.patch {
        return Freshness::new(0.9, "Patch versions do not match");
    }

    Freshness::new(1.0, "Latest version is used")
}
