//! Freshness scoring layer
//!
//! Turns a module graph into a per-module freshness report: every external
//! module is resolved against the registry that hosts it, its pinned version
//! is compared with the latest published one, and the per-module scores are
//! averaged into the report score.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Scorer    │────▶│  Registry   │────▶│ Registries  │
//! │  (report)   │     │  (lookup)   │     │ (deno, npm) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       │
//!        ▼                                       ▼
//! ┌─────────────┐                         ┌─────────────┐
//! │ Comparator  │                         │   Version   │
//! │ (decision)  │                         │ (resolution)│
//! └─────────────┘                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: TTL report cache with in-flight coalescing
//! - [`comparator`]: the freshness decision table
//! - [`registry`]: `RegistryHost` trait and the ordered lookup table
//! - [`registries`]: concrete hosts (deno.land, npm CDNs, nest.land, GitHub)
//! - [`report`]: `Scorer`, `ScoreRecord` and `FreshnessReport`
//! - [`semver`]: version token parsing
//! - [`version`]: pinned/latest version resolution per module
//! - [`error`]: registry, scoring and cache errors

pub mod cache;
pub mod comparator;
pub mod error;
pub mod registries;
pub mod registry;
pub mod report;
pub mod semver;
pub mod version;
