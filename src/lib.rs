//! Dependency freshness scoring for URL-imported modules
//!
//! Given a root module URL, the service obtains the module's import graph,
//! excludes the root's local files, scores every external dependency against
//! the registry that hosts it, and serves the result as a JSON report and an
//! SVG badge.

pub mod badge;
pub mod config;
pub mod graph;
pub mod score;
pub mod server;
