//! Registry host implementations for module-hosting services

pub mod deno_land;
pub mod github;
pub mod nest_land;
pub mod npm_cdn;

pub use deno_land::DenoLandRegistry;
pub use github::GithubRawRegistry;
pub use nest_land::NestLandRegistry;
pub use npm_cdn::NpmCdnRegistry;
