//! Module graph acquisition and shaping
//!
//! The graph of a root module comes from an external graph-construction API;
//! this layer fetches the raw payload, shapes it into a bidirectional
//! [`builder::ModuleGraph`], and computes the root's local-file closure.
//!
//! # Modules
//!
//! - [`provider`]: `GraphProvider` trait and the payload types it returns
//! - [`remote`]: HTTP implementation of the provider
//! - [`builder`]: `ModuleGraph` / `ModuleNode` shaping, edge classification
//! - [`local`]: breadth-first local-closure computation
//! - [`error`]: graph construction errors (always fatal, never retried)

pub mod builder;
pub mod error;
pub mod local;
pub mod provider;
pub mod remote;
