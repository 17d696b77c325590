//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BundlePipeline` - Builds the combined unit in memory
//! - `BuildUseCase` - Pipeline, render, atomic write, report

pub mod build;
pub mod pipeline;

pub use build::{BuildResult, BuildUseCase};
pub use pipeline::BundlePipeline;
