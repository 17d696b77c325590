//! Common test utilities for Monolink integration, contract and scenario tests.
//!
//! This module provides:
//! - `TestProject`: Isolated project directory plus helpers to run the CLI
//! - Assertion macros: `assert_built!`, `assert_output_contains!`, etc.
//! - Fixtures: Reusable Lua sources and manifests
//! - `build_in_memory`: Library builds against `MemoryFs`

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;
pub mod memory;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
pub use memory::*;
