//! Common test utilities for dmtopo CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated temp directory, config home and CLI runner
//! - Fixtures: reusable topology documents

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
