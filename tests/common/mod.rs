//! Shared test utilities for fitrun
//!
//! This module provides common helpers for integration tests:
//! - Plan and session fixtures plus an app harness on a manual clock
//! - TUI terminal testing helpers

pub mod fixtures;
pub mod terminal;
