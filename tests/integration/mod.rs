//! Integration tests for fitrun
//!
//! These tests verify that multiple components work together correctly.

#[path = "../common/mod.rs"]
pub mod common;

pub mod session_flow;
pub mod ui_render;
