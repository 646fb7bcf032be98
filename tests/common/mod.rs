//! Common test utilities for nameplot.
//!
//! This module provides shared fixtures, a recording map backend and
//! assertion helpers for the integration tests.
#![allow(dead_code)]

pub mod assertions;
pub mod image_utils;
pub mod recording_map;
pub mod test_data;
