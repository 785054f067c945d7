//! Common test utilities for tropocorr.
//!
//! This module provides shared fixtures and float assertions for the
//! integration tests.

pub mod assertions;
pub mod test_data;
