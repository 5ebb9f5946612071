//! Integration test utilities for the feed services
//!
//! Provides an in-memory implementation of every repository trait, a
//! scripted viewer-reaction lookup that records its calls, and builders for
//! post trees with explicit timestamps.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
