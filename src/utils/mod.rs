//! Utility module for common operations
//!
//! This module provides the numerical helpers shared by the network
//! and the signal code.

pub mod math;

pub use math::*;
