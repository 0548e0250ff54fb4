//! Utility functions used across the scheduler core.
pub mod string_utils;
