//! Shared setup for the finreport demos.
pub mod common;
