//! revue library crate
//!
//! Exposes the review client and diff engine so the binary and tests
//! can exercise them without going through terminal startup.

pub mod app;
pub mod config;
pub mod diff;
pub mod review;
pub mod source;
pub mod ui;
