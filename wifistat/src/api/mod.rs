//! Public API module.
//!
//! This module contains the high-level user-facing API for the `wifistat` crate.

pub mod models;
pub mod wifi_status;
