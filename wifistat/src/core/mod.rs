//! Core status logic.
//!
//! This module contains the permission gate, the Wi-Fi details and
//! geolocation readers, the aggregator that merges their results into a
//! snapshot, and the signal classifier.

pub mod aggregator;
pub mod location;
pub mod permission;
pub mod signal;
pub mod wifi_details;
