//! Type definitions and constants.
//!
//! This module contains NetworkManager and GeoClue2 constants together with
//! the signal thresholds and sentinel values used by the aggregator.

pub(crate) mod constants;
