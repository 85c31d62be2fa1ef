//! Shared helpers for D-Bus access and data conversion.

pub(crate) mod utils;
