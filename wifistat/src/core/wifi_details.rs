//! Wi-Fi details reader.
//!
//! Reads the SSID and signal strength behind the permission gate and never
//! fails: a denied permission yields the `"Permission Denied"` record, a
//! failed or timed out read yields the `"Unknown"` record.

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::models::WifiDetails;
use crate::core::permission::PermissionGate;
use crate::core::signal::reading_to_dbm;
use crate::platform::{NetworkDetails, NetworkDetailsReader};
use crate::types::constants::{sentinel, timeouts};
use crate::util::utils::with_deadline;

/// Shapes raw platform details into a [`WifiDetails`] record.
///
/// A missing or empty SSID becomes `"Unknown"`; the strength is converted
/// to dBm with [`reading_to_dbm`].
pub(crate) fn shape_details(details: NetworkDetails) -> WifiDetails {
    let ssid = details
        .ssid
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| sentinel::SSID_UNKNOWN.to_string());

    WifiDetails {
        ssid,
        signal_strength_dbm: reading_to_dbm(details.strength),
    }
}

/// Reads Wi-Fi details once the permission gate allows it.
#[derive(Clone)]
pub struct WifiDetailsReader {
    gate: PermissionGate,
    details: Arc<dyn NetworkDetailsReader>,
    timeout: Duration,
}

impl fmt::Debug for WifiDetailsReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiDetailsReader")
            .field("gate", &self.gate)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl WifiDetailsReader {
    pub fn new(gate: PermissionGate, details: Arc<dyn NetworkDetailsReader>) -> Self {
        Self {
            gate,
            details,
            timeout: timeouts::read_timeout(),
        }
    }

    /// Sets the deadline for the underlying details read.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// Returns the SSID and signal strength of the current Wi-Fi link.
    ///
    /// The underlying read is skipped entirely when permissions are denied.
    pub async fn get_wifi_info(&self) -> WifiDetails {
        if !self.gate.request_permissions().await {
            debug!("Permissions denied, skipping Wi-Fi details read");
            return WifiDetails::permission_denied();
        }

        match with_deadline(
            self.details.read_network_details(),
            self.timeout,
            "network details read",
        )
        .await
        {
            Ok(details) => {
                let shaped = shape_details(details);
                debug!(
                    "SSID: {}, strength: {} dBm",
                    shaped.ssid, shaped.signal_strength_dbm
                );
                shaped
            }
            Err(e) => {
                warn!("Error getting Wi-Fi info: {e}");
                WifiDetails::unknown()
            }
        }
    }
}
