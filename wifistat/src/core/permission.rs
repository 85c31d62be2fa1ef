//! Runtime permission gate.
//!
//! Wi-Fi details are only read after the location and Wi-Fi info
//! permissions have both been granted. The two requests are issued
//! concurrently. The gate never fails: an error from either request counts
//! as a denial.

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::models::PermissionKind;
use crate::platform::PermissionRequester;
use crate::types::constants::timeouts;
use crate::util::utils::with_deadline;

/// Collapses the two runtime permission requests into one granted/denied outcome.
#[derive(Clone)]
pub struct PermissionGate {
    requester: Option<Arc<dyn PermissionRequester>>,
    timeout: Duration,
}

impl fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionGate")
            .field("required", &self.requester.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PermissionGate {
    /// Creates a gate that asks `requester` for both permissions on every check.
    pub fn new(requester: Arc<dyn PermissionRequester>) -> Self {
        Self {
            requester: Some(requester),
            timeout: timeouts::read_timeout(),
        }
    }

    /// Creates a gate for platforms without runtime grants; it always grants.
    pub fn not_required() -> Self {
        Self {
            requester: None,
            timeout: timeouts::read_timeout(),
        }
    }

    /// Sets the deadline for each permission request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether this gate asks a requester at all.
    pub fn is_required(&self) -> bool {
        self.requester.is_some()
    }

    /// Requests the location and Wi-Fi info permissions.
    ///
    /// Returns `true` only if both are granted. Errors and timeouts are
    /// logged and count as denial.
    pub async fn request_permissions(&self) -> bool {
        let Some(requester) = &self.requester else {
            return true;
        };

        let (location, wifi) = futures::join!(
            with_deadline(
                requester.request_permission(PermissionKind::Location),
                self.timeout,
                "location permission request",
            ),
            with_deadline(
                requester.request_permission(PermissionKind::WifiInfo),
                self.timeout,
                "wifi info permission request",
            ),
        );

        match (location, wifi) {
            (Ok(location), Ok(wifi)) => {
                debug!("Permissions: location {location:?}, wifi info {wifi:?}");
                location.is_granted() && wifi.is_granted()
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Permission request failed: {e}");
                false
            }
        }
    }
}
