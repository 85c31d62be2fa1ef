//! Snapshot aggregation.
//!
//! Fans out four independent reads and merges them into one
//! [`ConnectivitySnapshot`]:
//!
//! - connectivity state, which decides `is_connected`, `connection_type` and
//!   `is_internet_reachable`
//! - the IP address
//! - Wi-Fi details (behind the permission gate), for `ssid` and
//!   `signal_strength_dbm`
//! - the position, for `location`
//!
//! The reads run concurrently and are all awaited before merging, so a slow
//! read delays the snapshot but never cancels the others. Only a failed
//! connectivity read fails the fetch.

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::Result;
use crate::api::models::{
    ConnectionType, ConnectivitySnapshot, FetchConfig, Location, StatusError, WifiDetails,
};
use crate::core::location::LocationReader;
use crate::core::permission::PermissionGate;
use crate::core::wifi_details::WifiDetailsReader;
use crate::platform::{
    ConnectivityReader, ConnectivityState, IpAddressReader, NetworkDetailsReader,
    PermissionRequester, PositionReader,
};
use crate::types::constants::timeouts;
use crate::util::utils::with_deadline;

/// Merges the results of the four reads.
///
/// Fields the platform omitted from the connectivity state take their
/// defaults: `false`, [`ConnectionType::Unknown`] and `None`.
pub(crate) fn merge(
    state: ConnectivityState,
    ip_address: Option<String>,
    wifi: WifiDetails,
    location: Option<Location>,
) -> ConnectivitySnapshot {
    ConnectivitySnapshot {
        is_connected: state.connected.unwrap_or(false),
        connection_type: state.connection_type.unwrap_or(ConnectionType::Unknown),
        is_internet_reachable: state.internet_reachable,
        signal_strength_dbm: Some(wifi.signal_strength_dbm),
        ssid: Some(wifi.ssid),
        ip_address,
        location,
    }
}

/// Produces [`ConnectivitySnapshot`]s from injected platform collaborators.
///
/// `Aggregator` is cheap to clone; clones share the collaborators. Calls to
/// [`fetch_snapshot`](Self::fetch_snapshot) are independent of each other and
/// may run concurrently.
#[derive(Clone)]
pub struct Aggregator {
    connectivity: Arc<dyn ConnectivityReader>,
    ip: Arc<dyn IpAddressReader>,
    wifi: WifiDetailsReader,
    location: LocationReader,
    read_timeout: Duration,
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("wifi", &self.wifi)
            .field("location", &self.location)
            .field("read_timeout", &self.read_timeout)
            .finish_non_exhaustive()
    }
}

impl Aggregator {
    /// Creates an aggregator from individual collaborators.
    pub fn new(
        connectivity: Arc<dyn ConnectivityReader>,
        ip: Arc<dyn IpAddressReader>,
        wifi: WifiDetailsReader,
        location: LocationReader,
    ) -> Self {
        Self {
            connectivity,
            ip,
            wifi,
            location,
            read_timeout: timeouts::read_timeout(),
        }
    }

    /// Creates an aggregator whose collaborators are all served by `platform`.
    ///
    /// `config` decides the read deadlines, whether permissions are
    /// required, and whether and how precisely the position is read.
    pub fn from_platform<P>(platform: Arc<P>, config: &FetchConfig) -> Self
    where
        P: ConnectivityReader
            + NetworkDetailsReader
            + IpAddressReader
            + PositionReader
            + PermissionRequester
            + 'static,
    {
        let gate = if config.permissions_required {
            let requester: Arc<dyn PermissionRequester> = platform.clone();
            PermissionGate::new(requester).with_timeout(config.read_timeout)
        } else {
            PermissionGate::not_required()
        };

        let details: Arc<dyn NetworkDetailsReader> = platform.clone();
        let wifi = WifiDetailsReader::new(gate, details).with_timeout(config.read_timeout);

        let location = if config.location_enabled {
            let position: Arc<dyn PositionReader> = platform.clone();
            LocationReader::new(position, config.location_accuracy)
                .with_timeout(config.location_timeout)
        } else {
            LocationReader::disabled()
        };

        let connectivity: Arc<dyn ConnectivityReader> = platform.clone();
        let ip: Arc<dyn IpAddressReader> = platform;

        Self::new(connectivity, ip, wifi, location).with_read_timeout(config.read_timeout)
    }

    /// Sets the deadline for the connectivity and IP address reads.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn wifi_details(&self) -> &WifiDetailsReader {
        &self.wifi
    }

    pub fn location(&self) -> &LocationReader {
        &self.location
    }

    /// Reads the IP address, substituting `None` for any failure.
    async fn read_ip_address(&self) -> Option<String> {
        match with_deadline(self.ip.read_ip_address(), self.read_timeout, "IP address read").await
        {
            Ok(ip) => ip,
            Err(e) => {
                warn!("Error getting IP address: {e}");
                None
            }
        }
    }

    /// Fetches a fresh snapshot.
    ///
    /// All four reads are started together and awaited together. Wi-Fi
    /// details, the IP address and the position fall back to their defaults
    /// on failure. A failed or timed out connectivity read returns
    /// [`StatusError::NetworkUnavailable`].
    pub async fn fetch_snapshot(&self) -> Result<ConnectivitySnapshot> {
        let (state, ip_address, wifi, location) = futures::join!(
            with_deadline(
                self.connectivity.read_connectivity(),
                self.read_timeout,
                "connectivity read",
            ),
            self.read_ip_address(),
            self.wifi.get_wifi_info(),
            self.location.get_location(),
        );

        let state = state.map_err(|e| {
            warn!("Unable to get network information: {e}");
            StatusError::NetworkUnavailable(Box::new(e))
        })?;

        let snapshot = merge(state, ip_address, wifi, location);
        debug!("Fetched snapshot: {snapshot:?}");
        Ok(snapshot)
    }
}
