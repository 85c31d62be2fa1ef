//! Platform collaborators.
//!
//! The aggregator never talks to the system directly. It reads through the
//! traits in this module, so a test can substitute each collaborator with a
//! mock and the Linux backend ([`LinuxPlatform`]) can serve all of them from
//! one D-Bus connection.

mod geoclue;
mod linux;
mod network;

pub use linux::LinuxPlatform;

use async_trait::async_trait;
use std::time::Duration;

use crate::Result;
use crate::api::models::{
    ConnectionType, Location, LocationAccuracy, PermissionKind, PermissionStatus,
};

/// Raw network state as reported by the platform.
///
/// `None` means the platform did not report the field; the aggregator
/// substitutes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityState {
    pub connected: Option<bool>,
    pub connection_type: Option<ConnectionType>,
    pub internet_reachable: Option<bool>,
}

/// A raw signal strength reading in platform-specific units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthReading {
    /// Link quality on a 0-100 scale (NetworkManager's access point `Strength`).
    Quality(u8),
    /// Signal power already expressed in dBm.
    Dbm(i32),
}

/// Raw Wi-Fi details as reported by the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkDetails {
    pub ssid: Option<String>,
    pub strength: Option<StrengthReading>,
}

/// Reads the global connectivity state.
#[async_trait]
pub trait ConnectivityReader: Send + Sync {
    async fn read_connectivity(&self) -> Result<ConnectivityState>;
}

/// Reads low-level details of the current Wi-Fi link.
#[async_trait]
pub trait NetworkDetailsReader: Send + Sync {
    async fn read_network_details(&self) -> Result<NetworkDetails>;
}

/// Reads the device IP address. `Ok(None)` means the device has none.
#[async_trait]
pub trait IpAddressReader: Send + Sync {
    async fn read_ip_address(&self) -> Result<Option<String>>;
}

/// Reads the current geographic position.
///
/// Implementations give up waiting for a fix after `timeout` and release
/// any provider session before returning. Callers only cut the read off
/// after an extra grace period.
#[async_trait]
pub trait PositionReader: Send + Sync {
    async fn read_current_position(
        &self,
        accuracy: LocationAccuracy,
        timeout: Duration,
    ) -> Result<Location>;
}

/// Issues a single runtime permission request.
#[async_trait]
pub trait PermissionRequester: Send + Sync {
    async fn request_permission(&self, kind: PermissionKind) -> Result<PermissionStatus>;
}
