use async_trait::async_trait;
use std::time::Duration;
use zbus::Connection;

use crate::Result;
use crate::api::models::{Location, LocationAccuracy, PermissionKind, PermissionStatus};
use crate::platform::{
    ConnectivityReader, ConnectivityState, IpAddressReader, NetworkDetails, NetworkDetailsReader,
    PermissionRequester, PositionReader, geoclue, network,
};

/// Linux platform backed by NetworkManager and GeoClue2.
///
/// Serves every collaborator the aggregator needs from one system D-Bus
/// connection:
///
/// - connectivity, Wi-Fi details and the IP address from NetworkManager
/// - the position from GeoClue2
/// - the `WifiInfo` permission from NetworkManager's `GetPermissions()`, the
///   `Location` permission from GeoClue2's available accuracy level
///
/// `LinuxPlatform` is `Clone`; clones share the same connection.
#[derive(Debug, Clone)]
pub struct LinuxPlatform {
    conn: Connection,
    desktop_id: String,
}

impl LinuxPlatform {
    /// Connects to the system D-Bus.
    ///
    /// `desktop_id` is the identity presented to GeoClue2.
    pub async fn new(desktop_id: impl Into<String>) -> Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self::with_connection(conn, desktop_id))
    }

    /// Builds a platform over an existing connection.
    pub fn with_connection(conn: Connection, desktop_id: impl Into<String>) -> Self {
        Self {
            conn,
            desktop_id: desktop_id.into(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl ConnectivityReader for LinuxPlatform {
    async fn read_connectivity(&self) -> Result<ConnectivityState> {
        network::read_connectivity(&self.conn).await
    }
}

#[async_trait]
impl NetworkDetailsReader for LinuxPlatform {
    async fn read_network_details(&self) -> Result<NetworkDetails> {
        network::read_network_details(&self.conn).await
    }
}

#[async_trait]
impl IpAddressReader for LinuxPlatform {
    async fn read_ip_address(&self) -> Result<Option<String>> {
        network::read_ip_address(&self.conn).await
    }
}

#[async_trait]
impl PositionReader for LinuxPlatform {
    async fn read_current_position(
        &self,
        accuracy: LocationAccuracy,
        timeout: Duration,
    ) -> Result<Location> {
        geoclue::current_position(&self.conn, &self.desktop_id, accuracy, timeout).await
    }
}

#[async_trait]
impl PermissionRequester for LinuxPlatform {
    async fn request_permission(&self, kind: PermissionKind) -> Result<PermissionStatus> {
        match kind {
            PermissionKind::WifiInfo => network::wifi_info_permission(&self.conn).await,
            PermissionKind::Location => geoclue::location_permission(&self.conn).await,
        }
    }
}
