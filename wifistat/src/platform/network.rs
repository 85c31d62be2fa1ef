//! NetworkManager-backed reads.
//!
//! Connectivity comes from the main NetworkManager object, Wi-Fi details
//! from the active access point of the Wi-Fi device, and the IP address
//! from the primary connection's IP configuration.

use log::debug;
use zbus::Connection;

use crate::Result;
use crate::api::models::{ConnectionType, PermissionKind, PermissionStatus, StatusError};
use crate::dbus::{NMAccessPointProxy, NMProxy};
use crate::platform::{ConnectivityState, NetworkDetails, StrengthReading};
use crate::types::constants::{connectivity, nm_permission, nm_state};
use crate::util::utils::{
    decode_ssid_or_empty, first_wifi_device, ip_address_of_active_connection, is_null_path,
};

/// Maps an `NMConnectivityState` code to internet reachability.
///
/// Only `FULL` counts as reachable. A captive portal or limited
/// connectivity does not. `UNKNOWN` and unmapped codes stay unknown.
pub(crate) fn reachability_from_connectivity(code: u32) -> Option<bool> {
    match code {
        connectivity::FULL => Some(true),
        connectivity::NONE | connectivity::PORTAL | connectivity::LIMITED => Some(false),
        connectivity::UNKNOWN => None,
        _ => None,
    }
}

/// Whether an `NMState` code means at least a local connection is up.
pub(crate) fn connected_from_state(state: u32) -> bool {
    state >= nm_state::CONNECTED_LOCAL
}

/// Reads the global connectivity state.
///
/// `State` is required; a failure there fails the read. `Connectivity` and
/// `PrimaryConnectionType` are optional and left unset when unreadable.
pub(crate) async fn read_connectivity(conn: &Connection) -> Result<ConnectivityState> {
    let nm = NMProxy::new(conn).await?;

    let state = nm.state().await?;
    let internet_reachable = match nm.connectivity().await {
        Ok(code) => reachability_from_connectivity(code),
        Err(e) => {
            debug!("Connectivity property unavailable: {e}");
            None
        }
    };
    let connection_type = nm
        .primary_connection_type()
        .await
        .ok()
        .map(|name| ConnectionType::from(name.as_str()));

    debug!("NetworkManager state {state}, reachable {internet_reachable:?}, type {connection_type:?}");

    Ok(ConnectivityState {
        connected: Some(connected_from_state(state)),
        connection_type,
        internet_reachable,
    })
}

/// Reads the SSID and link quality of the access point the Wi-Fi device is
/// associated with.
pub(crate) async fn read_network_details(conn: &Connection) -> Result<NetworkDetails> {
    let wifi = first_wifi_device(conn).await?;

    let active_ap = wifi.active_access_point().await?;
    if is_null_path(&active_ap) {
        debug!("Wi-Fi device has no active access point");
        return Ok(NetworkDetails::default());
    }

    let ap = NMAccessPointProxy::builder(conn)
        .path(active_ap)?
        .build()
        .await?;

    let ssid_bytes = ap.ssid().await?;
    let ssid = decode_ssid_or_empty(&ssid_bytes);
    let strength = ap.strength().await.ok().map(StrengthReading::Quality);

    Ok(NetworkDetails {
        ssid: (!ssid.is_empty()).then(|| ssid.into_owned()),
        strength,
    })
}

/// Reads the IP address of the primary connection.
pub(crate) async fn read_ip_address(conn: &Connection) -> Result<Option<String>> {
    let nm = NMProxy::new(conn).await?;
    let primary = nm.primary_connection().await?;

    if is_null_path(&primary) {
        debug!("No primary connection, so no IP address");
        return Ok(None);
    }

    ip_address_of_active_connection(conn, &primary).await
}

/// Maps a `GetPermissions()` result for `wifi.scan` to a permission status.
///
/// `"yes"` grants. `"no"` is a hard refusal and returns
/// [`StatusError::PermissionDenied`]. Anything else, including `"auth"`
/// and a missing entry, is a plain denial.
pub(crate) fn wifi_permission_from(result: Option<&str>) -> Result<PermissionStatus> {
    match result {
        Some(nm_permission::GRANTED) => Ok(PermissionStatus::Granted),
        Some(nm_permission::REFUSED) => {
            Err(StatusError::PermissionDenied(PermissionKind::WifiInfo))
        }
        _ => Ok(PermissionStatus::Denied),
    }
}

/// Checks whether the caller may read Wi-Fi information.
///
/// Uses NetworkManager's `wifi.scan` permission.
pub(crate) async fn wifi_info_permission(conn: &Connection) -> Result<PermissionStatus> {
    let nm = NMProxy::new(conn).await?;
    let permissions = nm.get_permissions().await?;
    let result = permissions.get(nm_permission::WIFI_SCAN).map(String::as_str);

    debug!("{} = {result:?}", nm_permission::WIFI_SCAN);

    wifi_permission_from(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachability_codes() {
        assert_eq!(reachability_from_connectivity(0), None);
        assert_eq!(reachability_from_connectivity(1), Some(false));
        assert_eq!(reachability_from_connectivity(2), Some(false));
        assert_eq!(reachability_from_connectivity(3), Some(false));
        assert_eq!(reachability_from_connectivity(4), Some(true));
        assert_eq!(reachability_from_connectivity(42), None);
    }

    #[test]
    fn wifi_permission_results() {
        assert_eq!(
            wifi_permission_from(Some("yes")).unwrap(),
            PermissionStatus::Granted
        );
        assert_eq!(
            wifi_permission_from(Some("auth")).unwrap(),
            PermissionStatus::Denied
        );
        assert_eq!(wifi_permission_from(None).unwrap(), PermissionStatus::Denied);
        assert!(matches!(
            wifi_permission_from(Some("no")),
            Err(StatusError::PermissionDenied(PermissionKind::WifiInfo))
        ));
    }

    #[test]
    fn connected_states() {
        assert!(!connected_from_state(0));
        assert!(!connected_from_state(20));
        assert!(!connected_from_state(40));
        assert!(connected_from_state(50));
        assert!(connected_from_state(60));
        assert!(connected_from_state(70));
    }
}
