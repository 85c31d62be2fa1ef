//! Main NetworkManager proxy.

use std::collections::HashMap;
use zbus::proxy;
use zvariant::OwnedObjectPath;

/// Proxy for the main NetworkManager interface.
///
/// Provides the global connection state, the primary connection and the
/// caller's permissions.
#[proxy(
    interface = "org.freedesktop.NetworkManager",
    default_service = "org.freedesktop.NetworkManager",
    default_path = "/org/freedesktop/NetworkManager"
)]
pub trait NM {
    /// Returns paths to all network devices.
    fn get_devices(&self) -> zbus::Result<Vec<OwnedObjectPath>>;

    /// Returns the caller's permissions, keyed by permission name.
    ///
    /// Values are `"yes"`, `"no"` or `"auth"`.
    fn get_permissions(&self) -> zbus::Result<HashMap<String, String>>;

    /// Overall networking state (`NMState`, 70 = connected globally).
    #[zbus(property)]
    fn state(&self) -> zbus::Result<u32>;

    /// Result of the last connectivity check (`NMConnectivityState`).
    #[zbus(property)]
    fn connectivity(&self) -> zbus::Result<u32>;

    /// Path to the active connection carrying the default route ("/" if none).
    #[zbus(property)]
    fn primary_connection(&self) -> zbus::Result<OwnedObjectPath>;

    /// Setting type of the primary connection (e.g. "802-11-wireless").
    #[zbus(property)]
    fn primary_connection_type(&self) -> zbus::Result<String>;
}
