//! NetworkManager Active Connection proxy.

use zbus::{Result, proxy};
use zvariant::OwnedObjectPath;

/// Proxy for active connection interface.
///
/// Used to reach the IP configuration objects of the primary connection.
#[proxy(
    interface = "org.freedesktop.NetworkManager.Connection.Active",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMActiveConnection {
    /// Connection identifier (usually the SSID for Wi-Fi).
    #[zbus(property)]
    fn id(&self) -> Result<String>;

    /// Path to the IPv4 configuration ("/" if not configured).
    #[zbus(property, name = "Ip4Config")]
    fn ip4_config(&self) -> Result<OwnedObjectPath>;

    /// Path to the IPv6 configuration ("/" if not configured).
    #[zbus(property, name = "Ip6Config")]
    fn ip6_config(&self) -> Result<OwnedObjectPath>;
}
