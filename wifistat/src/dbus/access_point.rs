//! NetworkManager Access Point proxy.

use zbus::{Result, proxy};

/// Proxy for access point interface.
///
/// Provides the SSID and link quality of the access point a Wi-Fi device is
/// associated with.
#[proxy(
    interface = "org.freedesktop.NetworkManager.AccessPoint",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMAccessPoint {
    /// SSID as raw bytes (may not be valid UTF-8).
    #[zbus(property)]
    fn ssid(&self) -> Result<Vec<u8>>;

    /// Signal strength as percentage (0-100).
    #[zbus(property)]
    fn strength(&self) -> Result<u8>;
}
