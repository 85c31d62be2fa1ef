//! Utility functions for D-Bus access and Wi-Fi data conversion.
//!
//! Provides helpers for decoding SSIDs, locating the Wi-Fi device, reading
//! IP configuration objects and bounding platform reads with a deadline.

use futures::{FutureExt, select};
use futures_timer::Delay;
use log::{debug, warn};
use std::borrow::Cow;
use std::collections::HashMap;
use std::future::Future;
use std::pin::pin;
use std::str;
use std::time::Duration;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::StatusError;
use crate::dbus::{NMActiveConnectionProxy, NMDeviceProxy, NMProxy, NMWirelessProxy};
use crate::types::constants::{device_type, timeouts};

/// Macro to convert Result to Option with error logging.
/// Usage: `try_log!(result, "context message")`
#[macro_export]
macro_rules! try_log {
    ($result:expr, $context:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}: {:?}", $context, e);
                return None;
            }
        }
    };
}

/// Decode SSID bytes, defaulting to an empty string if empty or invalid UTF-8.
pub(crate) fn decode_ssid_or_empty(bytes: &[u8]) -> Cow<'static, str> {
    if bytes.is_empty() {
        return Cow::Borrowed("");
    }

    match str::from_utf8(bytes) {
        Ok(s) => Cow::Owned(s.to_owned()),
        Err(e) => {
            warn!("Invalid UTF-8 in SSID: {e}");
            Cow::Borrowed("")
        }
    }
}

/// Whether an object path is NetworkManager's "no object" placeholder.
pub(crate) fn is_null_path(path: &OwnedObjectPath) -> bool {
    path.as_str() == "/"
}

/// Races `fut` against a deadline.
///
/// Returns `StatusError::Timeout(what)` if the deadline fires first. The
/// timer is runtime-agnostic, so this works under any executor. Limits
/// longer than a day are capped.
pub(crate) async fn with_deadline<T, F>(fut: F, limit: Duration, what: &'static str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let limit = limit.min(timeouts::max_wait());
    let mut fut = pin!(fut.fuse());
    let mut timeout_delay = pin!(Delay::new(limit).fuse());

    select! {
        out = fut => out,
        _ = timeout_delay => {
            warn!("{what} timed out after {limit:?}");
            Err(StatusError::Timeout(what))
        }
    }
}

/// Returns a wireless proxy for the first Wi-Fi device NetworkManager knows.
pub(crate) async fn first_wifi_device(conn: &Connection) -> Result<NMWirelessProxy<'_>> {
    let nm = NMProxy::new(conn).await?;
    let devices = nm.get_devices().await?;

    for dp in devices {
        let dev = NMDeviceProxy::builder(conn)
            .path(dp.clone())?
            .build()
            .await?;

        if dev.device_type().await? != device_type::WIFI {
            continue;
        }

        if let Ok(name) = dev.interface().await {
            debug!("Using Wi-Fi device {name} ({dp})");
        }

        let wifi = NMWirelessProxy::builder(conn).path(dp)?.build().await?;
        return Ok(wifi);
    }

    Err(StatusError::NoWifiDevice)
}

/// Helper to create a NetworkManager D-Bus proxy for a given path and interface.
///
/// Returns a zbus Proxy instance for the specified path and interface.
pub(crate) async fn nm_proxy<'a, P>(
    conn: &'a Connection,
    path: P,
    interface: &'a str,
) -> Result<zbus::Proxy<'a>>
where
    P: TryInto<OwnedObjectPath>,
    P::Error: Into<zbus::Error>,
{
    let owned_path = path.try_into().map_err(Into::into)?;
    Ok(zbus::proxy::Builder::new(conn)
        .destination("org.freedesktop.NetworkManager")?
        .path(owned_path)?
        .interface(interface)?
        .build()
        .await?)
}

/// Picks the bare address out of one `AddressData` entry.
fn address_from_entry(entry: &HashMap<String, zvariant::Value<'_>>) -> Option<String> {
    match entry.get("address")? {
        zvariant::Value::Str(s) => Some(s.as_str().to_string()),
        _ => None,
    }
}

/// Helper to extract the first IP address from an `AddressData` property.
async fn extract_ip_address(
    conn: &Connection,
    config_path: OwnedObjectPath,
    interface: &str,
) -> Option<String> {
    let proxy = try_log!(
        nm_proxy(conn, config_path, interface).await,
        "Failed to build IP config proxy"
    );
    let addr_array: Vec<HashMap<String, zvariant::Value>> = try_log!(
        proxy.get_property("AddressData").await,
        "Failed to read AddressData"
    );

    addr_array.first().and_then(address_from_entry)
}

/// Extracts the IP address of an active connection.
///
/// Prefers the IPv4 address and falls back to IPv6. The address is returned
/// without its prefix length (e.g. "192.168.1.100").
pub(crate) async fn ip_address_of_active_connection(
    conn: &Connection,
    active_conn_path: &OwnedObjectPath,
) -> Result<Option<String>> {
    let ac_proxy = NMActiveConnectionProxy::builder(conn)
        .path(active_conn_path.clone())?
        .build()
        .await?;

    if let Ok(id) = ac_proxy.id().await {
        debug!("Reading IP address of connection '{id}'");
    }

    let ip4_path = ac_proxy.ip4_config().await?;
    if !is_null_path(&ip4_path) {
        if let Some(addr) =
            extract_ip_address(conn, ip4_path, "org.freedesktop.NetworkManager.IP4Config").await
        {
            return Ok(Some(addr));
        }
    }

    let ip6_path = ac_proxy.ip6_config().await?;
    if !is_null_path(&ip6_path) {
        return Ok(
            extract_ip_address(conn, ip6_path, "org.freedesktop.NetworkManager.IP6Config").await,
        );
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ssid_or_empty() {
        assert_eq!(decode_ssid_or_empty(b"MyNetwork"), "MyNetwork");
        assert_eq!(decode_ssid_or_empty(b""), "");
        assert_eq!(decode_ssid_or_empty("café".as_bytes()), "café");
        assert_eq!(decode_ssid_or_empty(&[0xff, 0xfe]), "");
    }

    #[test]
    fn test_is_null_path() {
        let null = OwnedObjectPath::try_from("/").unwrap();
        let real = OwnedObjectPath::try_from("/org/freedesktop/NetworkManager/Devices/3").unwrap();
        assert!(is_null_path(&null));
        assert!(!is_null_path(&real));
    }

    #[test]
    fn test_address_from_entry() {
        let mut entry = HashMap::new();
        entry.insert(
            "address".to_string(),
            zvariant::Value::from("192.168.1.20"),
        );
        entry.insert("prefix".to_string(), zvariant::Value::from(24u32));
        assert_eq!(address_from_entry(&entry), Some("192.168.1.20".to_string()));

        let mut bad = HashMap::new();
        bad.insert("address".to_string(), zvariant::Value::from(7u32));
        assert_eq!(address_from_entry(&bad), None);
        assert_eq!(address_from_entry(&HashMap::new()), None);
    }

    #[tokio::test]
    async fn test_with_deadline_passes_value_through() {
        let out = with_deadline(async { Ok(42) }, Duration::from_secs(1), "test read").await;
        assert_eq!(out.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_deadline_accepts_huge_limit() {
        let out = with_deadline(async { Ok("fix") }, Duration::MAX, "slow read").await;
        assert_eq!(out.unwrap(), "fix");
    }

    #[tokio::test]
    async fn test_with_deadline_times_out() {
        let out: Result<()> = with_deadline(
            futures::future::pending(),
            Duration::from_millis(20),
            "hung read",
        )
        .await;
        assert!(matches!(out, Err(StatusError::Timeout("hung read"))));
    }
}
