use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;

use crate::types::constants::{color, connection_type, sentinel, timeouts};

/// The kind of link carrying the primary connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    /// Wi-Fi (802.11).
    Wifi,
    /// Mobile broadband (GSM/CDMA).
    Cellular,
    /// Wired Ethernet.
    Ethernet,
    /// Bluetooth tethering.
    Bluetooth,
    /// VPN or WireGuard tunnel.
    Vpn,
    /// No active connection.
    None,
    /// The platform did not report a type.
    Unknown,
    /// A connection type not mapped to a specific variant.
    Other(String),
}

impl From<&str> for ConnectionType {
    /// Maps NetworkManager connection setting type names to a `ConnectionType`.
    ///
    /// An empty name means NetworkManager has no primary connection.
    fn from(name: &str) -> Self {
        match name {
            "" => Self::None,
            connection_type::WIRELESS => Self::Wifi,
            connection_type::ETHERNET => Self::Ethernet,
            connection_type::GSM | connection_type::CDMA => Self::Cellular,
            connection_type::BLUETOOTH => Self::Bluetooth,
            connection_type::VPN | connection_type::WIREGUARD => Self::Vpn,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for ConnectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wifi => write!(f, "wifi"),
            Self::Cellular => write!(f, "cellular"),
            Self::Ethernet => write!(f, "ethernet"),
            Self::Bluetooth => write!(f, "bluetooth"),
            Self::Vpn => write!(f, "vpn"),
            Self::None => write!(f, "none"),
            Self::Unknown => write!(f, "unknown"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

impl Serialize for ConnectionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// The merged result of one status fetch.
///
/// Every field holds either a real value or an explicit default/sentinel:
/// `is_connected` defaults to `false`, `connection_type` to
/// [`ConnectionType::Unknown`], and `is_internet_reachable` to `None`
/// (unknown). `ssid` carries `"Unknown"` when it could not be read and
/// `"Permission Denied"` when the runtime permissions were refused.
///
/// Snapshots are never mutated; every fetch produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivitySnapshot {
    pub is_connected: bool,
    pub connection_type: ConnectionType,
    pub is_internet_reachable: Option<bool>,
    pub signal_strength_dbm: Option<i32>,
    pub ssid: Option<String>,
    pub ip_address: Option<String>,
    pub location: Option<Location>,
}

impl ConnectivitySnapshot {
    /// Classifies the snapshot's signal strength, if one was read.
    pub fn signal_quality(&self) -> Option<SignalQuality> {
        self.signal_strength_dbm.map(crate::core::signal::classify)
    }
}

/// SSID and signal strength as produced by the Wi-Fi details reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WifiDetails {
    pub ssid: String,
    pub signal_strength_dbm: i32,
}

impl WifiDetails {
    /// The record returned when the runtime permissions were refused.
    pub fn permission_denied() -> Self {
        Self {
            ssid: sentinel::SSID_PERMISSION_DENIED.to_string(),
            signal_strength_dbm: sentinel::NO_SIGNAL_DBM,
        }
    }

    /// The record returned when the details read failed.
    pub fn unknown() -> Self {
        Self {
            ssid: sentinel::SSID_UNKNOWN.to_string(),
            signal_strength_dbm: sentinel::NO_SIGNAL_DBM,
        }
    }
}

/// Discrete signal quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SignalTier {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SignalTier {
    /// Color key associated with the tier.
    pub fn color_key(self) -> &'static str {
        match self {
            Self::Excellent => color::GREEN,
            Self::Good => color::LIGHT_GREEN,
            Self::Fair => color::AMBER,
            Self::Poor => color::RED,
        }
    }

    /// Icon key associated with the tier.
    pub fn icon_key(self) -> &'static str {
        match self {
            Self::Excellent => "wifi-strength-4",
            Self::Good => "wifi-strength-3",
            Self::Fair => "wifi-strength-2",
            Self::Poor => "wifi-strength-1",
        }
    }
}

impl Display for SignalTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "Excellent"),
            Self::Good => write!(f, "Good"),
            Self::Fair => write!(f, "Fair"),
            Self::Poor => write!(f, "Poor"),
        }
    }
}

/// Signal strength derived from a dBm value by [`classify`](crate::classify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignalQuality {
    /// Normalized strength, 0 to 100.
    pub percentage: u8,
    pub tier: SignalTier,
    pub color_key: &'static str,
    pub icon_key: &'static str,
}

/// Runtime permissions requested before reading Wi-Fi details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    /// Access to the device position.
    Location,
    /// Access to Wi-Fi network information.
    WifiInfo,
}

impl Display for PermissionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Location => write!(f, "location"),
            Self::WifiInfo => write!(f, "wifi info"),
        }
    }
}

/// Outcome of a single permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for PermissionStatus {
    fn from(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// Requested accuracy for a position fix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LocationAccuracy {
    /// City-level accuracy.
    Low,
    /// Street-level accuracy.
    Balanced,
    /// The most accurate fix available.
    #[default]
    High,
}

/// Errors raised by the platform readers and the aggregator.
///
/// Most of these never escape the aggregator: each sub-reader recovers
/// locally and substitutes a default. [`NetworkUnavailable`] is the one
/// error [`Aggregator::fetch_snapshot`](crate::Aggregator::fetch_snapshot)
/// returns.
///
/// [`NetworkUnavailable`]: StatusError::NetworkUnavailable
#[derive(Debug, Error)]
pub enum StatusError {
    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A runtime permission was refused outright, e.g. NetworkManager
    /// answering `"no"` for `wifi.scan`. The permission gate counts it as
    /// a denial.
    #[error("permission denied: {0}")]
    PermissionDenied(PermissionKind),

    /// No Wi-Fi device was found on the system.
    #[error("no Wi-Fi device found")]
    NoWifiDevice,

    /// The position provider could not produce a fix.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),

    /// A platform read did not complete before its deadline.
    #[error("{0} timed out")]
    Timeout(&'static str),

    /// The connectivity state could not be read, so no snapshot exists.
    #[error("unable to get network information: {0}")]
    NetworkUnavailable(#[source] Box<StatusError>),
}

/// Fetch, permission and polling configuration.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use wifistat::{FetchConfig, LocationAccuracy};
///
/// let config = FetchConfig::new()
///     .with_read_timeout(Duration::from_secs(2))
///     .with_location_accuracy(LocationAccuracy::Balanced)
///     .with_poll_interval(Duration::from_secs(10));
///
/// assert_eq!(config.read_timeout, Duration::from_secs(2));
/// assert!(config.location_enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Deadline for each connectivity, details, IP and permission read.
    pub read_timeout: Duration,
    /// Deadline for a position fix.
    pub location_timeout: Duration,
    /// Accuracy requested from the position provider.
    pub location_accuracy: LocationAccuracy,
    /// Whether to read the position at all.
    pub location_enabled: bool,
    /// Whether runtime permissions must be granted before Wi-Fi details are read.
    pub permissions_required: bool,
    /// Interval between periodic re-fetches.
    pub poll_interval: Duration,
    /// Desktop ID presented to GeoClue2 when requesting a position.
    pub desktop_id: String,
}

impl Default for FetchConfig {
    /// Returns the default configuration.
    ///
    /// Defaults:
    /// - `read_timeout`: 5 seconds
    /// - `location_timeout`: 10 seconds
    /// - `location_accuracy`: `High`
    /// - `location_enabled`: `true`
    /// - `permissions_required`: `true`
    /// - `poll_interval`: 5 seconds
    /// - `desktop_id`: `"wifistat"`
    fn default() -> Self {
        Self {
            read_timeout: timeouts::read_timeout(),
            location_timeout: timeouts::location_timeout(),
            location_accuracy: LocationAccuracy::High,
            location_enabled: true,
            permissions_required: true,
            poll_interval: timeouts::poll_interval(),
            desktop_id: "wifistat".to_string(),
        }
    }
}

impl FetchConfig {
    /// Creates a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }

    pub fn with_location_accuracy(mut self, accuracy: LocationAccuracy) -> Self {
        self.location_accuracy = accuracy;
        self
    }

    pub fn with_location_enabled(mut self, enabled: bool) -> Self {
        self.location_enabled = enabled;
        self
    }

    pub fn with_permissions_required(mut self, required: bool) -> Self {
        self.permissions_required = required;
        self
    }

    /// Sets the polling interval, clamped to between one second and one day.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = timeouts::clamp_poll_interval(interval);
        self
    }

    pub fn with_desktop_id(mut self, desktop_id: impl Into<String>) -> Self {
        self.desktop_id = desktop_id.into();
        self
    }
}
