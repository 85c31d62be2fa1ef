//! Constants for D-Bus interface values, signal thresholds and sentinels.
//!
//! The NetworkManager and GeoClue2 constants correspond to the numeric codes
//! and names used by their D-Bus APIs.

/// NetworkManager device type constants.
pub mod device_type {
    pub const WIFI: u32 = 2;
}

/// NetworkManager global state constants (`NMState`).
pub mod nm_state {
    /// Lowest state in which a connection is up, even if only locally.
    pub const CONNECTED_LOCAL: u32 = 50;
}

/// NetworkManager connectivity constants (`NMConnectivityState`).
pub mod connectivity {
    pub const UNKNOWN: u32 = 0;
    pub const NONE: u32 = 1;
    pub const PORTAL: u32 = 2;
    pub const LIMITED: u32 = 3;
    pub const FULL: u32 = 4;
}

/// NetworkManager connection setting type names, as reported by
/// `PrimaryConnectionType`.
pub mod connection_type {
    pub const WIRELESS: &str = "802-11-wireless";
    pub const ETHERNET: &str = "802-3-ethernet";
    pub const GSM: &str = "gsm";
    pub const CDMA: &str = "cdma";
    pub const BLUETOOTH: &str = "bluetooth";
    pub const VPN: &str = "vpn";
    pub const WIREGUARD: &str = "wireguard";
}

/// NetworkManager permission names and results from `GetPermissions()`.
pub mod nm_permission {
    pub const WIFI_SCAN: &str = "org.freedesktop.NetworkManager.wifi.scan";
    pub const GRANTED: &str = "yes";
    /// Refused outright; `"auth"` means the caller could still authenticate.
    pub const REFUSED: &str = "no";
}

/// GeoClue2 accuracy levels (`GClueAccuracyLevel`).
pub mod geoclue_accuracy {
    pub const NONE: u32 = 0;
    pub const CITY: u32 = 4;
    pub const STREET: u32 = 6;
    pub const EXACT: u32 = 8;
}

/// Signal classification constants (dBm).
///
/// The percentage curve is linear between `FLOOR_DBM` and `CEILING_DBM`.
pub mod signal {
    pub const FLOOR_DBM: i32 = -100;
    pub const CEILING_DBM: i32 = -40;
    pub const EXCELLENT_MIN: i32 = -50;
    pub const GOOD_MIN: i32 = -60;
    pub const FAIR_MIN: i32 = -70;
    /// Top of the 0-100 quality scale reported by NetworkManager.
    pub const QUALITY_MAX: u8 = 100;
}

/// Placeholder values substituted when real data is unobtainable.
pub mod sentinel {
    pub const SSID_UNKNOWN: &str = "Unknown";
    pub const SSID_PERMISSION_DENIED: &str = "Permission Denied";
    pub const NETWORK_UNKNOWN: &str = "Unknown Network";
    pub const VALUE_UNKNOWN: &str = "Unknown";
    /// Signal value reported alongside a sentinel SSID; means "no reading".
    pub const NO_SIGNAL_DBM: i32 = 0;
}

/// Color keys shared by the classifier and the card view model.
pub mod color {
    pub const GREEN: &str = "#4CAF50";
    pub const LIGHT_GREEN: &str = "#8BC34A";
    pub const AMBER: &str = "#FFC107";
    pub const RED: &str = "#F44336";
}

/// Timeout and interval defaults.
pub mod timeouts {
    use std::time::Duration;

    /// Deadline for a single platform read (5 seconds).
    const READ_TIMEOUT_SECS: u64 = 5;

    /// Deadline for a position fix, which can take a while to settle (10 seconds).
    const LOCATION_TIMEOUT_SECS: u64 = 10;

    /// Interval between periodic re-fetches (5 seconds).
    const POLL_INTERVAL_SECS: u64 = 5;

    /// Shortest accepted polling interval.
    const MIN_POLL_INTERVAL_SECS: u64 = 1;

    /// Longest accepted polling interval or deadline (one day).
    const MAX_WAIT_SECS: u64 = 86_400;

    /// Extra time a position read gets to release its provider session
    /// after its own deadline.
    const RELEASE_GRACE_SECS: u64 = 2;

    /// Returns the default platform read deadline.
    pub fn read_timeout() -> Duration {
        Duration::from_secs(READ_TIMEOUT_SECS)
    }

    /// Returns the default position fix deadline.
    pub fn location_timeout() -> Duration {
        Duration::from_secs(LOCATION_TIMEOUT_SECS)
    }

    /// Returns the default polling interval.
    pub fn poll_interval() -> Duration {
        Duration::from_secs(POLL_INTERVAL_SECS)
    }

    /// Returns the grace period for releasing a position session.
    pub fn release_grace() -> Duration {
        Duration::from_secs(RELEASE_GRACE_SECS)
    }

    /// Returns the longest accepted wait.
    pub fn max_wait() -> Duration {
        Duration::from_secs(MAX_WAIT_SECS)
    }

    /// Clamps a polling interval to between one second and one day.
    pub fn clamp_poll_interval(interval: Duration) -> Duration {
        interval.clamp(Duration::from_secs(MIN_POLL_INTERVAL_SECS), max_wait())
    }
}
