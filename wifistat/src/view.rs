//! Card view model for a status snapshot.
//!
//! Shapes a [`ConnectivitySnapshot`] into what a status screen shows: a
//! header with the network name, an optional signal gauge and a list of
//! labeled rows. Colors and icons are opaque keys; layout is left to the
//! presentation layer.

use crate::api::models::{ConnectivitySnapshot, SignalQuality};
use crate::core::signal::classify;
use crate::types::constants::{color, sentinel};

/// One labeled value row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub icon_key: &'static str,
    pub label: &'static str,
    pub value: String,
    /// Color of the value; `None` means the default text color.
    pub color_key: Option<&'static str>,
}

impl InfoRow {
    fn plain(icon_key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            icon_key,
            label,
            value: value.into(),
            color_key: None,
        }
    }

    fn colored(
        icon_key: &'static str,
        label: &'static str,
        value: impl Into<String>,
        color_key: &'static str,
    ) -> Self {
        Self {
            icon_key,
            label,
            value: value.into(),
            color_key: Some(color_key),
        }
    }
}

/// Signal gauge contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gauge {
    pub dbm: i32,
    pub quality: SignalQuality,
}

impl Gauge {
    /// Builds a gauge, or `None` when there is no reading.
    ///
    /// 0 dBm is the value the details reader reports alongside a sentinel
    /// SSID, so it is treated as "no reading" too.
    pub fn from_dbm(dbm: Option<i32>) -> Option<Self> {
        match dbm {
            Some(dbm) if dbm != sentinel::NO_SIGNAL_DBM => Some(Self {
                dbm,
                quality: classify(dbm),
            }),
            _ => None,
        }
    }
}

/// Everything a status screen displays for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkCard {
    pub icon_key: &'static str,
    pub color_key: &'static str,
    pub title: String,
    pub gauge: Option<Gauge>,
    pub rows: Vec<InfoRow>,
}

fn status_color(ok: bool) -> &'static str {
    if ok { color::GREEN } else { color::RED }
}

impl NetworkCard {
    /// Builds the card for a snapshot.
    pub fn from_snapshot(snapshot: &ConnectivitySnapshot) -> Self {
        let connected = snapshot.is_connected;
        let reachable = snapshot.is_internet_reachable == Some(true);

        let title = snapshot
            .ssid
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| sentinel::NETWORK_UNKNOWN.to_string());

        let mut rows = vec![
            InfoRow::plain("wifi-strength-4", "Type", snapshot.connection_type.to_string()),
            InfoRow::plain(
                "signal",
                "Signal Strength",
                format!("{} dBm", snapshot.signal_strength_dbm.unwrap_or(0)),
            ),
            InfoRow::colored(
                "connection",
                "Status",
                if connected { "Connected" } else { "Disconnected" },
                status_color(connected),
            ),
            InfoRow::colored(
                "web",
                "Internet",
                if reachable { "Available" } else { "Unavailable" },
                status_color(reachable),
            ),
            InfoRow::plain(
                "ip-network",
                "IP Address",
                snapshot
                    .ip_address
                    .clone()
                    .unwrap_or_else(|| sentinel::VALUE_UNKNOWN.to_string()),
            ),
        ];

        if let Some(location) = snapshot.location {
            rows.push(InfoRow::plain(
                "map-marker",
                "Latitude",
                format!("{:.6}", location.latitude),
            ));
            rows.push(InfoRow::plain(
                "map-marker",
                "Longitude",
                format!("{:.6}", location.longitude),
            ));
        }

        Self {
            icon_key: if connected { "wifi" } else { "wifi-off" },
            color_key: status_color(connected),
            title,
            gauge: Gauge::from_dbm(snapshot.signal_strength_dbm),
            rows,
        }
    }

    /// The card shown when no snapshot could be produced.
    pub fn unavailable() -> Self {
        Self {
            icon_key: "wifi-alert",
            color_key: color::RED,
            title: "Unable to get network information".to_string(),
            gauge: None,
            rows: Vec::new(),
        }
    }
}
