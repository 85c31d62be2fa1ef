//! Text and JSON output.

use serde::Serialize;
use std::fmt::Write;
use wifistat::{ConnectivitySnapshot, Gauge, NetworkCard, SignalQuality};

const LABEL_WIDTH: usize = 16;

/// Renders a card as indented plain text.
pub fn card_text(card: &NetworkCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.title);

    if let Some(gauge) = &card.gauge {
        let _ = writeln!(
            out,
            "  {:<LABEL_WIDTH$} {} ({}%, {} dBm)",
            "Signal",
            gauge.quality.tier,
            gauge.quality.percentage,
            gauge.dbm
        );
    }

    for row in &card.rows {
        let _ = writeln!(out, "  {:<LABEL_WIDTH$} {}", row.label, row.value);
    }
    out
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    snapshot: &'a ConnectivitySnapshot,
    signal_quality: Option<SignalQuality>,
}

/// Renders a snapshot as a single JSON object.
///
/// The snapshot fields are emitted as-is, with the classified
/// `signal_quality` alongside. It is `null` when there is no reading.
pub fn snapshot_json(snapshot: &ConnectivitySnapshot) -> serde_json::Result<String> {
    serde_json::to_string(&Report {
        snapshot,
        signal_quality: Gauge::from_dbm(snapshot.signal_strength_dbm).map(|g| g.quality),
    })
}

/// Renders a fetch failure as a JSON object with an `error` key.
pub fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wifistat::{ConnectionType, Location};

    fn snapshot() -> ConnectivitySnapshot {
        ConnectivitySnapshot {
            is_connected: true,
            connection_type: ConnectionType::Wifi,
            is_internet_reachable: Some(false),
            signal_strength_dbm: Some(-45),
            ssid: Some("Cafe".into()),
            ip_address: None,
            location: Some(Location {
                latitude: 48.8566,
                longitude: 2.3522,
            }),
        }
    }

    #[test]
    fn text_lists_gauge_then_rows() {
        let text = card_text(&NetworkCard::from_snapshot(&snapshot()));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Cafe");
        assert_eq!(lines[1], format!("  {:<16} Excellent (92%, -45 dBm)", "Signal"));
        assert!(text.contains("Internet         Unavailable"));
        assert!(text.contains("IP Address       Unknown"));
        assert!(text.contains("Latitude         48.856600"));
    }

    #[test]
    fn unavailable_card_is_title_only() {
        let text = card_text(&NetworkCard::unavailable());
        assert_eq!(text, "Unable to get network information\n");
    }

    #[test]
    fn json_flattens_snapshot() {
        let json = snapshot_json(&snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["connection_type"], "wifi");
        assert_eq!(value["ssid"], "Cafe");
        assert_eq!(value["signal_strength_dbm"], -45);
        assert_eq!(value["ip_address"], serde_json::Value::Null);
        assert_eq!(value["location"]["latitude"], 48.8566);
        assert_eq!(value["signal_quality"]["tier"], "Excellent");
        assert_eq!(value["signal_quality"]["percentage"], 92);
    }

    #[test]
    fn error_json_has_message() {
        let value: serde_json::Value =
            serde_json::from_str(&error_json("unable to get network information")).unwrap();
        assert_eq!(value["error"], "unable to get network information");
    }
}
