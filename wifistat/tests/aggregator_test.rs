//! Tests for the permission gate, the sub-readers and snapshot aggregation.
//!
//! Every platform read is served by `MockPlatform`, so these run without a
//! D-Bus connection.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{LATITUDE, LONGITUDE, MockPlatform};
use wifistat::platform::{ConnectivityState, NetworkDetails, NetworkDetailsReader};
use wifistat::{
    Aggregator, ConnectionType, ConnectivitySnapshot, FetchConfig, Location, LocationAccuracy,
    LocationReader, PermissionGate, PermissionStatus, StatusError, WifiDetails,
    WifiDetailsReader,
};

fn wifi_reader(platform: &Arc<MockPlatform>) -> WifiDetailsReader {
    let gate = PermissionGate::new(platform.clone());
    let details: Arc<dyn NetworkDetailsReader> = platform.clone();
    WifiDetailsReader::new(gate, details)
}

fn expected_healthy_snapshot() -> ConnectivitySnapshot {
    ConnectivitySnapshot {
        is_connected: true,
        connection_type: ConnectionType::Wifi,
        is_internet_reachable: Some(true),
        signal_strength_dbm: Some(-55),
        ssid: Some("HomeNet".into()),
        ip_address: Some("192.168.1.42".into()),
        location: Some(Location {
            latitude: LATITUDE,
            longitude: LONGITUDE,
        }),
    }
}

#[tokio::test]
async fn gate_grants_when_both_permissions_granted() {
    let platform = Arc::new(MockPlatform::healthy());
    let gate = PermissionGate::new(platform.clone());

    assert!(gate.request_permissions().await);
    assert_eq!(MockPlatform::calls(&platform.permission_calls), 2);
}

#[tokio::test]
async fn gate_denies_when_either_permission_denied() {
    let platform = Arc::new(MockPlatform {
        location_permission: Some(PermissionStatus::Denied),
        ..MockPlatform::healthy()
    });
    assert!(!PermissionGate::new(platform).request_permissions().await);

    let platform = Arc::new(MockPlatform {
        wifi_permission: Some(PermissionStatus::Denied),
        ..MockPlatform::healthy()
    });
    assert!(!PermissionGate::new(platform).request_permissions().await);
}

#[tokio::test]
async fn gate_treats_request_errors_as_denial() {
    let platform = Arc::new(MockPlatform {
        wifi_permission: None,
        ..MockPlatform::healthy()
    });

    assert!(!PermissionGate::new(platform).request_permissions().await);
}

#[tokio::test]
async fn gate_not_required_always_grants() {
    let gate = PermissionGate::not_required();

    assert!(!gate.is_required());
    assert!(gate.request_permissions().await);
}

#[tokio::test]
async fn wifi_info_permission_denied_skips_read() {
    let platform = Arc::new(MockPlatform {
        location_permission: Some(PermissionStatus::Denied),
        ..MockPlatform::healthy()
    });

    let details = wifi_reader(&platform).get_wifi_info().await;

    assert_eq!(
        details,
        WifiDetails {
            ssid: "Permission Denied".into(),
            signal_strength_dbm: 0,
        }
    );
    assert_eq!(MockPlatform::calls(&platform.details_calls), 0);
}

#[tokio::test]
async fn wifi_info_read_failure_returns_unknown() {
    let platform = Arc::new(MockPlatform {
        details: None,
        ..MockPlatform::healthy()
    });

    let details = wifi_reader(&platform).get_wifi_info().await;

    assert_eq!(
        details,
        WifiDetails {
            ssid: "Unknown".into(),
            signal_strength_dbm: 0,
        }
    );
    assert_eq!(MockPlatform::calls(&platform.details_calls), 1);
}

#[tokio::test]
async fn wifi_info_hung_read_is_cut_off() {
    let platform = Arc::new(MockPlatform {
        hang_details: true,
        ..MockPlatform::healthy()
    });

    let reader = wifi_reader(&platform).with_timeout(Duration::from_millis(50));
    let details = reader.get_wifi_info().await;

    assert_eq!(details, WifiDetails::unknown());
}

#[tokio::test]
async fn wifi_info_converts_quality_to_dbm() {
    let platform = Arc::new(MockPlatform::healthy());

    let details = wifi_reader(&platform).get_wifi_info().await;

    assert_eq!(details.ssid, "HomeNet");
    assert_eq!(details.signal_strength_dbm, -55);
}

#[tokio::test]
async fn wifi_info_without_active_access_point() {
    let platform = Arc::new(MockPlatform {
        details: Some(NetworkDetails::default()),
        ..MockPlatform::healthy()
    });

    let details = wifi_reader(&platform).get_wifi_info().await;

    assert_eq!(details.ssid, "Unknown");
    assert_eq!(details.signal_strength_dbm, -100);
}

#[tokio::test]
async fn location_reader_swallows_failures() {
    let platform = Arc::new(MockPlatform {
        position: None,
        ..MockPlatform::healthy()
    });

    let reader = LocationReader::new(platform.clone(), LocationAccuracy::High);

    assert_eq!(reader.get_location().await, None);
    assert_eq!(MockPlatform::calls(&platform.position_calls), 1);
}

#[tokio::test]
async fn location_reader_hands_its_deadline_to_the_provider() {
    let platform = Arc::new(MockPlatform::healthy());

    let reader = LocationReader::new(platform.clone(), LocationAccuracy::Balanced)
        .with_timeout(Duration::from_secs(3));

    assert!(reader.get_location().await.is_some());
    assert_eq!(
        *platform.position_timeout.lock().unwrap(),
        Some(Duration::from_secs(3))
    );
}

#[tokio::test]
async fn fetch_snapshot_merges_all_reads() {
    let platform = Arc::new(MockPlatform::healthy());
    let aggregator = Aggregator::from_platform(platform.clone(), &FetchConfig::default());

    let snapshot = aggregator.fetch_snapshot().await.expect("snapshot");

    assert_eq!(snapshot, expected_healthy_snapshot());
    assert_eq!(MockPlatform::calls(&platform.connectivity_calls), 1);
    assert_eq!(MockPlatform::calls(&platform.ip_calls), 1);
    assert_eq!(MockPlatform::calls(&platform.details_calls), 1);
    assert_eq!(MockPlatform::calls(&platform.position_calls), 1);
}

#[tokio::test]
async fn fetch_snapshot_without_location() {
    let platform = Arc::new(MockPlatform {
        position: None,
        ..MockPlatform::healthy()
    });
    let aggregator = Aggregator::from_platform(platform, &FetchConfig::default());

    let snapshot = aggregator.fetch_snapshot().await.expect("snapshot");

    assert_eq!(
        snapshot,
        ConnectivitySnapshot {
            location: None,
            ..expected_healthy_snapshot()
        }
    );
}

#[tokio::test]
async fn fetch_snapshot_with_location_disabled() {
    let platform = Arc::new(MockPlatform::healthy());
    let config = FetchConfig::new().with_location_enabled(false);
    let aggregator = Aggregator::from_platform(platform.clone(), &config);

    let snapshot = aggregator.fetch_snapshot().await.expect("snapshot");

    assert_eq!(snapshot.location, None);
    assert_eq!(MockPlatform::calls(&platform.position_calls), 0);
}

#[tokio::test]
async fn fetch_snapshot_with_permissions_not_required() {
    let platform = Arc::new(MockPlatform {
        location_permission: Some(PermissionStatus::Denied),
        wifi_permission: Some(PermissionStatus::Denied),
        ..MockPlatform::healthy()
    });
    let config = FetchConfig::new().with_permissions_required(false);
    let aggregator = Aggregator::from_platform(platform.clone(), &config);

    let snapshot = aggregator.fetch_snapshot().await.expect("snapshot");

    assert_eq!(snapshot.ssid.as_deref(), Some("HomeNet"));
    assert_eq!(MockPlatform::calls(&platform.permission_calls), 0);
}

#[tokio::test]
async fn fetch_snapshot_with_permission_denied() {
    let platform = Arc::new(MockPlatform {
        wifi_permission: Some(PermissionStatus::Denied),
        ..MockPlatform::healthy()
    });
    let aggregator = Aggregator::from_platform(platform, &FetchConfig::default());

    let snapshot = aggregator.fetch_snapshot().await.expect("snapshot");

    assert_eq!(snapshot.ssid.as_deref(), Some("Permission Denied"));
    assert_eq!(snapshot.signal_strength_dbm, Some(0));
    assert!(snapshot.is_connected);
    assert_eq!(snapshot.ip_address.as_deref(), Some("192.168.1.42"));
}

#[tokio::test]
async fn fetch_snapshot_defaults_omitted_state() {
    let platform = Arc::new(MockPlatform {
        connectivity: Some(ConnectivityState::default()),
        ..MockPlatform::healthy()
    });
    let aggregator = Aggregator::from_platform(platform, &FetchConfig::default());

    let snapshot = aggregator.fetch_snapshot().await.expect("snapshot");

    assert!(!snapshot.is_connected);
    assert_eq!(snapshot.connection_type, ConnectionType::Unknown);
    assert_eq!(snapshot.is_internet_reachable, None);
}

#[tokio::test]
async fn fetch_snapshot_ip_failure_leaves_address_empty() {
    let platform = Arc::new(MockPlatform {
        ip: None,
        ..MockPlatform::healthy()
    });
    let aggregator = Aggregator::from_platform(platform, &FetchConfig::default());

    let snapshot = aggregator.fetch_snapshot().await.expect("snapshot");

    assert_eq!(snapshot.ip_address, None);
    assert_eq!(snapshot.ssid.as_deref(), Some("HomeNet"));
}

#[tokio::test]
async fn fetch_snapshot_connectivity_failure_is_surfaced() {
    let platform = Arc::new(MockPlatform {
        connectivity: None,
        ..MockPlatform::healthy()
    });
    let aggregator = Aggregator::from_platform(platform.clone(), &FetchConfig::default());

    let err = aggregator.fetch_snapshot().await.unwrap_err();

    assert!(matches!(err, StatusError::NetworkUnavailable(_)));
    // The other reads still ran to completion
    assert_eq!(MockPlatform::calls(&platform.details_calls), 1);
    assert_eq!(MockPlatform::calls(&platform.position_calls), 1);
}

#[tokio::test]
async fn concurrent_fetches_are_independent_and_equal() {
    let platform = Arc::new(MockPlatform::healthy());
    let aggregator = Aggregator::from_platform(platform.clone(), &FetchConfig::default());

    let (first, second) = tokio::join!(aggregator.fetch_snapshot(), aggregator.fetch_snapshot());

    let first = first.expect("first snapshot");
    let second = second.expect("second snapshot");
    assert_eq!(first, second);
    assert_eq!(first, expected_healthy_snapshot());
    assert_eq!(MockPlatform::calls(&platform.connectivity_calls), 2);
}
