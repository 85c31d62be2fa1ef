//! Mock platform shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

use wifistat::platform::{
    ConnectivityReader, ConnectivityState, IpAddressReader, NetworkDetails, NetworkDetailsReader,
    PermissionRequester, PositionReader, StrengthReading,
};
use wifistat::{
    ConnectionType, Location, LocationAccuracy, PermissionKind, PermissionStatus, StatusError,
};

/// A platform whose every read returns a canned value.
///
/// `None` in a result field makes the corresponding read fail.
#[derive(Default)]
pub struct MockPlatform {
    pub connectivity: Option<ConnectivityState>,
    pub details: Option<NetworkDetails>,
    pub ip: Option<Option<String>>,
    pub position: Option<Location>,
    pub location_permission: Option<PermissionStatus>,
    pub wifi_permission: Option<PermissionStatus>,
    /// When set, each connectivity read waits for a permit first.
    pub connectivity_gate: Option<Arc<Semaphore>>,
    /// When set, the details read never completes.
    pub hang_details: bool,

    pub connectivity_calls: AtomicUsize,
    pub details_calls: AtomicUsize,
    pub ip_calls: AtomicUsize,
    pub position_calls: AtomicUsize,
    pub permission_calls: AtomicUsize,
    /// Deadline passed to the most recent position read.
    pub position_timeout: Mutex<Option<Duration>>,
}

pub const LATITUDE: f64 = 60.169857;
pub const LONGITUDE: f64 = 24.938379;

impl MockPlatform {
    /// Every read succeeds and every permission is granted.
    pub fn healthy() -> Self {
        Self {
            connectivity: Some(ConnectivityState {
                connected: Some(true),
                connection_type: Some(ConnectionType::Wifi),
                internet_reachable: Some(true),
            }),
            details: Some(NetworkDetails {
                ssid: Some("HomeNet".into()),
                strength: Some(StrengthReading::Quality(45)),
            }),
            ip: Some(Some("192.168.1.42".into())),
            position: Some(Location {
                latitude: LATITUDE,
                longitude: LONGITUDE,
            }),
            location_permission: Some(PermissionStatus::Granted),
            wifi_permission: Some(PermissionStatus::Granted),
            ..Self::default()
        }
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityReader for MockPlatform {
    async fn read_connectivity(&self) -> wifistat::Result<ConnectivityState> {
        self.connectivity_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.connectivity_gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        self.connectivity
            .clone()
            .ok_or(StatusError::Timeout("mock connectivity read"))
    }
}

#[async_trait]
impl NetworkDetailsReader for MockPlatform {
    async fn read_network_details(&self) -> wifistat::Result<NetworkDetails> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_details {
            futures::future::pending::<()>().await;
        }
        self.details.clone().ok_or(StatusError::NoWifiDevice)
    }
}

#[async_trait]
impl IpAddressReader for MockPlatform {
    async fn read_ip_address(&self) -> wifistat::Result<Option<String>> {
        self.ip_calls.fetch_add(1, Ordering::SeqCst);
        self.ip
            .clone()
            .ok_or(StatusError::Timeout("mock IP address read"))
    }
}

#[async_trait]
impl PositionReader for MockPlatform {
    async fn read_current_position(
        &self,
        _accuracy: LocationAccuracy,
        timeout: Duration,
    ) -> wifistat::Result<Location> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        *self.position_timeout.lock().unwrap() = Some(timeout);
        self.position
            .ok_or_else(|| StatusError::LocationUnavailable("provider disabled".into()))
    }
}

#[async_trait]
impl PermissionRequester for MockPlatform {
    async fn request_permission(
        &self,
        kind: PermissionKind,
    ) -> wifistat::Result<PermissionStatus> {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);
        let status = match kind {
            PermissionKind::Location => self.location_permission,
            PermissionKind::WifiInfo => self.wifi_permission,
        };
        status.ok_or(StatusError::PermissionDenied(kind))
    }
}
