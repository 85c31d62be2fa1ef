use std::sync::Arc;

use crate::Result;
use crate::api::models::{ConnectivitySnapshot, FetchConfig, Location, WifiDetails};
use crate::core::aggregator::Aggregator;
use crate::monitoring::poller::Poller;
use crate::platform::LinuxPlatform;

/// High-level interface to the Wi-Fi status of a Linux host.
///
/// This is the main entry point of the crate. It connects to the system
/// D-Bus and wires NetworkManager and GeoClue2 into an [`Aggregator`].
///
/// # Creating an Instance
///
/// ```no_run
/// use wifistat::WifiStatus;
///
/// # async fn example() -> wifistat::Result<()> {
/// let status = WifiStatus::new().await?;
/// # Ok(())
/// # }
/// ```
///
/// # Examples
///
/// ## One-off snapshot
///
/// ```no_run
/// use wifistat::{NetworkCard, WifiStatus};
///
/// # async fn example() -> wifistat::Result<()> {
/// let status = WifiStatus::new().await?;
/// let snapshot = status.fetch_snapshot().await?;
///
/// let card = NetworkCard::from_snapshot(&snapshot);
/// println!("{}", card.title);
/// for row in &card.rows {
///     println!("{}: {}", row.label, row.value);
/// }
/// # Ok(())
/// # }
/// ```
///
/// ## Custom configuration
///
/// ```no_run
/// use std::time::Duration;
/// use wifistat::{FetchConfig, WifiStatus};
///
/// # async fn example() -> wifistat::Result<()> {
/// let config = FetchConfig::new()
///     .with_location_enabled(false)
///     .with_poll_interval(Duration::from_secs(2));
///
/// let status = WifiStatus::with_config(config).await?;
/// let poller = status.watch();
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// `WifiStatus` is `Clone` and can be safely shared across async tasks.
/// Each clone shares the same underlying D-Bus connection.
#[derive(Debug, Clone)]
pub struct WifiStatus {
    platform: Arc<LinuxPlatform>,
    aggregator: Aggregator,
    config: FetchConfig,
}

impl WifiStatus {
    /// Creates a new `WifiStatus` connected to the system D-Bus.
    ///
    /// Uses the default configuration.
    pub async fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default()).await
    }

    /// Creates a new `WifiStatus` with a custom configuration.
    pub async fn with_config(config: FetchConfig) -> Result<Self> {
        let platform = Arc::new(LinuxPlatform::new(config.desktop_id.clone()).await?);
        let aggregator = Aggregator::from_platform(platform.clone(), &config);
        Ok(Self {
            platform,
            aggregator,
            config,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Returns the underlying aggregator.
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Returns the platform backend.
    pub fn platform(&self) -> &LinuxPlatform {
        &self.platform
    }

    /// Fetches a fresh snapshot of the connection status.
    pub async fn fetch_snapshot(&self) -> Result<ConnectivitySnapshot> {
        self.aggregator.fetch_snapshot().await
    }

    /// Requests the runtime permissions needed to read Wi-Fi details.
    pub async fn request_permissions(&self) -> bool {
        self.aggregator.wifi_details().gate().request_permissions().await
    }

    /// Reads only the SSID and signal strength.
    pub async fn wifi_info(&self) -> WifiDetails {
        self.aggregator.wifi_details().get_wifi_info().await
    }

    /// Reads only the current position.
    pub async fn location(&self) -> Option<Location> {
        self.aggregator.location().get_location().await
    }

    /// Starts polling at the configured interval.
    ///
    /// Must be called inside a tokio runtime.
    pub fn watch(&self) -> Poller {
        Poller::start(self.aggregator.clone(), self.config.poll_interval)
    }
}
