//! A Rust library for reporting the current Wi-Fi connection status.
//!
//! This crate fans out a handful of independent platform reads and merges
//! them into one immutable [`ConnectivitySnapshot`]:
//!
//! - Connectivity state (connected, connection type, internet reachability)
//! - Wi-Fi details (SSID and signal strength), gated on runtime permissions
//! - The device IP address
//! - Optionally, the current geolocation
//!
//! On Linux the reads are served by NetworkManager and GeoClue2 over the
//! system D-Bus.
//!
//! # Example
//!
//! ```no_run
//! use wifistat::{WifiStatus, classify};
//!
//! # async fn example() -> wifistat::Result<()> {
//! let status = WifiStatus::new().await?;
//!
//! let snapshot = status.fetch_snapshot().await?;
//! println!("SSID: {}", snapshot.ssid.as_deref().unwrap_or("Unknown"));
//!
//! if let Some(dbm) = snapshot.signal_strength_dbm {
//!     let quality = classify(dbm);
//!     println!("{dbm} dBm ({}, {}%)", quality.tier, quality.percentage);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Every sub-read recovers locally and substitutes a documented default or
//! sentinel, so a missing SSID or a denied location permission never fails
//! a fetch. The one exception is the connectivity-state read: when it fails,
//! [`Aggregator::fetch_snapshot`] returns [`StatusError::NetworkUnavailable`].
//!
//! # Polling
//!
//! [`Poller`] re-fetches on a fixed interval and publishes each snapshot
//! through a `tokio::sync::watch` channel. At most one fetch is in flight at a
//! time; triggers that arrive while one is running are dropped.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging. To see
//! log output, add a logging implementation like `env_logger`. For example:

//! ```no_run,ignore
//! env_logger::init();
//! // ...
//! ```

// Internal implementation modules
mod dbus;
mod types;
mod util;

// Public API modules
pub mod api;
pub mod core;
pub mod monitoring;
pub mod platform;
pub mod view;

// Re-exported public API
pub use api::models::{
    ConnectionType, ConnectivitySnapshot, FetchConfig, Location, LocationAccuracy,
    PermissionKind, PermissionStatus, SignalQuality, SignalTier, StatusError, WifiDetails,
};
pub use api::wifi_status::WifiStatus;
pub use crate::core::aggregator::Aggregator;
pub use crate::core::location::LocationReader;
pub use crate::core::permission::PermissionGate;
pub use crate::core::signal::{classify, quality_to_dbm};
pub use crate::core::wifi_details::WifiDetailsReader;
pub use monitoring::poller::{PollUpdate, Poller};
pub use view::{Gauge, InfoRow, NetworkCard};

/// A specialized `Result` type for status operations.
pub type Result<T> = std::result::Result<T, StatusError>;
