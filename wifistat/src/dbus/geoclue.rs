//! GeoClue2 proxies.
//!
//! A position fix goes through three objects:
//!
//! - `/org/freedesktop/GeoClue2/Manager` hands out a client object
//! - the client is configured, started, and emits `LocationUpdated`
//! - the location object named by that signal carries the coordinates

use zbus::{Result, proxy};
use zvariant::OwnedObjectPath;

/// Proxy for the GeoClue2 manager.
#[proxy(
    interface = "org.freedesktop.GeoClue2.Manager",
    default_service = "org.freedesktop.GeoClue2",
    default_path = "/org/freedesktop/GeoClue2/Manager"
)]
pub trait GeoClueManager {
    /// Creates a client object for the caller.
    fn get_client(&self) -> Result<OwnedObjectPath>;

    /// Releases a client object created by `get_client`.
    fn delete_client(&self, client: &OwnedObjectPath) -> Result<()>;

    /// Highest accuracy level available to applications (0 = location disabled).
    #[zbus(property)]
    fn available_accuracy_level(&self) -> Result<u32>;
}

/// Proxy for a GeoClue2 client.
#[proxy(
    interface = "org.freedesktop.GeoClue2.Client",
    default_service = "org.freedesktop.GeoClue2"
)]
pub trait GeoClueClient {
    /// Starts receiving location updates.
    fn start(&self) -> Result<()>;

    /// Stops receiving location updates.
    fn stop(&self) -> Result<()>;

    /// Path to the current location object ("/" until a fix is available).
    #[zbus(property)]
    fn location(&self) -> Result<OwnedObjectPath>;

    /// Desktop ID the caller identifies as; required before `start`.
    #[zbus(property)]
    fn set_desktop_id(&self, id: &str) -> Result<()>;

    /// Accuracy level the caller asks for (`GClueAccuracyLevel`).
    #[zbus(property)]
    fn set_requested_accuracy_level(&self, level: u32) -> Result<()>;

    /// Signal emitted when a new location is available.
    #[zbus(signal)]
    fn location_updated(&self, old_location: OwnedObjectPath, new_location: OwnedObjectPath);
}

/// Proxy for a GeoClue2 location object.
#[proxy(
    interface = "org.freedesktop.GeoClue2.Location",
    default_service = "org.freedesktop.GeoClue2"
)]
pub trait GeoClueLocation {
    /// Latitude in degrees.
    #[zbus(property)]
    fn latitude(&self) -> Result<f64>;

    /// Longitude in degrees.
    #[zbus(property)]
    fn longitude(&self) -> Result<f64>;

    /// Accuracy radius in meters.
    #[zbus(property)]
    fn accuracy(&self) -> Result<f64>;
}
