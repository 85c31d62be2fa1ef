//! GeoClue2-backed position reads.

use futures::StreamExt;
use log::{debug, warn};
use std::future::Future;
use std::time::Duration;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{Location, LocationAccuracy, PermissionStatus, StatusError};
use crate::dbus::{GeoClueClientProxy, GeoClueLocationProxy, GeoClueManagerProxy};
use crate::types::constants::geoclue_accuracy;
use crate::util::utils::{is_null_path, with_deadline};

/// Maps a requested accuracy to a `GClueAccuracyLevel`.
pub(crate) fn accuracy_level(accuracy: LocationAccuracy) -> u32 {
    match accuracy {
        LocationAccuracy::Low => geoclue_accuracy::CITY,
        LocationAccuracy::Balanced => geoclue_accuracy::STREET,
        LocationAccuracy::High => geoclue_accuracy::EXACT,
    }
}

/// Checks whether location services are available to applications.
///
/// GeoClue2 reports an available accuracy of `NONE` when location is
/// disabled system-wide.
pub(crate) async fn location_permission(conn: &Connection) -> Result<PermissionStatus> {
    let manager = GeoClueManagerProxy::new(conn).await?;
    let level = manager.available_accuracy_level().await?;
    debug!("GeoClue2 available accuracy level: {level}");
    Ok(PermissionStatus::from(level != geoclue_accuracy::NONE))
}

/// Reads the coordinates of a GeoClue2 location object.
async fn read_location(conn: &Connection, path: OwnedObjectPath) -> Result<Location> {
    let location = GeoClueLocationProxy::builder(conn)
        .path(path)?
        .build()
        .await?;

    let latitude = location.latitude().await?;
    let longitude = location.longitude().await?;
    if let Ok(radius) = location.accuracy().await {
        debug!("Position fix accurate to {radius:.0} m");
    }

    Ok(Location {
        latitude,
        longitude,
    })
}

/// Waits for the client's first fix and reads it.
async fn first_fix(conn: &Connection, client: &GeoClueClientProxy<'_>) -> Result<Location> {
    // Subscribe before starting so the first update cannot be missed
    let mut updates = client.receive_location_updated().await?;
    client.start().await?;

    // A fix may already be cached from another client
    let current = client.location().await?;
    if !is_null_path(&current) {
        return read_location(conn, current).await;
    }

    match updates.next().await {
        Some(signal) => {
            let args = signal.args()?;
            read_location(conn, args.new_location.clone()).await
        }
        None => Err(StatusError::LocationUnavailable(
            "location update stream ended".into(),
        )),
    }
}

/// Runs `session` under `limit`, then always runs `release`.
///
/// `release` runs whether the session produced a fix, failed, or hit the
/// deadline.
async fn bounded_session<T, S, R>(session: S, limit: Duration, release: R) -> Result<T>
where
    S: Future<Output = Result<T>>,
    R: Future<Output = ()>,
{
    let out = with_deadline(session, limit, "GeoClue2 position fix").await;
    release.await;
    out
}

/// Configures a client and waits for its first fix.
async fn locate(
    conn: &Connection,
    client: &GeoClueClientProxy<'_>,
    desktop_id: &str,
    accuracy: LocationAccuracy,
) -> Result<Location> {
    client.set_desktop_id(desktop_id).await?;
    client
        .set_requested_accuracy_level(accuracy_level(accuracy))
        .await?;
    first_fix(conn, client).await
}

/// Requests the current position from GeoClue2.
///
/// Creates a client, identifies as `desktop_id` and waits up to `timeout`
/// for the first fix. The client is stopped and deleted on every path out,
/// including setup errors and the deadline.
pub(crate) async fn current_position(
    conn: &Connection,
    desktop_id: &str,
    accuracy: LocationAccuracy,
    timeout: Duration,
) -> Result<Location> {
    let manager = GeoClueManagerProxy::new(conn).await?;
    let client_path = manager.get_client().await?;

    let client = async {
        Ok::<_, StatusError>(
            GeoClueClientProxy::builder(conn)
                .path(client_path.clone())?
                .build()
                .await?,
        )
    }
    .await;

    let fix = match &client {
        Ok(client) => {
            bounded_session(
                locate(conn, client, desktop_id, accuracy),
                timeout,
                async {
                    if let Err(e) = client.stop().await {
                        debug!("Failed to stop GeoClue2 client: {e}");
                    }
                },
            )
            .await
        }
        Err(e) => Err(StatusError::LocationUnavailable(format!(
            "failed to open GeoClue2 client: {e}"
        ))),
    };

    if let Err(e) = manager.delete_client(&client_path).await {
        warn!("Failed to release GeoClue2 client: {e}");
    }

    fix
}
