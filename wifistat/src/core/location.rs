//! Geolocation reader.
//!
//! Requests the current position and never fails: any error, including a
//! timed out fix, yields `None`.

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::models::{Location, LocationAccuracy};
use crate::platform::PositionReader;
use crate::types::constants::timeouts;
use crate::util::utils::with_deadline;

/// Reads the current position, or nothing when disabled.
#[derive(Clone)]
pub struct LocationReader {
    position: Option<Arc<dyn PositionReader>>,
    accuracy: LocationAccuracy,
    timeout: Duration,
}

impl fmt::Debug for LocationReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationReader")
            .field("enabled", &self.position.is_some())
            .field("accuracy", &self.accuracy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LocationReader {
    /// Creates a reader that asks `position` for a fix at `accuracy`.
    pub fn new(position: Arc<dyn PositionReader>, accuracy: LocationAccuracy) -> Self {
        Self {
            position: Some(position),
            accuracy,
            timeout: timeouts::location_timeout(),
        }
    }

    /// Creates a reader that never touches the platform and always returns `None`.
    pub fn disabled() -> Self {
        Self {
            position: None,
            accuracy: LocationAccuracy::default(),
            timeout: timeouts::location_timeout(),
        }
    }

    /// Sets the deadline for a position fix.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.position.is_some()
    }

    /// Returns the current position, or `None` if it could not be read.
    pub async fn get_location(&self) -> Option<Location> {
        let Some(position) = &self.position else {
            debug!("Location disabled, skipping position read");
            return None;
        };

        // The provider enforces `timeout` itself so it can release its
        // session; the outer deadline only catches one that doesn't
        match with_deadline(
            position.read_current_position(self.accuracy, self.timeout),
            self.timeout.saturating_add(timeouts::release_grace()),
            "position read",
        )
        .await
        {
            Ok(location) => Some(location),
            Err(e) => {
                warn!("Error getting location: {e}");
                None
            }
        }
    }
}
