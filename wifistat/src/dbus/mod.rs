//! D-Bus proxy interfaces for NetworkManager and GeoClue2.
//!
//! This module contains low-level D-Bus proxy definitions for reading
//! connectivity state, Wi-Fi details and the device position over the
//! system bus.

mod access_point;
mod active_connection;
mod device;
mod geoclue;
mod main_nm;
mod wireless;

pub(crate) use access_point::NMAccessPointProxy;
pub(crate) use active_connection::NMActiveConnectionProxy;
pub(crate) use device::NMDeviceProxy;
pub(crate) use geoclue::{GeoClueClientProxy, GeoClueLocationProxy, GeoClueManagerProxy};
pub(crate) use main_nm::NMProxy;
pub(crate) use wireless::NMWirelessProxy;
