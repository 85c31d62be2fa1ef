//! Signal strength conversion and classification.
//!
//! Strength arrives from the platform either as a 0-100 link quality or as a
//! dBm value. Everything downstream works in dBm:
//!
//! - [`quality_to_dbm`] turns a 0-100 quality into dBm as `-(100 - quality)`,
//!   so 100 maps to 0 dBm and 0 maps to -100 dBm.
//! - [`classify`] maps dBm linearly onto 0-100 % over the reference range
//!   [-100, -40] dBm, clamped at both ends, and assigns a tier.

use crate::api::models::{SignalQuality, SignalTier};
use crate::platform::StrengthReading;
use crate::types::constants::signal;

/// Converts a 0-100 link quality to dBm as `-(100 - quality)`.
///
/// Qualities above 100 are treated as 100. Note that quality 100 maps to
/// 0 dBm, the same value that means "no reading", so a full-strength link
/// shows no gauge.
pub fn quality_to_dbm(quality: u8) -> i32 {
    -(i32::from(signal::QUALITY_MAX) - i32::from(quality.min(signal::QUALITY_MAX)))
}

/// Converts a raw strength reading to dBm.
///
/// A missing reading is treated as quality 0.
pub fn reading_to_dbm(reading: Option<StrengthReading>) -> i32 {
    match reading {
        Some(StrengthReading::Quality(q)) => quality_to_dbm(q),
        Some(StrengthReading::Dbm(dbm)) => dbm,
        None => quality_to_dbm(0),
    }
}

/// Maps dBm onto 0-100 % over [-100, -40] dBm, clamped and rounded.
pub fn strength_percentage(dbm: i32) -> u8 {
    let floor = f64::from(signal::FLOOR_DBM);
    let span = f64::from(signal::CEILING_DBM) - floor;
    let pct = ((f64::from(dbm) - floor) / span * 100.0).clamp(0.0, 100.0);
    pct.round() as u8
}

/// Maps dBm to a tier. Values exactly on a threshold take the higher tier.
pub fn tier_for(dbm: i32) -> SignalTier {
    if dbm >= signal::EXCELLENT_MIN {
        SignalTier::Excellent
    } else if dbm >= signal::GOOD_MIN {
        SignalTier::Good
    } else if dbm >= signal::FAIR_MIN {
        SignalTier::Fair
    } else {
        SignalTier::Poor
    }
}

/// Classifies a signal strength given in dBm.
///
/// # Examples
///
/// ```rust
/// use wifistat::{SignalTier, classify};
///
/// let quality = classify(-65);
/// assert_eq!(quality.tier, SignalTier::Fair);
/// assert_eq!(quality.percentage, 58);
/// assert_eq!(quality.icon_key, "wifi-strength-2");
/// ```
pub fn classify(dbm: i32) -> SignalQuality {
    let tier = tier_for(dbm);
    SignalQuality {
        percentage: strength_percentage(dbm),
        tier,
        color_key: tier.color_key(),
        icon_key: tier.icon_key(),
    }
}
