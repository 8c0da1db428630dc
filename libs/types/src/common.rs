//! Scalar building blocks shared across SSE-PDM payloads: timestamps,
//! polarization, detection resolutions and operator-visible messages.
//!
//! Every enum here travels as its `i32` discriminant; `num_enum`'s
//! `TryFromPrimitive` gives the codec a checked conversion so an
//! out-of-range discriminant surfaces as a protocol error instead of a
//! panic.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::constants::MAX_NSS_MESSAGE_STRING;

/// Wire timestamp: seconds and microseconds since the Unix epoch.
///
/// Two `i32` fields on the wire, in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NssDate {
    pub tv_sec: i32,
    pub tv_usec: i32,
}

impl NssDate {
    pub fn new(tv_sec: i32, tv_usec: i32) -> Self {
        Self { tv_sec, tv_usec }
    }
}

/// Polarization of a detection path or science data product.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarization {
    #[default]
    Uninit = 0,
    RightCircular = 1,
    LeftCircular = 2,
    Both = 3,
    Mixed = 4,
}

/// Observing site an instrument is configured for.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SiteId {
    #[default]
    Uninit = 0,
    Arecibo = 1,
    JodrellBank = 2,
    Ata = 3,
    Test = 4,
}

/// Pulse detection resolution, 1 Hz through 1 KHz in octave steps.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    Res1Hz = 0,
    Res2Hz = 1,
    Res4Hz = 2,
    Res8Hz = 3,
    Res16Hz = 4,
    Res32Hz = 5,
    Res64Hz = 6,
    Res128Hz = 7,
    Res256Hz = 8,
    Res512Hz = 9,
    Res1KHz = 10,
    #[default]
    ResUninit = 11,
}

/// Severity attached to an operator-visible instrument message.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NssMessageSeverity {
    #[default]
    Info = 0,
    Warning = 1,
    Error = 2,
    Fatal = 3,
}

/// Free-form diagnostic message from the PDM, carried by `SEND_PDM_MESSAGE`.
///
/// Wire layout: code (i32), severity (i32), description
/// ([`MAX_NSS_MESSAGE_STRING`] bytes, NUL terminated).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NssMessage {
    pub code: i32,
    pub severity: NssMessageSeverity,
    pub description: String,
}

impl NssMessage {
    /// Maximum description length in characters (capacity minus terminator).
    pub const MAX_DESCRIPTION_LEN: usize = MAX_NSS_MESSAGE_STRING - 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_discriminants_are_contiguous() {
        assert_eq!(i32::from(Resolution::Res1Hz), 0);
        assert_eq!(i32::from(Resolution::Res1KHz), 10);
        assert_eq!(i32::from(Resolution::ResUninit), 11);
        assert_eq!(Resolution::try_from(10), Ok(Resolution::Res1KHz));
        assert!(Resolution::try_from(12).is_err());
    }

    #[test]
    fn polarization_rejects_unknown_discriminant() {
        assert!(Polarization::try_from(5).is_err());
        assert_eq!(Polarization::try_from(3), Ok(Polarization::Both));
    }
}
