//! Baseline payloads: per-subband average power reported during an
//! activity, plus the statistics and limit-violation reports derived from
//! it.
//!
//! `Baseline` is the current variable-length form. The fixed-capacity
//! [`LegacyBaseline`] predates it and is kept for byte-compatibility with
//! older peers and archived data; see `pdm-codec::variable` for the
//! decode rules that apply to both.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::common::Polarization;
use crate::constants::MAX_BASELINE_SUBBANDS;

/// Header of a baseline report; followed on the wire by
/// `number_of_subbands` f32 values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineHeader {
    /// MHz
    pub rf_center_freq: f64,
    /// MHz
    pub bandwidth: f64,
    pub half_frame_number: i32,
    pub number_of_subbands: i32,
    pub pol: Polarization,
    pub activity_id: i32,
}

/// Variable-length baseline report.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Baseline {
    pub header: BaselineHeader,
    pub values: Vec<f32>,
}

/// Deprecated fixed-capacity baseline form.
///
/// The trailing array is physically [`MAX_BASELINE_SUBBANDS`] long on the
/// wire regardless of the header count; slots past
/// `header.number_of_subbands` are zero fill and are not data.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyBaseline {
    pub header: BaselineHeader,
    #[cfg_attr(feature = "serde", serde(with = "serde_big_array_workaround"))]
    pub baseline_values: Box<[f32; MAX_BASELINE_SUBBANDS]>,
}

impl Default for LegacyBaseline {
    fn default() -> Self {
        Self {
            header: BaselineHeader::default(),
            baseline_values: Box::new([0.0; MAX_BASELINE_SUBBANDS]),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_big_array_workaround {
    //! serde lacks impls for arrays past 32 elements; ship the block as a
    //! plain sequence.
    use super::MAX_BASELINE_SUBBANDS;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        v: &[f32; MAX_BASELINE_SUBBANDS],
        s: S,
    ) -> Result<S::Ok, S::Error> {
        v.as_slice().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Box<[f32; MAX_BASELINE_SUBBANDS]>, D::Error> {
        let v = Vec::<f32>::deserialize(d)?;
        let arr: [f32; MAX_BASELINE_SUBBANDS] = v
            .try_into()
            .map_err(|_| serde::de::Error::custom("wrong baseline array length"))?;
        Ok(Box::new(arr))
    }
}

/// Health of the most recent baseline statistics.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaselineStatus {
    #[default]
    Uninit = 0,
    Good = 1,
    Warning = 2,
    Error = 3,
}

/// Statistics over one baseline report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineStatistics {
    pub mean: f32,
    pub std_dev: f32,
    pub range: f32,
    pub half_frame_number: i32,
    pub rf_center_freq_mhz: f64,
    pub bandwidth_mhz: f64,
    pub pol: Polarization,
    pub status: BaselineStatus,
}

/// Details accompanying a baseline warning/error limits report.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineLimitsExceededDetails {
    pub pol: Polarization,
    /// Human-readable description, capped at
    /// [`MAX_NSS_MESSAGE_STRING`](crate::constants::MAX_NSS_MESSAGE_STRING) bytes on the wire.
    pub description: String,
}
