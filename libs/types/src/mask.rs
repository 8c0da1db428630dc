//! Frequency mask payloads: band lists the controller pushes to the PDM so
//! known interferers and test tones are excluded from detection.
//!
//! Both mask messages are variable length: a fixed header declaring
//! `number_of_freq_bands`, followed on the wire by exactly that many
//! [`FrequencyBand`] elements.

use crate::common::NssDate;

/// One contiguous band of spectrum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyBand {
    /// MHz
    pub center_freq: f64,
    /// MHz
    pub bandwidth: f32,
}

/// Header of a permanent/birdie/receiver-birdie/test-signal mask.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyMaskHeader {
    pub number_of_freq_bands: i32,
    pub mask_version_date: NssDate,
    /// Overall band the mask covers.
    pub band_covered: FrequencyBand,
}

/// A complete frequency mask message.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyMask {
    pub header: FrequencyMaskHeader,
    pub bands: Vec<FrequencyBand>,
}

/// Header of a recent-RFI mask. Unlike the dated masks this one carries the
/// target whose own signals are excluded from the list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecentRfiMaskHeader {
    pub number_of_freq_bands: i32,
    /// Current target whose signals are excluded from the list.
    pub excluded_target_id: i32,
    pub band_covered: FrequencyBand,
}

/// A complete recent-RFI mask message.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecentRfiMask {
    pub header: RecentRfiMaskHeader,
    pub bands: Vec<FrequencyBand>,
}
