//! # Signal Payloads - Detection Products on the Wire
//!
//! ## Purpose
//!
//! Every structure describing a detected or requested signal: identifiers,
//! physical measurements, CW power/coherent detections, pulse trains,
//! follow-up requests, bad bands and per-activity detection statistics.
//!
//! Struct fields are declared in wire order; `align_pad` fields present in
//! the on-wire layout are *not* represented here; the codec in `pdm-codec`
//! writes and skips them at the documented offsets so the in-memory types
//! stay free of marshalling artifacts.

use crate::class::{SignalClass, SignalClassReason};
use crate::common::{NssDate, Polarization, Resolution};
use crate::constants::MAX_CW_COHERENT_SEGMENTS;

/// Unique signal identifier.
///
/// The tuple (instrument ordinal, activity id, activity start time,
/// sequence number) is globally unique for the lifetime of the system and
/// immutable once minted. Follow-up and archive messages reference the
/// originating detection through a second `SignalId` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalId {
    /// Ordinal from the instrument hostname (7 for "pdm7").
    pub pdm_number: i32,
    pub activity_id: i32,
    pub activity_start_time: NssDate,
    /// Per-activity counter, starting at zero.
    pub number: i32,
}

/// Physical measurement of one signal path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalPath {
    /// MHz
    pub rf_freq: f64,
    /// Hz/s
    pub drift: f32,
    /// Hz
    pub width: f32,
    pub power: f32,
}

/// A signal's measurement bundled with its current classification.
///
/// Class and reason are only ever replaced together, by the classification
/// rules in `pdm-codec`; mutating one without the other breaks the
/// taxonomy's legality invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalDescription {
    pub path: SignalPath,
    pub pol: Polarization,
    pub sig_class: SignalClass,
    pub reason: SignalClassReason,
    /// Subband containing this signal.
    pub subband_number: i32,
    pub contains_bad_bands: bool,
    pub signal_id: SignalId,
    /// Originating detection, set on follow-up observations.
    pub orig_signal_id: SignalId,
}

/// CW detection that crossed the power threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CwPowerSignal {
    pub sig: SignalDescription,
}

/// Confirmation statistics for a coherent detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfirmationStats {
    /// Probability of false alarm (e^-x).
    pub pfa: f32,
    /// Signal to noise ratio in a 1 Hz channel.
    pub snr: f32,
}

/// One coherently-detected segment of a CW signal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CwCoherentSegment {
    pub path: SignalPath,
    pub pfa: f32,
    pub snr: f32,
}

/// CW signal confirmed by coherent detection.
///
/// The segment array always occupies its full
/// [`MAX_CW_COHERENT_SEGMENTS`] capacity on the wire; only the first
/// `n_segments` entries are meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CwCoherentSignal {
    pub sig: SignalDescription,
    pub cfm: ConfirmationStats,
    pub n_segments: i32,
    pub segment: [CwCoherentSegment; MAX_CW_COHERENT_SEGMENTS],
}

/// One pulse of a pulse train.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pulse {
    /// MHz
    pub rf_freq: f64,
    pub power: f32,
    pub spectrum_number: i32,
    pub bin_number: i32,
    pub pol: Polarization,
}

/// Shape of a detected pulse train; followed on the wire by
/// `number_of_pulses` [`Pulse`] elements.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseTrainDescription {
    /// Seconds.
    pub pulse_period: f32,
    pub number_of_pulses: i32,
    pub res: Resolution,
}

/// Fixed-size header of a pulse signal message.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseSignalHeader {
    pub sig: SignalDescription,
    pub cfm: ConfirmationStats,
    pub train: PulseTrainDescription,
}

/// Complete pulse signal: header plus its pulse train.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseSignal {
    pub header: PulseSignalHeader,
    pub pulses: Vec<Pulse>,
}

/// Re-observation request projecting an earlier signal into a new activity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FollowUpSignal {
    /// Projected frequency at the start of the new observation (MHz).
    pub rf_freq: f64,
    /// Hz/s
    pub drift: f32,
    pub res: Resolution,
    pub orig_signal_id: SignalId,
}

/// Follow-up request for a CW detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FollowUpCwSignal {
    pub sig: FollowUpSignal,
}

/// Follow-up request for a pulse detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FollowUpPulseSignal {
    pub sig: FollowUpSignal,
}

/// Counters summarizing one activity's signal detection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionStatistics {
    pub total_candidates: i32,
    pub cw_candidates: i32,
    pub pulse_candidates: i32,
    /// Candidates over the `max_number_of_candidates` limit.
    pub candidates_over_max: i32,
    pub total_signals: i32,
    pub cw_signals: i32,
    pub pulse_signals: i32,
    pub left_cw_hits: i32,
    pub right_cw_hits: i32,
    pub left_cw_clusters: i32,
    pub right_cw_clusters: i32,
    pub total_pulses: i32,
    pub left_pulses: i32,
    pub right_pulses: i32,
    pub triplets: i32,
    pub pulse_trains: i32,
    pub pulse_clusters: i32,
}

/// Frequency band declared unusable for CW detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CwBadBand {
    pub band: crate::mask::FrequencyBand,
    pub pol: Polarization,
    /// Paths over threshold in this band.
    pub paths: i32,
    /// Limit the band exceeded.
    pub max_path_count: i32,
    pub max_path: SignalPath,
}

/// Frequency band declared unusable for pulse detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseBadBand {
    pub band: crate::mask::FrequencyBand,
    pub res: Resolution,
    pub pol: Polarization,
    pub pulses: i32,
    pub max_pulse_count: i32,
    pub triplets: i32,
    pub max_triplet_count: i32,
    pub too_many_triplets: bool,
}
