//! # Activity Payloads - Observing Run Control
//!
//! ## Purpose
//!
//! Everything the controller sends to set up and drive one observing
//! activity, and the status structures the PDM reports back: activity
//! parameters (tuning, thresholds, science data requests), the operations
//! bitmask, the lifecycle state enumeration, and per-activity status.
//!
//! The lifecycle itself is enforced by `pdm-codec`'s activity tracker;
//! these are the wire shapes only.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::common::{NssDate, Polarization, Resolution};
use crate::constants::{MAX_PDM_ACTIVITIES, MAX_RESOLUTIONS};

/// How a science data request addresses a subband.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SciDataRequestType {
    /// Request the subband containing an RF frequency.
    #[default]
    ReqFreq = 0,
    /// Request a subband by number.
    ReqSubband = 1,
}

/// Science data products the controller wants during an activity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmScienceDataRequest {
    pub send_baselines: bool,
    pub send_baseline_statistics: bool,
    pub check_baseline_warning_limits: bool,
    pub check_baseline_error_limits: bool,
    /// Half frames between baseline reports.
    pub baseline_reporting_half_frames: i32,
    pub send_complex_amplitudes: bool,
    pub request_type: SciDataRequestType,
    /// Requested subband, when `request_type` is [`SciDataRequestType::ReqSubband`].
    pub subband: i32,
    /// Frequency whose subband is requested, when addressing by frequency (MHz).
    pub rf_freq: f64,
}

/// Per-resolution pulse detection thresholds, all in units of sigma.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseParameters {
    pub pulse_threshold: f64,
    pub triplet_threshold: f64,
    pub singlet_threshold: f64,
}

/// Bounds on acceptable baseline statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaselineLimits {
    pub mean_upper_bound: f32,
    pub mean_lower_bound: f32,
    pub std_dev_percent: f32,
    pub max_range: f32,
}

/// One operation the PDM can be asked to perform during an activity.
///
/// The enum value *is* the bit position inside [`PdmOperations`]; positions
/// are wire contract and must never be reordered.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PdmOperation {
    DataCollection = 0,
    Baselining = 1,
    FreqInversion = 2,
    PulseDetection = 3,
    PowerCwd = 4,
    CoherentCwd = 5,
    ApplyBirdieMask = 6,
    ApplyRcvrBirdieMask = 7,
    ApplyPermanentRfiMask = 8,
    ApplyRecentRfiMask = 9,
    ApplyTestSignalMask = 10,
    ApplyDoppler = 11,
    RejectZeroDriftSignals = 12,
    CandidateSelection = 13,
    ProcessSecondaryCandidates = 14,
    FollowUpCandidates = 15,
    /// Raw CW paths, no clustering.
    SendRawSignalDetectionProducts = 16,
}

impl PdmOperation {
    /// Number of defined operation bits.
    pub const COUNT: u32 = 17;
}

/// Set of requested operations, one bit per [`PdmOperation`].
///
/// Travels as a plain `u32`; bits above the defined range are preserved
/// verbatim for wire compatibility but are not interpretable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmOperations(pub u32);

impl PdmOperations {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(self, op: PdmOperation) -> bool {
        self.0 & (1 << u32::from(op)) != 0
    }

    pub fn insert(&mut self, op: PdmOperation) {
        self.0 |= 1 << u32::from(op);
    }

    pub fn remove(&mut self, op: PdmOperation) {
        self.0 &= !(1 << u32::from(op));
    }

    pub fn with(mut self, op: PdmOperation) -> Self {
        self.insert(op);
        self
    }
}

/// Full parameter set for one observing activity.
///
/// Values marked mode dependent vary with the PDM role (main, remote,
/// main-only).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmActivityParameters {
    pub activity_id: i32,
    /// Seconds.
    pub data_collection_length: i32,
    /// RF frequency of the receiver band center (MHz).
    pub rcvr_sky_freq: f64,
    /// RF frequency of the IFC band center (MHz).
    pub ifc_sky_freq: f64,
    /// RF frequency of the PDM band center (MHz).
    pub pdm_sky_freq: f64,
    /// Number of subbands, a multiple of 512.
    pub channel_number: i32,
    pub operations: PdmOperations,
    /// Main/remote relative sensitivity.
    pub sensitivity_ratio: f32,
    pub max_number_of_candidates: i32,
    /// Hz
    pub clustering_freq_tolerance: f32,
    /// Hz/s
    pub zero_drift_tolerance: f32,
    /// Hz/s
    pub max_drift_rate_tolerance: f32,

    // CW
    /// Per KHz.
    pub bad_band_cw_path_limit: f64,
    /// Bins.
    pub cw_clustering_delta_freq: i32,
    /// 1, 2 or 4 Hz.
    pub dadd_resolution: Resolution,
    /// Sigma.
    pub dadd_threshold: f64,
    /// Sigma, mode dependent.
    pub cw_coherent_threshold: f64,
    /// Sigma.
    pub secondary_cw_coherent_threshold: f64,
    /// Sigma.
    pub secondary_pfa_margin: f64,
    pub limits_for_coherent_detection: f64,

    // Pulse
    /// Per KHz.
    pub bad_band_pulse_triplet_limit: f64,
    /// Per KHz.
    pub bad_band_pulse_limit: f64,
    /// Bins.
    pub pulse_clustering_delta_freq: i32,
    /// Mode dependent.
    pub pulse_train_signif_thresh: f32,
    /// Sigma.
    pub secondary_pulse_train_signif_thresh: f32,
    pub max_pulses_per_half_frame: i32,
    pub max_pulses_per_subband_per_half_frame: i32,
    pub request_pulse_resolution: [bool; MAX_RESOLUTIONS],
    pub pd: [PulseParameters; MAX_RESOLUTIONS],

    pub science_data_request: PdmScienceDataRequest,

    /// Subbands averaged per baseline statistic; an integer factor of the
    /// total number of subbands.
    pub baseline_subband_average: i32,
    /// Half frames of baseline accumulation before data collection begins.
    pub baseline_init_accum_half_frames: i32,
    /// Decay factor.
    pub baseline_decay: f32,
    pub baseline_warning_limits: BaselineLimits,
    pub baseline_error_limits: BaselineLimits,
}

impl Default for PdmActivityParameters {
    fn default() -> Self {
        Self {
            activity_id: 0,
            data_collection_length: 0,
            rcvr_sky_freq: 0.0,
            ifc_sky_freq: 0.0,
            pdm_sky_freq: 0.0,
            channel_number: 0,
            operations: PdmOperations::empty(),
            sensitivity_ratio: 0.0,
            max_number_of_candidates: 0,
            clustering_freq_tolerance: 0.0,
            zero_drift_tolerance: 0.0,
            max_drift_rate_tolerance: 0.0,
            bad_band_cw_path_limit: 0.0,
            cw_clustering_delta_freq: 0,
            dadd_resolution: Resolution::ResUninit,
            dadd_threshold: 0.0,
            cw_coherent_threshold: 0.0,
            secondary_cw_coherent_threshold: 0.0,
            secondary_pfa_margin: 0.0,
            limits_for_coherent_detection: 0.0,
            bad_band_pulse_triplet_limit: 0.0,
            bad_band_pulse_limit: 0.0,
            pulse_clustering_delta_freq: 0,
            pulse_train_signif_thresh: 0.0,
            secondary_pulse_train_signif_thresh: 0.0,
            max_pulses_per_half_frame: 0,
            max_pulses_per_subband_per_half_frame: 0,
            request_pulse_resolution: [false; MAX_RESOLUTIONS],
            pd: [PulseParameters::default(); MAX_RESOLUTIONS],
            science_data_request: PdmScienceDataRequest::default(),
            baseline_subband_average: 0,
            baseline_init_accum_half_frames: 0,
            baseline_decay: 0.0,
            baseline_warning_limits: BaselineLimits::default(),
            baseline_error_limits: BaselineLimits::default(),
        }
    }
}

/// Confirmation that the PDM tuned for the coming activity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmTuned {
    /// RF frequency of the PDM band center (MHz).
    pub pdm_sky_freq: f64,
    /// Seconds.
    pub data_collection_length: i32,
    /// Collection length in frames.
    pub data_collection_frames: i32,
}

/// Scheduled start time for an activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartActivity {
    pub start_time: NssDate,
}

/// Lifecycle state of one activity.
///
/// Forward order is the only legal progression; stop and error paths may
/// leave it from any non-terminal state.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PdmActivityState {
    /// No activity.
    #[default]
    None = 0,
    Init = 1,
    Tuned = 2,
    /// Pending initial baseline accumulation.
    PendBaseAccum = 3,
    RunBaseAccum = 4,
    BaseAccumComplete = 5,
    /// Pending data collection.
    PendDc = 6,
    RunDc = 7,
    DcComplete = 8,
    /// Pending signal detection.
    PendSd = 9,
    RunSd = 10,
    SdComplete = 11,
    Complete = 12,
    Stopping = 13,
    Stopped = 14,
    Error = 15,
}

impl PdmActivityState {
    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PdmActivityState::Complete | PdmActivityState::Stopped | PdmActivityState::Error
        )
    }
}

/// State report for one activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmActivityStatus {
    pub activity_id: i32,
    pub current_state: PdmActivityState,
}

/// Instrument-wide status: every tracked activity's state.
///
/// The activity array always occupies its full [`MAX_PDM_ACTIVITIES`]
/// capacity on the wire; only the first `number_of_activities` entries are
/// meaningful.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmStatus {
    pub timestamp: NssDate,
    pub number_of_activities: i32,
    pub act: [PdmActivityStatus; MAX_PDM_ACTIVITIES],
}

/// Single counter payload; carries the activity id in `STOP_PDM_ACTIVITY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Count {
    pub count: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_round_trip_bit_positions() {
        let mut ops = PdmOperations::empty();
        ops.insert(PdmOperation::DataCollection);
        ops.insert(PdmOperation::SendRawSignalDetectionProducts);
        assert_eq!(ops.0, (1 << 0) | (1 << 16));
        assert!(ops.contains(PdmOperation::DataCollection));
        assert!(!ops.contains(PdmOperation::ApplyDoppler));

        ops.remove(PdmOperation::DataCollection);
        assert!(!ops.contains(PdmOperation::DataCollection));
        assert_eq!(ops.0, 1 << 16);
    }

    #[test]
    fn terminal_states() {
        assert!(PdmActivityState::Complete.is_terminal());
        assert!(PdmActivityState::Stopped.is_terminal());
        assert!(PdmActivityState::Error.is_terminal());
        assert!(!PdmActivityState::Stopping.is_terminal());
        assert!(!PdmActivityState::RunDc.is_terminal());
    }
}
