//! # Message Codes - SSE-PDM Message Type Identifiers
//!
//! ## Purpose
//!
//! The closed enumeration of every message type exchanged between the SSE
//! controller and the PDM instrument. The code is the first 32-bit word of
//! every frame and is the *only* thing that determines the payload shape;
//! the registry in `pdm-codec` owns the code-to-shape mapping.
//!
//! The range starts at [`PDM_CODE_RANGE_START`](crate::constants::PDM_CODE_RANGE_START)
//! and ends with the [`PdmMessageCode::PdmMessageCodeEnd`] sentinel, which is
//! used to bounds-check a raw code before registry lookup. Forward
//! compatibility is explicitly not promised: a code outside the known range
//! is a protocol error, never a guess.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Message type identifier, one per frame.
///
/// Values are contiguous from `PDM_CODE_RANGE_START`. New codes may only be
/// appended immediately before the end sentinel.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PdmMessageCode {
    MessageCodeUninit = 10000,
    RequestIntrinsics,
    SendIntrinsics,
    ConfigurePdm,
    PermRfiMask,
    BirdieMask,
    RcvrBirdieMask,
    RecentRfiMask,
    TestSignalMask,
    RequestPdmStatus,
    SendPdmStatus,
    SendPdmActivityParameters,
    PdmTuned,
    PdmScienceDataRequest,
    StartTime,
    BaselineInitAccumStarted,
    BaselineInitAccumComplete,
    DataCollectionStarted,
    DataCollectionComplete,
    SignalDetectionStarted,
    SignalDetectionComplete,
    BeginSendingCandidates,
    SendCandidateCwPowerSignal,
    SendCandidatePulseSignal,
    DoneSendingCandidates,
    BeginSendingSignals,
    SendCwPowerSignal,
    SendPulseSignal,
    DoneSendingSignals,
    BeginSendingCwCoherentSignals,
    SendCwCoherentSignal,
    DoneSendingCwCoherentSignals,
    BeginSendingCandidateResults,
    SendCwCoherentCandidateResult,
    SendPulseCandidateResult,
    DoneSendingCandidateResults,
    BeginSendingFollowUpSignals,
    SendFollowUpCwSignal,
    SendFollowUpPulseSignal,
    DoneSendingFollowUpSignals,
    RequestArchiveData,
    DiscardArchiveData,
    ArchiveSignal,
    BeginSendingArchiveComplexAmplitudes,
    SendArchiveComplexAmplitudes,
    DoneSendingArchiveComplexAmplitudes,
    ArchiveComplete,
    SendPdmMessage,
    SendBaseline,
    SendComplexAmplitudes,
    StopPdmActivity,
    ShutdownPdm,
    RestartPdm,
    PdmActivityComplete,
    SendBaselineStatistics,
    BaselineWarningLimitsExceeded,
    BaselineErrorLimitsExceeded,
    BeginSendingBadBands,
    SendPulseBadBand,
    SendCwBadBand,
    DoneSendingBadBands,
    /// Range sentinel; never a valid frame code.
    PdmMessageCodeEnd,
}

impl PdmMessageCode {
    /// True for codes that may legally appear at the head of a frame.
    pub fn is_valid_frame_code(self) -> bool {
        !matches!(
            self,
            PdmMessageCode::MessageCodeUninit | PdmMessageCode::PdmMessageCodeEnd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PDM_CODE_RANGE_START;

    #[test]
    fn code_range_is_anchored_and_contiguous() {
        assert_eq!(i32::from(PdmMessageCode::MessageCodeUninit), PDM_CODE_RANGE_START);
        assert_eq!(
            i32::from(PdmMessageCode::RequestIntrinsics),
            PDM_CODE_RANGE_START + 1
        );
        assert_eq!(
            i32::from(PdmMessageCode::PdmMessageCodeEnd),
            PDM_CODE_RANGE_START + 61
        );
    }

    #[test]
    fn sentinels_are_not_frame_codes() {
        assert!(!PdmMessageCode::MessageCodeUninit.is_valid_frame_code());
        assert!(!PdmMessageCode::PdmMessageCodeEnd.is_valid_frame_code());
        assert!(PdmMessageCode::SendCwPowerSignal.is_valid_frame_code());
    }

    #[test]
    fn raw_code_outside_range_is_rejected() {
        assert!(PdmMessageCode::try_from(PDM_CODE_RANGE_START - 1).is_err());
        assert!(PdmMessageCode::try_from(PDM_CODE_RANGE_START + 62).is_err());
    }
}
