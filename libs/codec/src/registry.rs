//! # Message Registry - Code to Payload Shape Mapping
//!
//! ## Purpose
//!
//! The single authoritative table from every [`PdmMessageCode`] to the
//! shape of its payload. A frame on the wire is the 32-bit message code
//! followed immediately by the payload bytes; there is no length prefix,
//! so the code alone determines how many bytes the payload occupies
//! (fixed) or how its length is derived (variable, from a header count).
//!
//! Bracket codes (`BeginSending*` / `DoneSending*`) and parameterless
//! requests carry no payload at all; they delimit runs of homogeneous
//! messages and decode to [`Payload::Empty`].
//!
//! Unknown raw codes are rejected with [`WireError::UnknownMessageCode`].
//! Forward compatibility is deliberately not attempted: guessing the shape
//! of an unrecognized code would desynchronize the stream.

use tracing::warn;

// PdmTuned, PdmScienceDataRequest and RecentRfiMask stay fully qualified:
// message codes of the same name would shadow them in the match arms below.
use pdm_types::{
    ArchiveData, ArchiveRequest, Baseline, BaselineLimitsExceededDetails, BaselineStatistics,
    ComplexAmplitudes, Count, CwBadBand, CwCoherentSignal, CwPowerSignal, FollowUpCwSignal,
    FollowUpPulseSignal, FrequencyMask, NssMessage, PdmActivityParameters, PdmActivityStatus,
    PdmConfiguration, PdmIntrinsics, PdmMessageCode, PdmStatus, PulseBadBand, PulseSignal,
    StartActivity,
};

use crate::error::{WireError, WireResult};
use crate::fixed::WireCodec;
use crate::variable::VariableCodec;
use crate::wire::{WireReader, WireWriter};

/// A decoded message payload. One variant per distinct payload shape; the
/// registry maps several codes onto the same variant where the wire shape
/// is shared (e.g. the four dated mask messages).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Payload {
    Empty,
    Intrinsics(Box<PdmIntrinsics>),
    Configuration(PdmConfiguration),
    FrequencyMask(FrequencyMask),
    RecentRfiMask(pdm_types::RecentRfiMask),
    Status(PdmStatus),
    ActivityParameters(Box<PdmActivityParameters>),
    Tuned(pdm_types::PdmTuned),
    ScienceDataRequest(pdm_types::PdmScienceDataRequest),
    StartTime(StartActivity),
    ActivityStatus(PdmActivityStatus),
    CwPowerSignal(CwPowerSignal),
    CwCoherentSignal(Box<CwCoherentSignal>),
    PulseSignal(PulseSignal),
    FollowUpCwSignal(FollowUpCwSignal),
    FollowUpPulseSignal(FollowUpPulseSignal),
    ArchiveRequest(ArchiveRequest),
    ArchiveData(ArchiveData),
    Baseline(Baseline),
    ComplexAmplitudes(ComplexAmplitudes),
    BaselineStatistics(BaselineStatistics),
    BaselineLimitsExceeded(BaselineLimitsExceededDetails),
    CwBadBand(CwBadBand),
    PulseBadBand(PulseBadBand),
    Message(NssMessage),
    Count(Count),
}

/// Payload shape registered for a message code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// No payload bytes follow the code.
    Empty,
    /// A fixed number of payload bytes follow the code.
    Fixed(usize),
    /// Payload length is derived from a count inside its own header.
    Variable,
}

/// Descriptor returned by [`lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadDescriptor {
    pub code: PdmMessageCode,
    pub kind: PayloadKind,
}

/// The code-to-shape table.
///
/// Every valid frame code appears exactly once; the sentinels are rejected
/// before lookup by [`PdmMessageCode::is_valid_frame_code`].
pub fn lookup(code: PdmMessageCode) -> WireResult<PayloadDescriptor> {
    use PdmMessageCode::*;

    if !code.is_valid_frame_code() {
        return Err(WireError::UnknownMessageCode { raw: code.into() });
    }

    let kind = match code {
        RequestIntrinsics | RequestPdmStatus | ShutdownPdm | RestartPdm
        | BeginSendingCandidates | DoneSendingCandidates | BeginSendingSignals
        | DoneSendingSignals | BeginSendingCwCoherentSignals | DoneSendingCwCoherentSignals
        | BeginSendingCandidateResults | DoneSendingCandidateResults
        | BeginSendingFollowUpSignals | DoneSendingFollowUpSignals
        | BeginSendingArchiveComplexAmplitudes | DoneSendingArchiveComplexAmplitudes
        | BeginSendingBadBands | DoneSendingBadBands => PayloadKind::Empty,

        SendIntrinsics => PayloadKind::Fixed(PdmIntrinsics::WIRE_SIZE),
        ConfigurePdm => PayloadKind::Fixed(PdmConfiguration::WIRE_SIZE),
        SendPdmStatus => PayloadKind::Fixed(PdmStatus::WIRE_SIZE),
        SendPdmActivityParameters => PayloadKind::Fixed(PdmActivityParameters::WIRE_SIZE),
        PdmTuned => PayloadKind::Fixed(pdm_types::PdmTuned::WIRE_SIZE),
        PdmScienceDataRequest => PayloadKind::Fixed(pdm_types::PdmScienceDataRequest::WIRE_SIZE),
        StartTime => PayloadKind::Fixed(StartActivity::WIRE_SIZE),
        BaselineInitAccumStarted | BaselineInitAccumComplete | DataCollectionStarted
        | DataCollectionComplete | SignalDetectionStarted | SignalDetectionComplete
        | PdmActivityComplete => PayloadKind::Fixed(PdmActivityStatus::WIRE_SIZE),
        SendCandidateCwPowerSignal | SendCwPowerSignal => {
            PayloadKind::Fixed(CwPowerSignal::WIRE_SIZE)
        }
        SendCwCoherentSignal | SendCwCoherentCandidateResult => {
            PayloadKind::Fixed(CwCoherentSignal::WIRE_SIZE)
        }
        SendFollowUpCwSignal => PayloadKind::Fixed(FollowUpCwSignal::WIRE_SIZE),
        SendFollowUpPulseSignal => PayloadKind::Fixed(FollowUpPulseSignal::WIRE_SIZE),
        RequestArchiveData | DiscardArchiveData | ArchiveSignal | ArchiveComplete => {
            PayloadKind::Fixed(ArchiveRequest::WIRE_SIZE)
        }
        SendPdmMessage => PayloadKind::Fixed(NssMessage::WIRE_SIZE),
        StopPdmActivity => PayloadKind::Fixed(Count::WIRE_SIZE),
        SendBaselineStatistics => PayloadKind::Fixed(BaselineStatistics::WIRE_SIZE),
        BaselineWarningLimitsExceeded | BaselineErrorLimitsExceeded => {
            PayloadKind::Fixed(BaselineLimitsExceededDetails::WIRE_SIZE)
        }
        SendPulseBadBand => PayloadKind::Fixed(PulseBadBand::WIRE_SIZE),
        SendCwBadBand => PayloadKind::Fixed(CwBadBand::WIRE_SIZE),

        PermRfiMask | BirdieMask | RcvrBirdieMask | RecentRfiMask | TestSignalMask
        | SendBaseline | SendComplexAmplitudes | SendCandidatePulseSignal | SendPulseSignal
        | SendPulseCandidateResult | SendArchiveComplexAmplitudes => PayloadKind::Variable,

        MessageCodeUninit | PdmMessageCodeEnd => unreachable!("sentinels rejected above"),
    };
    Ok(PayloadDescriptor { code, kind })
}

/// Decode the payload bytes of a message whose code is already known.
///
/// Trailing bytes beyond the registered payload length are tolerated; the
/// cursor stops at the end of the payload.
pub fn decode_payload(code: PdmMessageCode, bytes: &[u8]) -> WireResult<Payload> {
    decode_payload_from(code, &mut WireReader::new(bytes))
}

// Cursor-based decode shared by `decode_payload` and `decode_frame`; the
// reader's position after a successful decode is the payload length.
fn decode_payload_from(code: PdmMessageCode, r: &mut WireReader<'_>) -> WireResult<Payload> {
    use PdmMessageCode::*;

    lookup(code)?;
    let payload = match code {
        RequestIntrinsics | RequestPdmStatus | ShutdownPdm | RestartPdm
        | BeginSendingCandidates | DoneSendingCandidates | BeginSendingSignals
        | DoneSendingSignals | BeginSendingCwCoherentSignals | DoneSendingCwCoherentSignals
        | BeginSendingCandidateResults | DoneSendingCandidateResults
        | BeginSendingFollowUpSignals | DoneSendingFollowUpSignals
        | BeginSendingArchiveComplexAmplitudes | DoneSendingArchiveComplexAmplitudes
        | BeginSendingBadBands | DoneSendingBadBands => Payload::Empty,

        SendIntrinsics => Payload::Intrinsics(Box::new(PdmIntrinsics::decode(r)?)),
        ConfigurePdm => Payload::Configuration(PdmConfiguration::decode(r)?),
        SendPdmStatus => Payload::Status(PdmStatus::decode(r)?),
        SendPdmActivityParameters => {
            Payload::ActivityParameters(Box::new(PdmActivityParameters::decode(r)?))
        }
        PdmTuned => Payload::Tuned(pdm_types::PdmTuned::decode(r)?),
        PdmScienceDataRequest => {
            Payload::ScienceDataRequest(pdm_types::PdmScienceDataRequest::decode(r)?)
        }
        StartTime => Payload::StartTime(StartActivity::decode(r)?),
        BaselineInitAccumStarted | BaselineInitAccumComplete | DataCollectionStarted
        | DataCollectionComplete | SignalDetectionStarted | SignalDetectionComplete
        | PdmActivityComplete => Payload::ActivityStatus(PdmActivityStatus::decode(r)?),
        SendCandidateCwPowerSignal | SendCwPowerSignal => {
            Payload::CwPowerSignal(CwPowerSignal::decode(r)?)
        }
        SendCwCoherentSignal | SendCwCoherentCandidateResult => {
            Payload::CwCoherentSignal(Box::new(CwCoherentSignal::decode(r)?))
        }
        SendFollowUpCwSignal => Payload::FollowUpCwSignal(FollowUpCwSignal::decode(r)?),
        SendFollowUpPulseSignal => Payload::FollowUpPulseSignal(FollowUpPulseSignal::decode(r)?),
        RequestArchiveData | DiscardArchiveData | ArchiveSignal | ArchiveComplete => {
            Payload::ArchiveRequest(ArchiveRequest::decode(r)?)
        }
        SendPdmMessage => Payload::Message(NssMessage::decode(r)?),
        StopPdmActivity => Payload::Count(Count::decode(r)?),
        SendBaselineStatistics => Payload::BaselineStatistics(BaselineStatistics::decode(r)?),
        BaselineWarningLimitsExceeded | BaselineErrorLimitsExceeded => {
            Payload::BaselineLimitsExceeded(BaselineLimitsExceededDetails::decode(r)?)
        }
        SendPulseBadBand => Payload::PulseBadBand(PulseBadBand::decode(r)?),
        SendCwBadBand => Payload::CwBadBand(CwBadBand::decode(r)?),

        PermRfiMask | BirdieMask | RcvrBirdieMask | TestSignalMask => {
            Payload::FrequencyMask(FrequencyMask::decode(r)?)
        }
        RecentRfiMask => Payload::RecentRfiMask(pdm_types::RecentRfiMask::decode(r)?),
        SendBaseline => Payload::Baseline(Baseline::decode(r)?),
        SendComplexAmplitudes => Payload::ComplexAmplitudes(ComplexAmplitudes::decode(r)?),
        SendCandidatePulseSignal | SendPulseSignal | SendPulseCandidateResult => {
            Payload::PulseSignal(PulseSignal::decode(r)?)
        }
        SendArchiveComplexAmplitudes => Payload::ArchiveData(ArchiveData::decode(r)?),

        MessageCodeUninit | PdmMessageCodeEnd => unreachable!("sentinels rejected by lookup"),
    };
    Ok(payload)
}

/// Encode a payload for a message code.
///
/// The payload variant must match the shape registered for the code;
/// anything else is [`WireError::PayloadMismatch`].
pub fn encode_payload(code: PdmMessageCode, payload: &Payload) -> WireResult<Vec<u8>> {
    use PdmMessageCode::*;

    let descriptor = lookup(code)?;
    let mut w = match descriptor.kind {
        PayloadKind::Empty => WireWriter::new(),
        PayloadKind::Fixed(size) => WireWriter::with_capacity(size),
        PayloadKind::Variable => WireWriter::new(),
    };

    match (code, payload) {
        (
            RequestIntrinsics | RequestPdmStatus | ShutdownPdm | RestartPdm
            | BeginSendingCandidates | DoneSendingCandidates | BeginSendingSignals
            | DoneSendingSignals | BeginSendingCwCoherentSignals
            | DoneSendingCwCoherentSignals | BeginSendingCandidateResults
            | DoneSendingCandidateResults | BeginSendingFollowUpSignals
            | DoneSendingFollowUpSignals | BeginSendingArchiveComplexAmplitudes
            | DoneSendingArchiveComplexAmplitudes | BeginSendingBadBands
            | DoneSendingBadBands,
            Payload::Empty,
        ) => {}

        (SendIntrinsics, Payload::Intrinsics(v)) => v.encode(&mut w)?,
        (ConfigurePdm, Payload::Configuration(v)) => v.encode(&mut w)?,
        (SendPdmStatus, Payload::Status(v)) => v.encode(&mut w)?,
        (SendPdmActivityParameters, Payload::ActivityParameters(v)) => v.encode(&mut w)?,
        (PdmTuned, Payload::Tuned(v)) => v.encode(&mut w)?,
        (PdmScienceDataRequest, Payload::ScienceDataRequest(v)) => v.encode(&mut w)?,
        (StartTime, Payload::StartTime(v)) => v.encode(&mut w)?,
        (
            BaselineInitAccumStarted | BaselineInitAccumComplete | DataCollectionStarted
            | DataCollectionComplete | SignalDetectionStarted | SignalDetectionComplete
            | PdmActivityComplete,
            Payload::ActivityStatus(v),
        ) => v.encode(&mut w)?,
        (SendCandidateCwPowerSignal | SendCwPowerSignal, Payload::CwPowerSignal(v)) => {
            v.encode(&mut w)?
        }
        (
            SendCwCoherentSignal | SendCwCoherentCandidateResult,
            Payload::CwCoherentSignal(v),
        ) => v.encode(&mut w)?,
        (SendFollowUpCwSignal, Payload::FollowUpCwSignal(v)) => v.encode(&mut w)?,
        (SendFollowUpPulseSignal, Payload::FollowUpPulseSignal(v)) => v.encode(&mut w)?,
        (
            RequestArchiveData | DiscardArchiveData | ArchiveSignal | ArchiveComplete,
            Payload::ArchiveRequest(v),
        ) => v.encode(&mut w)?,
        (SendPdmMessage, Payload::Message(v)) => v.encode(&mut w)?,
        (StopPdmActivity, Payload::Count(v)) => v.encode(&mut w)?,
        (SendBaselineStatistics, Payload::BaselineStatistics(v)) => v.encode(&mut w)?,
        (
            BaselineWarningLimitsExceeded | BaselineErrorLimitsExceeded,
            Payload::BaselineLimitsExceeded(v),
        ) => v.encode(&mut w)?,
        (SendPulseBadBand, Payload::PulseBadBand(v)) => v.encode(&mut w)?,
        (SendCwBadBand, Payload::CwBadBand(v)) => v.encode(&mut w)?,

        (
            PermRfiMask | BirdieMask | RcvrBirdieMask | TestSignalMask,
            Payload::FrequencyMask(v),
        ) => VariableCodec::encode(v, &mut w)?,
        (RecentRfiMask, Payload::RecentRfiMask(v)) => VariableCodec::encode(v, &mut w)?,
        (SendBaseline, Payload::Baseline(v)) => VariableCodec::encode(v, &mut w)?,
        (SendComplexAmplitudes, Payload::ComplexAmplitudes(v)) => {
            VariableCodec::encode(v, &mut w)?
        }
        (
            SendCandidatePulseSignal | SendPulseSignal | SendPulseCandidateResult,
            Payload::PulseSignal(v),
        ) => VariableCodec::encode(v, &mut w)?,
        (SendArchiveComplexAmplitudes, Payload::ArchiveData(v)) => {
            VariableCodec::encode(v, &mut w)?
        }

        _ => return Err(WireError::PayloadMismatch { code }),
    }
    Ok(w.into_bytes())
}

/// Decode a complete frame: leading 32-bit code, then the payload.
///
/// Returns the code, the decoded payload, and the number of bytes the
/// frame consumed; trailing bytes are left for the caller.
pub fn decode_frame(bytes: &[u8]) -> WireResult<(PdmMessageCode, Payload, usize)> {
    let mut r = WireReader::new(bytes);
    let raw = r.read_i32("message_code")?;
    let code = PdmMessageCode::try_from(raw).map_err(|_| {
        warn!(raw, "rejected frame with unknown message code");
        WireError::UnknownMessageCode { raw }
    })?;
    if !code.is_valid_frame_code() {
        warn!(raw, "rejected frame with sentinel message code");
        return Err(WireError::UnknownMessageCode { raw });
    }

    // The payload gets its own cursor so its position after decoding is
    // exactly the payload length, whatever the shape.
    let mut payload_reader = WireReader::new(&bytes[4..]);
    let payload = decode_payload_from(code, &mut payload_reader)?;
    Ok((code, payload, 4 + payload_reader.position()))
}

/// Encode a complete frame: leading code word, then the payload bytes.
pub fn encode_frame(code: PdmMessageCode, payload: &Payload) -> WireResult<Vec<u8>> {
    let body = encode_payload(code, payload)?;
    let mut w = WireWriter::with_capacity(4 + body.len());
    w.write_i32(code.into());
    w.write_bytes(&body);
    Ok(w.into_bytes())
}
