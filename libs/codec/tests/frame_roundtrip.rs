//! Frame-level encode/decode across the registry: every payload shape
//! travels through `encode_frame` / `decode_frame` the way a transport
//! would hand it over.

use pdm_codec::{decode_frame, encode_frame, Payload, WireCodec, WireError};
use pdm_types::{
    ArchiveRequest, Baseline, BaselineHeader, BaselineLimitsExceededDetails, ComplexAmplitudes,
    ComplexAmplitudeHeader, Count, CwBadBand, CwCoherentSignal, CwPowerSignal, FollowUpCwSignal,
    FrequencyBand, FrequencyMask, FrequencyMaskHeader, NssDate, NssMessage, NssMessageSeverity,
    PdmActivityParameters, PdmActivityState, PdmActivityStatus, PdmIntrinsics, PdmMessageCode,
    Polarization, PulseSignal, SignalClass, SignalClassReason, SignalId, SubbandCoef1KHz,
};

fn roundtrip(code: PdmMessageCode, payload: Payload) -> usize {
    let bytes = encode_frame(code, &payload).expect("encode");
    let (decoded_code, decoded, consumed) = decode_frame(&bytes).expect("decode");
    assert_eq!(decoded_code, code);
    assert_eq!(decoded, payload);
    assert_eq!(consumed, bytes.len());
    bytes.len()
}

#[test]
fn intrinsics_exchange() {
    roundtrip(PdmMessageCode::RequestIntrinsics, Payload::Empty);

    let mut intrinsics = PdmIntrinsics::default();
    intrinsics.interface_version_number = pdm_types::SSE_PDM_INTERFACE_VERSION.to_string();
    intrinsics.pdm_name = "pdm3".into();
    intrinsics.serial_number = 3;
    let len = roundtrip(
        PdmMessageCode::SendIntrinsics,
        Payload::Intrinsics(Box::new(intrinsics)),
    );
    assert_eq!(len, 4 + PdmIntrinsics::WIRE_SIZE);
}

#[test]
fn activity_parameters_frame_is_byte_stable() {
    let mut params = PdmActivityParameters::default();
    params.activity_id = 11;
    params.max_number_of_candidates = 8;
    params.request_pulse_resolution[2] = true;
    let payload = Payload::ActivityParameters(Box::new(params));

    let first = encode_frame(PdmMessageCode::SendPdmActivityParameters, &payload).unwrap();
    let second = encode_frame(PdmMessageCode::SendPdmActivityParameters, &payload).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4 + PdmActivityParameters::WIRE_SIZE);
    assert_eq!(hex::encode(&first[..4]), "0000271b"); // 10011
}

#[test]
fn frequency_mask_frame_with_trailing_bytes() {
    let mask = FrequencyMask {
        header: FrequencyMaskHeader {
            number_of_freq_bands: 0,
            mask_version_date: NssDate::new(1_500_000_000, 0),
            band_covered: FrequencyBand {
                center_freq: 1420.0,
                bandwidth: 40.0,
            },
        },
        bands: vec![
            FrequencyBand {
                center_freq: 1419.1,
                bandwidth: 0.2,
            },
            FrequencyBand {
                center_freq: 1420.2,
                bandwidth: 0.1,
            },
            FrequencyBand {
                center_freq: 1421.3,
                bandwidth: 0.4,
            },
        ],
    };
    let mut bytes = encode_frame(PdmMessageCode::PermRfiMask, &Payload::FrequencyMask(mask)).unwrap();
    // Header is 32 bytes, each band 16.
    assert_eq!(bytes.len(), 4 + 32 + 3 * 16);

    // A transport may hand over a buffer with the next frame already
    // appended; the decoder must stop at the payload end.
    let frame_len = bytes.len();
    bytes.extend_from_slice(&[0x55; 9]);
    let (code, payload, consumed) = decode_frame(&bytes).unwrap();
    assert_eq!(code, PdmMessageCode::PermRfiMask);
    assert_eq!(consumed, frame_len);
    match payload {
        Payload::FrequencyMask(decoded) => {
            assert_eq!(decoded.header.number_of_freq_bands, 3);
            assert_eq!(decoded.bands.len(), 3);
            assert_eq!(decoded.bands[2].bandwidth, 0.4);
        }
        other => panic!("wrong payload: {other:?}"),
    }
}

#[test]
fn science_data_frames() {
    let baseline = Baseline {
        header: BaselineHeader {
            rf_center_freq: 1420.0,
            bandwidth: 1.6,
            half_frame_number: 33,
            number_of_subbands: 3072,
            pol: Polarization::LeftCircular,
            activity_id: 4,
        },
        values: vec![0.5; 3072],
    };
    let len = roundtrip(PdmMessageCode::SendBaseline, Payload::Baseline(baseline));
    assert_eq!(len, 4 + BaselineHeader::WIRE_SIZE + 3072 * 4);

    let compamps = ComplexAmplitudes {
        header: ComplexAmplitudeHeader {
            rf_center_freq: 1420.0,
            half_frame_number: 33,
            activity_id: 4,
            hz_per_subband: 533.333,
            start_subband_id: 1024,
            number_of_subbands: 4,
            over_sampling: 25.0,
            pol: Polarization::RightCircular,
        },
        subbands: vec![SubbandCoef1KHz::default(); 4],
    };
    let len = roundtrip(
        PdmMessageCode::SendComplexAmplitudes,
        Payload::ComplexAmplitudes(compamps),
    );
    assert_eq!(len, 4 + ComplexAmplitudeHeader::WIRE_SIZE + 4 * 512);
}

#[test]
fn signal_report_frames() {
    let mut cw = CwPowerSignal::default();
    cw.sig.path.rf_freq = 1420.000123;
    cw.sig.pol = Polarization::Both;
    cw.sig.sig_class = SignalClass::Cand;
    cw.sig.reason = SignalClassReason::PassedPowerThresh;
    cw.sig.signal_id = SignalId {
        pdm_number: 3,
        activity_id: 11,
        activity_start_time: NssDate::new(1_600_000_000, 0),
        number: 0,
    };
    roundtrip(
        PdmMessageCode::SendCandidateCwPowerSignal,
        Payload::CwPowerSignal(cw),
    );

    let mut coherent = CwCoherentSignal::default();
    coherent.sig = cw.sig;
    coherent.sig.reason = SignalClassReason::PassedCoherentDetect;
    coherent.n_segments = 3;
    coherent.cfm.snr = 0.8;
    for (i, segment) in coherent.segment.iter_mut().take(3).enumerate() {
        segment.path.rf_freq = 1420.0 + i as f64 * 1e-6;
        segment.snr = 0.5;
    }
    roundtrip(
        PdmMessageCode::SendCwCoherentSignal,
        Payload::CwCoherentSignal(Box::new(coherent)),
    );

    let mut pulse = PulseSignal::default();
    pulse.header.sig = cw.sig;
    pulse.header.train.number_of_pulses = 5;
    pulse.pulses = vec![Default::default(); 5];
    roundtrip(PdmMessageCode::SendPulseSignal, Payload::PulseSignal(pulse));

    let mut follow_up = FollowUpCwSignal::default();
    follow_up.sig.rf_freq = 1420.1;
    follow_up.sig.orig_signal_id = cw.sig.signal_id;
    roundtrip(
        PdmMessageCode::SendFollowUpCwSignal,
        Payload::FollowUpCwSignal(follow_up),
    );

    let mut bad_band = CwBadBand::default();
    bad_band.band.center_freq = 1421.0;
    bad_band.paths = 900;
    roundtrip(PdmMessageCode::SendCwBadBand, Payload::CwBadBand(bad_band));
}

#[test]
fn archive_and_diagnostics_frames() {
    let request = ArchiveRequest {
        signal_id: SignalId {
            pdm_number: 3,
            activity_id: 11,
            activity_start_time: NssDate::new(1_600_000_000, 0),
            number: 7,
        },
    };
    for code in [
        PdmMessageCode::RequestArchiveData,
        PdmMessageCode::DiscardArchiveData,
        PdmMessageCode::ArchiveSignal,
        PdmMessageCode::ArchiveComplete,
    ] {
        roundtrip(code, Payload::ArchiveRequest(request));
    }

    roundtrip(
        PdmMessageCode::SendPdmMessage,
        Payload::Message(NssMessage {
            code: 204,
            severity: NssMessageSeverity::Warning,
            description: "baseline mean drifting".into(),
        }),
    );

    roundtrip(
        PdmMessageCode::BaselineWarningLimitsExceeded,
        Payload::BaselineLimitsExceeded(BaselineLimitsExceededDetails {
            pol: Polarization::LeftCircular,
            description: "mean above upper bound".into(),
        }),
    );

    roundtrip(
        PdmMessageCode::StopPdmActivity,
        Payload::Count(Count { count: 11 }),
    );
}

#[test]
fn lifecycle_status_frames() {
    for code in [
        PdmMessageCode::BaselineInitAccumStarted,
        PdmMessageCode::DataCollectionComplete,
        PdmMessageCode::PdmActivityComplete,
    ] {
        roundtrip(
            code,
            Payload::ActivityStatus(PdmActivityStatus {
                activity_id: 11,
                current_state: PdmActivityState::RunDc,
            }),
        );
    }
}

#[test]
fn truncated_frame_is_rejected_whole() {
    let mut cw = CwPowerSignal::default();
    cw.sig.subband_number = 5;
    let bytes = encode_frame(PdmMessageCode::SendCwPowerSignal, &Payload::CwPowerSignal(cw)).unwrap();
    let err = decode_frame(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(err, WireError::TruncatedInput { .. }));

    // Fewer than four bytes cannot even carry a code.
    assert!(matches!(
        decode_frame(&[0x27, 0x10]),
        Err(WireError::TruncatedInput {
            field: "message_code",
            ..
        })
    ));
}
