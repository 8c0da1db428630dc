//! # Fixed Payload Codec
//!
//! ## Purpose
//!
//! `WireCodec` implementations for every fixed-size structure of the
//! SSE-PDM interface. Fields are encoded strictly in declaration order of
//! the interface definition, and every alignment padding field the
//! interface declares is written as a real 4-byte zero run: padding is
//! wire contract, and dropping it breaks byte-exactness with any peer.
//!
//! Fixed embedded arrays (coherent segments, per-resolution pulse
//! parameters, the activity status pair) always occupy their full declared
//! capacity; a sibling count field never shrinks a fixed array. That
//! inference rule belongs exclusively to the variable-length codec.
//!
//! Nested structures encode recursively through their own implementation;
//! there is no shared base type or dynamic dispatch because the message
//! registry selects the concrete type from the message code.

use pdm_types::activity::{
    BaselineLimits, Count, PdmActivityParameters, PdmActivityStatus, PdmOperations,
    PdmScienceDataRequest, PdmStatus, PdmTuned, PulseParameters, StartActivity,
};
use pdm_types::baseline::{BaselineHeader, BaselineLimitsExceededDetails, BaselineStatistics};
use pdm_types::common::{NssMessage, Polarization};
use pdm_types::compamp::{ArchiveDataHeader, ArchiveRequest, ComplexAmplitudeHeader};
use pdm_types::config::{HereIAm, PdmBaseAddr, PdmConfiguration, PdmIntrinsics, ThereYouAre};
use pdm_types::constants::{
    MAX_CW_COHERENT_SEGMENTS, MAX_IP_ADDR_STRING, MAX_NSS_MESSAGE_STRING, MAX_PDM_ACTIVITIES,
    MAX_RESOLUTIONS, MAX_TEXT_STRING,
};
use pdm_types::mask::{FrequencyBand, FrequencyMaskHeader, RecentRfiMaskHeader};
use pdm_types::signal::{
    ConfirmationStats, CwBadBand, CwCoherentSegment, CwCoherentSignal, CwPowerSignal,
    DetectionStatistics, FollowUpCwSignal, FollowUpPulseSignal, FollowUpSignal, Pulse,
    PulseBadBand, PulseSignalHeader, PulseTrainDescription, SignalDescription, SignalId,
    SignalPath,
};

use crate::error::{WireError, WireResult};
use crate::wire::{WireReader, WireWriter};

/// Encode/decode pair for a fixed-size wire structure.
///
/// `WIRE_SIZE` is the exact byte footprint, padding included; encoding a
/// value always produces exactly that many bytes.
pub trait WireCodec: Sized {
    const WIRE_SIZE: usize;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()>;
    fn decode(r: &mut WireReader<'_>) -> WireResult<Self>;

    /// Encode into a fresh buffer.
    fn to_wire(&self) -> WireResult<Vec<u8>> {
        let mut w = WireWriter::with_capacity(Self::WIRE_SIZE);
        self.encode(&mut w)?;
        Ok(w.into_bytes())
    }

    /// Decode from the front of a buffer, ignoring any trailing bytes.
    fn from_wire(bytes: &[u8]) -> WireResult<Self> {
        Self::decode(&mut WireReader::new(bytes))
    }
}

/// Wire footprint of an `NssDate` (tv_sec + tv_usec).
pub const NSS_DATE_WIRE_SIZE: usize = 8;

impl WireCodec for HereIAm {
    const WIRE_SIZE: usize = MAX_TEXT_STRING;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_text(
            "interface_version_number",
            &self.interface_version_number,
            MAX_TEXT_STRING,
        )
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            interface_version_number: r.read_text("interface_version_number", MAX_TEXT_STRING)?,
        })
    }
}

impl WireCodec for ThereYouAre {
    const WIRE_SIZE: usize = MAX_IP_ADDR_STRING + 4 + MAX_TEXT_STRING;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_text("sse_ip", &self.sse_ip, MAX_IP_ADDR_STRING)?;
        w.write_i32(self.port_id);
        w.write_text(
            "interface_version_number",
            &self.interface_version_number,
            MAX_TEXT_STRING,
        )
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            sse_ip: r.read_text("sse_ip", MAX_IP_ADDR_STRING)?,
            port_id: r.read_i32("port_id")?,
            interface_version_number: r.read_text("interface_version_number", MAX_TEXT_STRING)?,
        })
    }
}

impl WireCodec for PdmBaseAddr {
    const WIRE_SIZE: usize = MAX_IP_ADDR_STRING + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_text("addr", &self.addr, MAX_IP_ADDR_STRING)?;
        w.write_i32(self.port);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            addr: r.read_text("addr", MAX_IP_ADDR_STRING)?,
            port: r.read_i32("port")?,
        })
    }
}

impl WireCodec for PdmIntrinsics {
    const WIRE_SIZE: usize = MAX_TEXT_STRING * 4
        + PdmBaseAddr::WIRE_SIZE
        + 4 // foldings
        + 4 // oversampling
        + MAX_TEXT_STRING // filter_name
        + 8 // hz_per_subband
        + 4 // max_subbands
        + 4 // serial_number
        + NSS_DATE_WIRE_SIZE * 3;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_text(
            "interface_version_number",
            &self.interface_version_number,
            MAX_TEXT_STRING,
        )?;
        w.write_text("pdm_name", &self.pdm_name, MAX_TEXT_STRING)?;
        w.write_text("pdm_host_name", &self.pdm_host_name, MAX_TEXT_STRING)?;
        w.write_text("pdm_code_version", &self.pdm_code_version, MAX_TEXT_STRING)?;
        self.channel_base.encode(w)?;
        w.write_i32(self.foldings);
        w.write_f32(self.oversampling);
        w.write_text("filter_name", &self.filter_name, MAX_TEXT_STRING)?;
        w.write_f64(self.hz_per_subband);
        w.write_i32(self.max_subbands);
        w.write_i32(self.serial_number);
        w.write_date(self.birdie_mask_date);
        w.write_date(self.rcvr_birdie_mask_date);
        w.write_date(self.perm_mask_date);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            interface_version_number: r.read_text("interface_version_number", MAX_TEXT_STRING)?,
            pdm_name: r.read_text("pdm_name", MAX_TEXT_STRING)?,
            pdm_host_name: r.read_text("pdm_host_name", MAX_TEXT_STRING)?,
            pdm_code_version: r.read_text("pdm_code_version", MAX_TEXT_STRING)?,
            channel_base: PdmBaseAddr::decode(r)?,
            foldings: r.read_i32("foldings")?,
            oversampling: r.read_f32("oversampling")?,
            filter_name: r.read_text("filter_name", MAX_TEXT_STRING)?,
            hz_per_subband: r.read_f64("hz_per_subband")?,
            max_subbands: r.read_i32("max_subbands")?,
            serial_number: r.read_i32("serial_number")?,
            birdie_mask_date: r.read_date("birdie_mask_date")?,
            rcvr_birdie_mask_date: r.read_date("rcvr_birdie_mask_date")?,
            perm_mask_date: r.read_date("perm_mask_date")?,
        })
    }
}

impl WireCodec for PdmConfiguration {
    // site, pdm_id, a2d_clockrate, archiver_hostname, archiver_port, align_pad
    const WIRE_SIZE: usize = 4 + 4 + 8 + MAX_TEXT_STRING + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_enum(self.site);
        w.write_i32(self.pdm_id);
        w.write_f64(self.a2d_clockrate);
        w.write_text("archiver_hostname", &self.archiver_hostname, MAX_TEXT_STRING)?;
        w.write_i32(self.archiver_port);
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let config = Self {
            site: r.read_enum("site")?,
            pdm_id: r.read_i32("pdm_id")?,
            a2d_clockrate: r.read_f64("a2d_clockrate")?,
            archiver_hostname: r.read_text("archiver_hostname", MAX_TEXT_STRING)?,
            archiver_port: r.read_i32("archiver_port")?,
        };
        r.skip_pad("align_pad")?;
        Ok(config)
    }
}

impl WireCodec for FrequencyBand {
    // center_freq, bandwidth, align_pad
    const WIRE_SIZE: usize = 8 + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64(self.center_freq);
        w.write_f32(self.bandwidth);
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let band = Self {
            center_freq: r.read_f64("center_freq")?,
            bandwidth: r.read_f32("bandwidth")?,
        };
        r.skip_pad("align_pad")?;
        Ok(band)
    }
}

impl WireCodec for FrequencyMaskHeader {
    // number_of_freq_bands, mask_version_date, align_pad, band_covered
    const WIRE_SIZE: usize = 4 + NSS_DATE_WIRE_SIZE + 4 + FrequencyBand::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i32(self.number_of_freq_bands);
        w.write_date(self.mask_version_date);
        w.write_pad();
        self.band_covered.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let number_of_freq_bands = r.read_i32("number_of_freq_bands")?;
        let mask_version_date = r.read_date("mask_version_date")?;
        r.skip_pad("align_pad")?;
        Ok(Self {
            number_of_freq_bands,
            mask_version_date,
            band_covered: FrequencyBand::decode(r)?,
        })
    }
}

impl WireCodec for RecentRfiMaskHeader {
    const WIRE_SIZE: usize = 4 + 4 + FrequencyBand::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i32(self.number_of_freq_bands);
        w.write_i32(self.excluded_target_id);
        self.band_covered.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            number_of_freq_bands: r.read_i32("number_of_freq_bands")?,
            excluded_target_id: r.read_i32("excluded_target_id")?,
            band_covered: FrequencyBand::decode(r)?,
        })
    }
}

impl WireCodec for PdmScienceDataRequest {
    const WIRE_SIZE: usize = 4 * 8 + 8;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_bool(self.send_baselines);
        w.write_bool(self.send_baseline_statistics);
        w.write_bool(self.check_baseline_warning_limits);
        w.write_bool(self.check_baseline_error_limits);
        w.write_i32(self.baseline_reporting_half_frames);
        w.write_bool(self.send_complex_amplitudes);
        w.write_enum(self.request_type);
        w.write_i32(self.subband);
        w.write_f64(self.rf_freq);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            send_baselines: r.read_bool("send_baselines")?,
            send_baseline_statistics: r.read_bool("send_baseline_statistics")?,
            check_baseline_warning_limits: r.read_bool("check_baseline_warning_limits")?,
            check_baseline_error_limits: r.read_bool("check_baseline_error_limits")?,
            baseline_reporting_half_frames: r.read_i32("baseline_reporting_half_frames")?,
            send_complex_amplitudes: r.read_bool("send_complex_amplitudes")?,
            request_type: r.read_enum("request_type")?,
            subband: r.read_i32("subband")?,
            rf_freq: r.read_f64("rf_freq")?,
        })
    }
}

impl WireCodec for PulseParameters {
    const WIRE_SIZE: usize = 8 * 3;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64(self.pulse_threshold);
        w.write_f64(self.triplet_threshold);
        w.write_f64(self.singlet_threshold);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            pulse_threshold: r.read_f64("pulse_threshold")?,
            triplet_threshold: r.read_f64("triplet_threshold")?,
            singlet_threshold: r.read_f64("singlet_threshold")?,
        })
    }
}

impl WireCodec for BaselineLimits {
    const WIRE_SIZE: usize = 4 * 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f32(self.mean_upper_bound);
        w.write_f32(self.mean_lower_bound);
        w.write_f32(self.std_dev_percent);
        w.write_f32(self.max_range);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            mean_upper_bound: r.read_f32("mean_upper_bound")?,
            mean_lower_bound: r.read_f32("mean_lower_bound")?,
            std_dev_percent: r.read_f32("std_dev_percent")?,
            max_range: r.read_f32("max_range")?,
        })
    }
}

impl WireCodec for PdmActivityParameters {
    const WIRE_SIZE: usize = 4 + 4 + 8 + 8 + 8 + 4 + 4 + 4 + 4 + 4 + 4 + 4
        + 4 // align_pad_1
        + 8 + 4 + 4 + 8 + 8 + 8 + 8 + 8 // CW block
        + 8 + 8 + 4 + 4 + 4 + 4 + 4 // pulse block scalars
        + 4 * MAX_RESOLUTIONS // request_pulse_resolution
        + PulseParameters::WIRE_SIZE * MAX_RESOLUTIONS
        + PdmScienceDataRequest::WIRE_SIZE
        + 4 + 4 + 4
        + BaselineLimits::WIRE_SIZE * 2
        + 4; // align_pad_2

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i32(self.activity_id);
        w.write_i32(self.data_collection_length);
        w.write_f64(self.rcvr_sky_freq);
        w.write_f64(self.ifc_sky_freq);
        w.write_f64(self.pdm_sky_freq);
        w.write_i32(self.channel_number);
        w.write_u32(self.operations.0);
        w.write_f32(self.sensitivity_ratio);
        w.write_i32(self.max_number_of_candidates);
        w.write_f32(self.clustering_freq_tolerance);
        w.write_f32(self.zero_drift_tolerance);
        w.write_f32(self.max_drift_rate_tolerance);
        w.write_pad();

        w.write_f64(self.bad_band_cw_path_limit);
        w.write_i32(self.cw_clustering_delta_freq);
        w.write_enum(self.dadd_resolution);
        w.write_f64(self.dadd_threshold);
        w.write_f64(self.cw_coherent_threshold);
        w.write_f64(self.secondary_cw_coherent_threshold);
        w.write_f64(self.secondary_pfa_margin);
        w.write_f64(self.limits_for_coherent_detection);

        w.write_f64(self.bad_band_pulse_triplet_limit);
        w.write_f64(self.bad_band_pulse_limit);
        w.write_i32(self.pulse_clustering_delta_freq);
        w.write_f32(self.pulse_train_signif_thresh);
        w.write_f32(self.secondary_pulse_train_signif_thresh);
        w.write_i32(self.max_pulses_per_half_frame);
        w.write_i32(self.max_pulses_per_subband_per_half_frame);
        for requested in &self.request_pulse_resolution {
            w.write_bool(*requested);
        }
        for params in &self.pd {
            params.encode(w)?;
        }

        self.science_data_request.encode(w)?;

        w.write_i32(self.baseline_subband_average);
        w.write_i32(self.baseline_init_accum_half_frames);
        w.write_f32(self.baseline_decay);
        self.baseline_warning_limits.encode(w)?;
        self.baseline_error_limits.encode(w)?;
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let activity_id = r.read_i32("activity_id")?;
        let data_collection_length = r.read_i32("data_collection_length")?;
        let rcvr_sky_freq = r.read_f64("rcvr_sky_freq")?;
        let ifc_sky_freq = r.read_f64("ifc_sky_freq")?;
        let pdm_sky_freq = r.read_f64("pdm_sky_freq")?;
        let channel_number = r.read_i32("channel_number")?;
        let operations = PdmOperations(r.read_u32("operations")?);
        let sensitivity_ratio = r.read_f32("sensitivity_ratio")?;
        let max_number_of_candidates = r.read_i32("max_number_of_candidates")?;
        let clustering_freq_tolerance = r.read_f32("clustering_freq_tolerance")?;
        let zero_drift_tolerance = r.read_f32("zero_drift_tolerance")?;
        let max_drift_rate_tolerance = r.read_f32("max_drift_rate_tolerance")?;
        r.skip_pad("align_pad_1")?;

        let bad_band_cw_path_limit = r.read_f64("bad_band_cw_path_limit")?;
        let cw_clustering_delta_freq = r.read_i32("cw_clustering_delta_freq")?;
        let dadd_resolution = r.read_enum("dadd_resolution")?;
        let dadd_threshold = r.read_f64("dadd_threshold")?;
        let cw_coherent_threshold = r.read_f64("cw_coherent_threshold")?;
        let secondary_cw_coherent_threshold = r.read_f64("secondary_cw_coherent_threshold")?;
        let secondary_pfa_margin = r.read_f64("secondary_pfa_margin")?;
        let limits_for_coherent_detection = r.read_f64("limits_for_coherent_detection")?;

        let bad_band_pulse_triplet_limit = r.read_f64("bad_band_pulse_triplet_limit")?;
        let bad_band_pulse_limit = r.read_f64("bad_band_pulse_limit")?;
        let pulse_clustering_delta_freq = r.read_i32("pulse_clustering_delta_freq")?;
        let pulse_train_signif_thresh = r.read_f32("pulse_train_signif_thresh")?;
        let secondary_pulse_train_signif_thresh =
            r.read_f32("secondary_pulse_train_signif_thresh")?;
        let max_pulses_per_half_frame = r.read_i32("max_pulses_per_half_frame")?;
        let max_pulses_per_subband_per_half_frame =
            r.read_i32("max_pulses_per_subband_per_half_frame")?;

        let mut request_pulse_resolution = [false; MAX_RESOLUTIONS];
        for slot in &mut request_pulse_resolution {
            *slot = r.read_bool("request_pulse_resolution")?;
        }
        let mut pd = [PulseParameters::default(); MAX_RESOLUTIONS];
        for slot in &mut pd {
            *slot = PulseParameters::decode(r)?;
        }

        let science_data_request = PdmScienceDataRequest::decode(r)?;

        let baseline_subband_average = r.read_i32("baseline_subband_average")?;
        let baseline_init_accum_half_frames = r.read_i32("baseline_init_accum_half_frames")?;
        let baseline_decay = r.read_f32("baseline_decay")?;
        let baseline_warning_limits = BaselineLimits::decode(r)?;
        let baseline_error_limits = BaselineLimits::decode(r)?;
        r.skip_pad("align_pad_2")?;

        Ok(Self {
            activity_id,
            data_collection_length,
            rcvr_sky_freq,
            ifc_sky_freq,
            pdm_sky_freq,
            channel_number,
            operations,
            sensitivity_ratio,
            max_number_of_candidates,
            clustering_freq_tolerance,
            zero_drift_tolerance,
            max_drift_rate_tolerance,
            bad_band_cw_path_limit,
            cw_clustering_delta_freq,
            dadd_resolution,
            dadd_threshold,
            cw_coherent_threshold,
            secondary_cw_coherent_threshold,
            secondary_pfa_margin,
            limits_for_coherent_detection,
            bad_band_pulse_triplet_limit,
            bad_band_pulse_limit,
            pulse_clustering_delta_freq,
            pulse_train_signif_thresh,
            secondary_pulse_train_signif_thresh,
            max_pulses_per_half_frame,
            max_pulses_per_subband_per_half_frame,
            request_pulse_resolution,
            pd,
            science_data_request,
            baseline_subband_average,
            baseline_init_accum_half_frames,
            baseline_decay,
            baseline_warning_limits,
            baseline_error_limits,
        })
    }
}

impl WireCodec for PdmTuned {
    const WIRE_SIZE: usize = 8 + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64(self.pdm_sky_freq);
        w.write_i32(self.data_collection_length);
        w.write_i32(self.data_collection_frames);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            pdm_sky_freq: r.read_f64("pdm_sky_freq")?,
            data_collection_length: r.read_i32("data_collection_length")?,
            data_collection_frames: r.read_i32("data_collection_frames")?,
        })
    }
}

impl WireCodec for StartActivity {
    const WIRE_SIZE: usize = NSS_DATE_WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_date(self.start_time);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            start_time: r.read_date("start_time")?,
        })
    }
}

impl WireCodec for SignalId {
    // pdm_number, activity_id, activity_start_time, number, align_pad_1
    const WIRE_SIZE: usize = 4 + 4 + NSS_DATE_WIRE_SIZE + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i32(self.pdm_number);
        w.write_i32(self.activity_id);
        w.write_date(self.activity_start_time);
        w.write_i32(self.number);
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let id = Self {
            pdm_number: r.read_i32("pdm_number")?,
            activity_id: r.read_i32("activity_id")?,
            activity_start_time: r.read_date("activity_start_time")?,
            number: r.read_i32("number")?,
        };
        r.skip_pad("align_pad_1")?;
        Ok(id)
    }
}

impl WireCodec for SignalPath {
    // rf_freq, drift, width, power, align_pad
    const WIRE_SIZE: usize = 8 + 4 + 4 + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64(self.rf_freq);
        w.write_f32(self.drift);
        w.write_f32(self.width);
        w.write_f32(self.power);
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let path = Self {
            rf_freq: r.read_f64("rf_freq")?,
            drift: r.read_f32("drift")?,
            width: r.read_f32("width")?,
            power: r.read_f32("power")?,
        };
        r.skip_pad("align_pad")?;
        Ok(path)
    }
}

impl WireCodec for SignalDescription {
    const WIRE_SIZE: usize =
        SignalPath::WIRE_SIZE + 4 + 4 + 4 + 4 + 4 + SignalId::WIRE_SIZE * 2 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.path.encode(w)?;
        w.write_enum(self.pol);
        w.write_enum(self.sig_class);
        w.write_enum(self.reason);
        w.write_i32(self.subband_number);
        w.write_bool(self.contains_bad_bands);
        self.signal_id.encode(w)?;
        self.orig_signal_id.encode(w)?;
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let sig = Self {
            path: SignalPath::decode(r)?,
            pol: r.read_enum("pol")?,
            sig_class: r.read_enum("sig_class")?,
            reason: r.read_enum("reason")?,
            subband_number: r.read_i32("subband_number")?,
            contains_bad_bands: r.read_bool("contains_bad_bands")?,
            signal_id: SignalId::decode(r)?,
            orig_signal_id: SignalId::decode(r)?,
        };
        r.skip_pad("align_pad")?;
        Ok(sig)
    }
}

impl WireCodec for CwPowerSignal {
    const WIRE_SIZE: usize = SignalDescription::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.sig.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            sig: SignalDescription::decode(r)?,
        })
    }
}

impl WireCodec for ConfirmationStats {
    const WIRE_SIZE: usize = 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f32(self.pfa);
        w.write_f32(self.snr);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            pfa: r.read_f32("pfa")?,
            snr: r.read_f32("snr")?,
        })
    }
}

impl WireCodec for CwCoherentSegment {
    const WIRE_SIZE: usize = SignalPath::WIRE_SIZE + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.path.encode(w)?;
        w.write_f32(self.pfa);
        w.write_f32(self.snr);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            path: SignalPath::decode(r)?,
            pfa: r.read_f32("pfa")?,
            snr: r.read_f32("snr")?,
        })
    }
}

impl WireCodec for CwCoherentSignal {
    // sig, cfm, n_segments, align_pad, segment[8] at full capacity
    const WIRE_SIZE: usize = SignalDescription::WIRE_SIZE
        + ConfirmationStats::WIRE_SIZE
        + 4
        + 4
        + CwCoherentSegment::WIRE_SIZE * MAX_CW_COHERENT_SEGMENTS;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        if self.n_segments < 0 || self.n_segments as usize > MAX_CW_COHERENT_SEGMENTS {
            return Err(WireError::InvalidCount {
                field: "n_segments",
                given: self.n_segments.max(0) as usize,
                max: MAX_CW_COHERENT_SEGMENTS,
            });
        }
        self.sig.encode(w)?;
        self.cfm.encode(w)?;
        w.write_i32(self.n_segments);
        w.write_pad();
        for segment in &self.segment {
            segment.encode(w)?;
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let sig = SignalDescription::decode(r)?;
        let cfm = ConfirmationStats::decode(r)?;
        let n_segments = r.read_i32("n_segments")?;
        if n_segments < 0 || n_segments as usize > MAX_CW_COHERENT_SEGMENTS {
            return Err(WireError::FieldOutOfRange {
                field: "n_segments",
                value: n_segments as i64,
            });
        }
        r.skip_pad("align_pad")?;
        let mut segment = [CwCoherentSegment::default(); MAX_CW_COHERENT_SEGMENTS];
        for slot in &mut segment {
            *slot = CwCoherentSegment::decode(r)?;
        }
        Ok(Self {
            sig,
            cfm,
            n_segments,
            segment,
        })
    }
}

impl WireCodec for Pulse {
    // rf_freq, power, align_pad, spectrum_number, bin_number, pol, align_pad_2
    const WIRE_SIZE: usize = 8 + 4 + 4 + 4 + 4 + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64(self.rf_freq);
        w.write_f32(self.power);
        w.write_pad();
        w.write_i32(self.spectrum_number);
        w.write_i32(self.bin_number);
        w.write_enum(self.pol);
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let rf_freq = r.read_f64("rf_freq")?;
        let power = r.read_f32("power")?;
        r.skip_pad("align_pad")?;
        let pulse = Self {
            rf_freq,
            power,
            spectrum_number: r.read_i32("spectrum_number")?,
            bin_number: r.read_i32("bin_number")?,
            pol: r.read_enum("pol")?,
        };
        r.skip_pad("align_pad_2")?;
        Ok(pulse)
    }
}

impl WireCodec for PulseTrainDescription {
    // pulse_period, number_of_pulses, res, align_pad
    const WIRE_SIZE: usize = 4 + 4 + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f32(self.pulse_period);
        w.write_i32(self.number_of_pulses);
        w.write_enum(self.res);
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let train = Self {
            pulse_period: r.read_f32("pulse_period")?,
            number_of_pulses: r.read_i32("number_of_pulses")?,
            res: r.read_enum("res")?,
        };
        r.skip_pad("align_pad")?;
        Ok(train)
    }
}

impl WireCodec for PulseSignalHeader {
    const WIRE_SIZE: usize = SignalDescription::WIRE_SIZE
        + ConfirmationStats::WIRE_SIZE
        + PulseTrainDescription::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.sig.encode(w)?;
        self.cfm.encode(w)?;
        self.train.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            sig: SignalDescription::decode(r)?,
            cfm: ConfirmationStats::decode(r)?,
            train: PulseTrainDescription::decode(r)?,
        })
    }
}

impl WireCodec for FollowUpSignal {
    const WIRE_SIZE: usize = 8 + 4 + 4 + SignalId::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64(self.rf_freq);
        w.write_f32(self.drift);
        w.write_enum(self.res);
        self.orig_signal_id.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            rf_freq: r.read_f64("rf_freq")?,
            drift: r.read_f32("drift")?,
            res: r.read_enum("res")?,
            orig_signal_id: SignalId::decode(r)?,
        })
    }
}

impl WireCodec for FollowUpCwSignal {
    const WIRE_SIZE: usize = FollowUpSignal::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.sig.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            sig: FollowUpSignal::decode(r)?,
        })
    }
}

impl WireCodec for FollowUpPulseSignal {
    const WIRE_SIZE: usize = FollowUpSignal::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.sig.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            sig: FollowUpSignal::decode(r)?,
        })
    }
}

impl WireCodec for DetectionStatistics {
    const WIRE_SIZE: usize = 4 * 17;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        for value in [
            self.total_candidates,
            self.cw_candidates,
            self.pulse_candidates,
            self.candidates_over_max,
            self.total_signals,
            self.cw_signals,
            self.pulse_signals,
            self.left_cw_hits,
            self.right_cw_hits,
            self.left_cw_clusters,
            self.right_cw_clusters,
            self.total_pulses,
            self.left_pulses,
            self.right_pulses,
            self.triplets,
            self.pulse_trains,
            self.pulse_clusters,
        ] {
            w.write_i32(value);
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            total_candidates: r.read_i32("total_candidates")?,
            cw_candidates: r.read_i32("cw_candidates")?,
            pulse_candidates: r.read_i32("pulse_candidates")?,
            candidates_over_max: r.read_i32("candidates_over_max")?,
            total_signals: r.read_i32("total_signals")?,
            cw_signals: r.read_i32("cw_signals")?,
            pulse_signals: r.read_i32("pulse_signals")?,
            left_cw_hits: r.read_i32("left_cw_hits")?,
            right_cw_hits: r.read_i32("right_cw_hits")?,
            left_cw_clusters: r.read_i32("left_cw_clusters")?,
            right_cw_clusters: r.read_i32("right_cw_clusters")?,
            total_pulses: r.read_i32("total_pulses")?,
            left_pulses: r.read_i32("left_pulses")?,
            right_pulses: r.read_i32("right_pulses")?,
            triplets: r.read_i32("triplets")?,
            pulse_trains: r.read_i32("pulse_trains")?,
            pulse_clusters: r.read_i32("pulse_clusters")?,
        })
    }
}

impl WireCodec for CwBadBand {
    // band, pol, paths, max_path_count, align_pad, max_path
    const WIRE_SIZE: usize = FrequencyBand::WIRE_SIZE + 4 + 4 + 4 + 4 + SignalPath::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.band.encode(w)?;
        w.write_enum(self.pol);
        w.write_i32(self.paths);
        w.write_i32(self.max_path_count);
        w.write_pad();
        self.max_path.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let band = FrequencyBand::decode(r)?;
        let pol = r.read_enum("pol")?;
        let paths = r.read_i32("paths")?;
        let max_path_count = r.read_i32("max_path_count")?;
        r.skip_pad("align_pad")?;
        Ok(Self {
            band,
            pol,
            paths,
            max_path_count,
            max_path: SignalPath::decode(r)?,
        })
    }
}

impl WireCodec for PulseBadBand {
    // band, res, pol, pulses, max_pulse_count, triplets, max_triplet_count,
    // too_many_triplets, align_pad
    const WIRE_SIZE: usize = FrequencyBand::WIRE_SIZE + 4 * 8;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.band.encode(w)?;
        w.write_enum(self.res);
        w.write_enum(self.pol);
        w.write_i32(self.pulses);
        w.write_i32(self.max_pulse_count);
        w.write_i32(self.triplets);
        w.write_i32(self.max_triplet_count);
        w.write_bool(self.too_many_triplets);
        w.write_pad();
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let band = FrequencyBand::decode(r)?;
        let badband = Self {
            band,
            res: r.read_enum("res")?,
            pol: r.read_enum("pol")?,
            pulses: r.read_i32("pulses")?,
            max_pulse_count: r.read_i32("max_pulse_count")?,
            triplets: r.read_i32("triplets")?,
            max_triplet_count: r.read_i32("max_triplet_count")?,
            too_many_triplets: r.read_bool("too_many_triplets")?,
        };
        r.skip_pad("align_pad")?;
        Ok(badband)
    }
}

impl WireCodec for BaselineHeader {
    const WIRE_SIZE: usize = 8 + 8 + 4 + 4 + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64(self.rf_center_freq);
        w.write_f64(self.bandwidth);
        w.write_i32(self.half_frame_number);
        w.write_i32(self.number_of_subbands);
        w.write_enum(self.pol);
        w.write_i32(self.activity_id);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            rf_center_freq: r.read_f64("rf_center_freq")?,
            bandwidth: r.read_f64("bandwidth")?,
            half_frame_number: r.read_i32("half_frame_number")?,
            number_of_subbands: r.read_i32("number_of_subbands")?,
            pol: r.read_enum("pol")?,
            activity_id: r.read_i32("activity_id")?,
        })
    }
}

impl WireCodec for BaselineStatistics {
    const WIRE_SIZE: usize = 4 + 4 + 4 + 4 + 8 + 8 + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f32(self.mean);
        w.write_f32(self.std_dev);
        w.write_f32(self.range);
        w.write_i32(self.half_frame_number);
        w.write_f64(self.rf_center_freq_mhz);
        w.write_f64(self.bandwidth_mhz);
        w.write_enum(self.pol);
        w.write_enum(self.status);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            mean: r.read_f32("mean")?,
            std_dev: r.read_f32("std_dev")?,
            range: r.read_f32("range")?,
            half_frame_number: r.read_i32("half_frame_number")?,
            rf_center_freq_mhz: r.read_f64("rf_center_freq_mhz")?,
            bandwidth_mhz: r.read_f64("bandwidth_mhz")?,
            pol: r.read_enum("pol")?,
            status: r.read_enum("status")?,
        })
    }
}

impl WireCodec for BaselineLimitsExceededDetails {
    const WIRE_SIZE: usize = 4 + MAX_NSS_MESSAGE_STRING;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_enum(self.pol);
        w.write_text("description", &self.description, MAX_NSS_MESSAGE_STRING)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            pol: r.read_enum::<Polarization>("pol")?,
            description: r.read_text("description", MAX_NSS_MESSAGE_STRING)?,
        })
    }
}

impl WireCodec for ComplexAmplitudeHeader {
    const WIRE_SIZE: usize = 8 + 4 + 4 + 8 + 4 + 4 + 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_f64(self.rf_center_freq);
        w.write_i32(self.half_frame_number);
        w.write_i32(self.activity_id);
        w.write_f64(self.hz_per_subband);
        w.write_i32(self.start_subband_id);
        w.write_i32(self.number_of_subbands);
        w.write_f32(self.over_sampling);
        w.write_enum(self.pol);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            rf_center_freq: r.read_f64("rf_center_freq")?,
            half_frame_number: r.read_i32("half_frame_number")?,
            activity_id: r.read_i32("activity_id")?,
            hz_per_subband: r.read_f64("hz_per_subband")?,
            start_subband_id: r.read_i32("start_subband_id")?,
            number_of_subbands: r.read_i32("number_of_subbands")?,
            over_sampling: r.read_f32("over_sampling")?,
            pol: r.read_enum("pol")?,
        })
    }
}

impl WireCodec for ArchiveRequest {
    const WIRE_SIZE: usize = SignalId::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.signal_id.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            signal_id: SignalId::decode(r)?,
        })
    }
}

impl WireCodec for ArchiveDataHeader {
    const WIRE_SIZE: usize = SignalId::WIRE_SIZE;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.signal_id.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            signal_id: SignalId::decode(r)?,
        })
    }
}

impl WireCodec for PdmActivityStatus {
    const WIRE_SIZE: usize = 4 + 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i32(self.activity_id);
        w.write_enum(self.current_state);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            activity_id: r.read_i32("activity_id")?,
            current_state: r.read_enum("current_state")?,
        })
    }
}

impl WireCodec for PdmStatus {
    // timestamp, number_of_activities, align_pad, act[MAX_PDM_ACTIVITIES]
    const WIRE_SIZE: usize =
        NSS_DATE_WIRE_SIZE + 4 + 4 + PdmActivityStatus::WIRE_SIZE * MAX_PDM_ACTIVITIES;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        if self.number_of_activities < 0
            || self.number_of_activities as usize > MAX_PDM_ACTIVITIES
        {
            return Err(WireError::InvalidCount {
                field: "number_of_activities",
                given: self.number_of_activities.max(0) as usize,
                max: MAX_PDM_ACTIVITIES,
            });
        }
        w.write_date(self.timestamp);
        w.write_i32(self.number_of_activities);
        w.write_pad();
        for status in &self.act {
            status.encode(w)?;
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let timestamp = r.read_date("timestamp")?;
        let number_of_activities = r.read_i32("number_of_activities")?;
        if number_of_activities < 0 || number_of_activities as usize > MAX_PDM_ACTIVITIES {
            return Err(WireError::FieldOutOfRange {
                field: "number_of_activities",
                value: number_of_activities as i64,
            });
        }
        r.skip_pad("align_pad")?;
        let mut act = [PdmActivityStatus::default(); MAX_PDM_ACTIVITIES];
        for slot in &mut act {
            *slot = PdmActivityStatus::decode(r)?;
        }
        Ok(Self {
            timestamp,
            number_of_activities,
            act,
        })
    }
}

impl WireCodec for Count {
    const WIRE_SIZE: usize = 4;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i32(self.count);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            count: r.read_i32("count")?,
        })
    }
}

impl WireCodec for NssMessage {
    const WIRE_SIZE: usize = 4 + 4 + MAX_NSS_MESSAGE_STRING;

    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        w.write_i32(self.code);
        w.write_enum(self.severity);
        w.write_text("description", &self.description, MAX_NSS_MESSAGE_STRING)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            code: r.read_i32("code")?,
            severity: r.read_enum("severity")?,
            description: r.read_text("description", MAX_NSS_MESSAGE_STRING)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdm_types::common::NssDate;
    use pdm_types::{Resolution, SignalClass, SignalClassReason};

    fn roundtrip<T: WireCodec + PartialEq + std::fmt::Debug>(value: &T) {
        let bytes = value.to_wire().unwrap();
        assert_eq!(bytes.len(), T::WIRE_SIZE, "wire size mismatch");
        let decoded = T::from_wire(&bytes).unwrap();
        assert_eq!(&decoded, value);
    }

    #[test]
    fn signal_id_wire_layout() {
        let id = SignalId {
            pdm_number: 7,
            activity_id: 1,
            activity_start_time: NssDate::new(0x01020304, 9),
            number: 2,
        };
        let bytes = id.to_wire().unwrap();
        assert_eq!(bytes.len(), 24);
        // Padding occupies the last four bytes and must be zero.
        assert_eq!(&bytes[20..], &[0, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[0x01, 0x02, 0x03, 0x04]);
        roundtrip(&id);
    }

    #[test]
    fn signal_description_is_96_bytes_with_zero_padding() {
        let mut sig = SignalDescription::default();
        sig.subband_number = 3;
        let bytes = sig.to_wire().unwrap();
        assert_eq!(bytes.len(), 96);
        assert_eq!(SignalDescription::WIRE_SIZE, 96);
        // Only subband_number (offset 36) is non-zero in an otherwise
        // defaulted struct.
        for (i, b) in bytes.iter().enumerate() {
            if (36..40).contains(&i) {
                continue;
            }
            assert_eq!(*b, 0, "unexpected non-zero byte at offset {i}");
        }
        assert_eq!(&bytes[36..40], &[0, 0, 0, 3]);
    }

    #[test]
    fn coherent_signal_always_carries_full_segment_array() {
        let mut sig = CwCoherentSignal::default();
        sig.n_segments = 2;
        sig.segment[0].snr = 10.0;
        let bytes = sig.to_wire().unwrap();
        assert_eq!(bytes.len(), CwCoherentSignal::WIRE_SIZE);
        assert_eq!(CwCoherentSignal::WIRE_SIZE, 368);
        roundtrip(&sig);
    }

    #[test]
    fn coherent_signal_rejects_segment_count_over_capacity() {
        let mut sig = CwCoherentSignal::default();
        sig.n_segments = 9;
        assert!(matches!(
            sig.to_wire(),
            Err(WireError::InvalidCount { field: "n_segments", .. })
        ));

        let mut good = CwCoherentSignal::default();
        good.n_segments = 8;
        let mut bytes = good.to_wire().unwrap();
        // Corrupt the count in place: n_segments sits after sig + cfm.
        let off = SignalDescription::WIRE_SIZE + ConfirmationStats::WIRE_SIZE;
        bytes[off..off + 4].copy_from_slice(&9i32.to_be_bytes());
        assert!(matches!(
            CwCoherentSignal::from_wire(&bytes),
            Err(WireError::FieldOutOfRange { field: "n_segments", .. })
        ));
    }

    #[test]
    fn activity_parameters_round_trip() {
        let mut params = PdmActivityParameters::default();
        params.activity_id = 17;
        params.pdm_sky_freq = 1420.405751;
        params.dadd_resolution = Resolution::Res1Hz;
        params.operations = PdmOperations(0b1011);
        params.request_pulse_resolution[0] = true;
        params.request_pulse_resolution[10] = true;
        params.pd[3].pulse_threshold = 12.0;
        params.baseline_error_limits.max_range = 3.5;
        roundtrip(&params);
        assert_eq!(PdmActivityParameters::WIRE_SIZE, 552);
    }

    #[test]
    fn status_round_trip_and_count_domain() {
        let mut status = PdmStatus::default();
        status.number_of_activities = 1;
        status.act[0] = PdmActivityStatus {
            activity_id: 5,
            current_state: pdm_types::PdmActivityState::RunDc,
        };
        roundtrip(&status);

        status.number_of_activities = 3;
        assert!(matches!(
            status.to_wire(),
            Err(WireError::InvalidCount { .. })
        ));
    }

    #[test]
    fn intrinsics_round_trip() {
        let intrinsics = PdmIntrinsics {
            interface_version_number: pdm_types::SSE_PDM_INTERFACE_VERSION.to_string(),
            pdm_name: "pdm7".into(),
            pdm_host_name: "pdm7.example.org".into(),
            pdm_code_version: "r2.4".into(),
            channel_base: PdmBaseAddr {
                addr: "226.1.50.1".into(),
                port: 50000,
            },
            foldings: 7,
            oversampling: 25.0,
            filter_name: "LS256c1024f25o".into(),
            hz_per_subband: 533.333,
            max_subbands: 3072,
            serial_number: 42,
            birdie_mask_date: NssDate::new(1_262_304_000, 0),
            rcvr_birdie_mask_date: NssDate::default(),
            perm_mask_date: NssDate::default(),
        };
        roundtrip(&intrinsics);
        assert_eq!(PdmIntrinsics::WIRE_SIZE, 388);
    }

    #[test]
    fn signal_payload_with_classification_round_trips() {
        let mut cw = CwPowerSignal::default();
        cw.sig.sig_class = SignalClass::Cand;
        cw.sig.reason = SignalClassReason::PassedPowerThresh;
        cw.sig.path.rf_freq = 1420.0;
        cw.sig.signal_id.number = 12;
        roundtrip(&cw);
    }

    #[test]
    fn detection_statistics_are_seventeen_counters() {
        let mut stats = DetectionStatistics::default();
        stats.total_candidates = 14;
        stats.pulse_clusters = 3;
        let bytes = stats.to_wire().unwrap();
        assert_eq!(bytes.len(), 68);
        assert_eq!(&bytes[..4], &[0, 0, 0, 14]);
        assert_eq!(&bytes[64..], &[0, 0, 0, 3]);
        roundtrip(&stats);
    }

    #[test]
    fn handshake_structures_round_trip() {
        let hello = HereIAm {
            interface_version_number: pdm_types::SSE_PDM_INTERFACE_VERSION.to_string(),
        };
        roundtrip(&hello);
        assert_eq!(HereIAm::WIRE_SIZE, 64);

        let reply = ThereYouAre {
            sse_ip: "192.168.1.17".into(),
            port_id: 8877,
            interface_version_number: hello.interface_version_number.clone(),
        };
        roundtrip(&reply);
        assert_eq!(ThereYouAre::WIRE_SIZE, 84);

        // A dotted quad at full textual length still leaves room for the
        // terminator; one byte more does not.
        let mut overlong = reply.clone();
        overlong.sse_ip = "255.255.255.2550".into();
        assert!(matches!(
            overlong.to_wire(),
            Err(WireError::FieldOutOfRange { field: "sse_ip", .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_left_unread() {
        let tuned = PdmTuned {
            pdm_sky_freq: 1420.0,
            data_collection_length: 98,
            data_collection_frames: 49,
        };
        let mut bytes = tuned.to_wire().unwrap();
        bytes.extend_from_slice(&[0xaa; 7]);
        let mut r = WireReader::new(&bytes);
        let decoded = PdmTuned::decode(&mut r).unwrap();
        assert_eq!(decoded, tuned);
        assert_eq!(r.position(), PdmTuned::WIRE_SIZE);
        assert_eq!(r.remaining(), 7);
    }
}
