//! # Variable-Length Payload Codec
//!
//! ## Purpose
//!
//! Header-plus-array payloads: a fixed header declares an element count,
//! followed on the wire by exactly that many fixed-size elements with no
//! gap between them.
//!
//! The count field is untrusted input. Decode checks it against the
//! documented maximum for the payload *before* reading or allocating a
//! single element ([`WireError::OversizedPayload`]); encode stamps the
//! header count from the supplied element sequence and rejects a sequence
//! over the maximum ([`WireError::InvalidCount`]).
//!
//! The deprecated fixed-capacity forms ([`LegacyBaseline`],
//! [`LegacyComplexAmplitudes`]) keep their legacy byte-for-byte layout:
//! the trailing array is physically full capacity, only the first `count`
//! slots are data, and the rest travel as zero fill.

use pdm_types::baseline::{Baseline, BaselineHeader, LegacyBaseline};
use pdm_types::compamp::{
    ArchiveData, ArchiveDataHeader, ComplexAmplitudeHeader, ComplexAmplitudes,
    LegacyComplexAmplitudes, SubbandCoef1KHz,
};
use pdm_types::constants::{
    MAX_BASELINE_SUBBANDS, MAX_COMPAMP_SUBBANDS, MAX_FREQ_MASK_BANDS, MAX_PULSES_PER_TRAIN,
};
use pdm_types::mask::{
    FrequencyBand, FrequencyMask, FrequencyMaskHeader, RecentRfiMask, RecentRfiMaskHeader,
};
use pdm_types::signal::{Pulse, PulseSignal, PulseSignalHeader};

use tracing::warn;

use crate::error::{WireError, WireResult};
use crate::fixed::WireCodec;
use crate::packed::{decode_coef_block, encode_coef_block};
use crate::wire::{WireReader, WireWriter};

fn check_encode_count(field: &'static str, given: usize, max: usize) -> WireResult<i32> {
    if given > max {
        return Err(WireError::InvalidCount { field, given, max });
    }
    Ok(given as i32)
}

fn check_decode_count(field: &'static str, declared: i32, max: usize) -> WireResult<usize> {
    if declared < 0 || declared as usize > max {
        warn!(field, declared, max, "rejected oversized element count");
        return Err(WireError::OversizedPayload {
            field,
            declared: declared as i64,
            max,
        });
    }
    Ok(declared as usize)
}

/// Variable-length payloads implement encode/decode directly; there is no
/// `WIRE_SIZE` constant because the footprint depends on the element count.
pub trait VariableCodec: Sized {
    fn encode(&self, w: &mut WireWriter) -> WireResult<()>;
    fn decode(r: &mut WireReader<'_>) -> WireResult<Self>;

    fn to_wire(&self) -> WireResult<Vec<u8>> {
        let mut w = WireWriter::new();
        self.encode(&mut w)?;
        Ok(w.into_bytes())
    }

    fn from_wire(bytes: &[u8]) -> WireResult<Self> {
        Self::decode(&mut WireReader::new(bytes))
    }
}

impl VariableCodec for FrequencyMask {
    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        let count = check_encode_count("number_of_freq_bands", self.bands.len(), MAX_FREQ_MASK_BANDS)?;
        let header = FrequencyMaskHeader {
            number_of_freq_bands: count,
            ..self.header
        };
        header.encode(w)?;
        for band in &self.bands {
            band.encode(w)?;
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let header = FrequencyMaskHeader::decode(r)?;
        let count =
            check_decode_count("number_of_freq_bands", header.number_of_freq_bands, MAX_FREQ_MASK_BANDS)?;
        let mut bands = Vec::with_capacity(count);
        for _ in 0..count {
            bands.push(FrequencyBand::decode(r)?);
        }
        Ok(Self { header, bands })
    }
}

impl VariableCodec for RecentRfiMask {
    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        let count = check_encode_count("number_of_freq_bands", self.bands.len(), MAX_FREQ_MASK_BANDS)?;
        let header = RecentRfiMaskHeader {
            number_of_freq_bands: count,
            ..self.header
        };
        header.encode(w)?;
        for band in &self.bands {
            band.encode(w)?;
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let header = RecentRfiMaskHeader::decode(r)?;
        let count =
            check_decode_count("number_of_freq_bands", header.number_of_freq_bands, MAX_FREQ_MASK_BANDS)?;
        let mut bands = Vec::with_capacity(count);
        for _ in 0..count {
            bands.push(FrequencyBand::decode(r)?);
        }
        Ok(Self { header, bands })
    }
}

impl VariableCodec for Baseline {
    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        let count =
            check_encode_count("number_of_subbands", self.values.len(), MAX_BASELINE_SUBBANDS)?;
        let header = BaselineHeader {
            number_of_subbands: count,
            ..self.header
        };
        header.encode(w)?;
        for value in &self.values {
            w.write_f32(*value);
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let header = BaselineHeader::decode(r)?;
        let count =
            check_decode_count("number_of_subbands", header.number_of_subbands, MAX_BASELINE_SUBBANDS)?;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(r.read_f32("baseline_value")?);
        }
        Ok(Self { header, values })
    }
}

impl VariableCodec for ComplexAmplitudes {
    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        let count =
            check_encode_count("number_of_subbands", self.subbands.len(), MAX_COMPAMP_SUBBANDS)?;
        let header = ComplexAmplitudeHeader {
            number_of_subbands: count,
            ..self.header
        };
        header.encode(w)?;
        for block in &self.subbands {
            encode_coef_block(block, w);
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let header = ComplexAmplitudeHeader::decode(r)?;
        let count =
            check_decode_count("number_of_subbands", header.number_of_subbands, MAX_COMPAMP_SUBBANDS)?;
        let mut subbands = Vec::with_capacity(count);
        for _ in 0..count {
            subbands.push(decode_coef_block(r)?);
        }
        Ok(Self { header, subbands })
    }
}

impl VariableCodec for PulseSignal {
    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        let count =
            check_encode_count("number_of_pulses", self.pulses.len(), MAX_PULSES_PER_TRAIN)?;
        let mut header = self.header;
        header.train.number_of_pulses = count;
        header.encode(w)?;
        for pulse in &self.pulses {
            pulse.encode(w)?;
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let header = PulseSignalHeader::decode(r)?;
        let count =
            check_decode_count("number_of_pulses", header.train.number_of_pulses, MAX_PULSES_PER_TRAIN)?;
        let mut pulses = Vec::with_capacity(count);
        for _ in 0..count {
            pulses.push(Pulse::decode(r)?);
        }
        Ok(Self { header, pulses })
    }
}

impl VariableCodec for ArchiveData {
    // The subband count lives in the embedded complex amplitude header, not
    // in the archive header.
    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.header.encode(w)?;
        self.compamps.encode(w)
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            header: ArchiveDataHeader::decode(r)?,
            compamps: ComplexAmplitudes::decode(r)?,
        })
    }
}

impl VariableCodec for LegacyBaseline {
    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        check_encode_count(
            "number_of_subbands",
            self.header.number_of_subbands.max(0) as usize,
            MAX_BASELINE_SUBBANDS,
        )?;
        self.header.encode(w)?;
        for value in self.baseline_values.iter() {
            w.write_f32(*value);
        }
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        let header = BaselineHeader::decode(r)?;
        check_decode_count("number_of_subbands", header.number_of_subbands, MAX_BASELINE_SUBBANDS)?;
        let mut baseline_values = Box::new([0.0f32; MAX_BASELINE_SUBBANDS]);
        for slot in baseline_values.iter_mut() {
            *slot = r.read_f32("baseline_value")?;
        }
        Ok(Self {
            header,
            baseline_values,
        })
    }
}

impl VariableCodec for LegacyComplexAmplitudes {
    // Exactly one coefficient block follows the header, whatever the
    // header count says.
    fn encode(&self, w: &mut WireWriter) -> WireResult<()> {
        self.header.encode(w)?;
        encode_coef_block(&self.compamp, w);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> WireResult<Self> {
        Ok(Self {
            header: ComplexAmplitudeHeader::decode(r)?,
            compamp: decode_coef_block(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdm_types::common::NssDate;

    fn mask_with_bands(n: usize) -> FrequencyMask {
        FrequencyMask {
            header: FrequencyMaskHeader {
                number_of_freq_bands: 0, // stamped on encode
                mask_version_date: NssDate::new(1_000_000, 0),
                band_covered: FrequencyBand {
                    center_freq: 1420.0,
                    bandwidth: 20.0,
                },
            },
            bands: (0..n)
                .map(|i| FrequencyBand {
                    center_freq: 1419.0 + i as f64,
                    bandwidth: 0.5,
                })
                .collect(),
        }
    }

    #[test]
    fn mask_count_is_stamped_from_band_slice() {
        let mask = mask_with_bands(3);
        let bytes = mask.to_wire().unwrap();
        assert_eq!(
            bytes.len(),
            FrequencyMaskHeader::WIRE_SIZE + 3 * FrequencyBand::WIRE_SIZE
        );
        let decoded = FrequencyMask::from_wire(&bytes).unwrap();
        assert_eq!(decoded.header.number_of_freq_bands, 3);
        assert_eq!(decoded.bands, mask.bands);
    }

    #[test]
    fn empty_mask_round_trips() {
        let bytes = mask_with_bands(0).to_wire().unwrap();
        assert_eq!(bytes.len(), FrequencyMaskHeader::WIRE_SIZE);
        let decoded = FrequencyMask::from_wire(&bytes).unwrap();
        assert!(decoded.bands.is_empty());
    }

    #[test]
    fn oversized_declared_count_is_rejected_before_elements_are_read() {
        let mut mask = mask_with_bands(1);
        mask.header.number_of_freq_bands = 0;
        let mut bytes = mask.to_wire().unwrap();
        // Forge an absurd count in the header.
        bytes[..4].copy_from_slice(&1_000_000i32.to_be_bytes());
        assert_eq!(
            FrequencyMask::from_wire(&bytes).unwrap_err(),
            WireError::OversizedPayload {
                field: "number_of_freq_bands",
                declared: 1_000_000,
                max: pdm_types::MAX_FREQ_MASK_BANDS,
            }
        );

        // Negative counts are equally refused.
        bytes[..4].copy_from_slice(&(-1i32).to_be_bytes());
        assert!(matches!(
            FrequencyMask::from_wire(&bytes),
            Err(WireError::OversizedPayload { declared: -1, .. })
        ));
    }

    #[test]
    fn baseline_round_trips_at_max_capacity() {
        let baseline = Baseline {
            header: BaselineHeader {
                rf_center_freq: 1420.0,
                bandwidth: 2.0,
                half_frame_number: 12,
                number_of_subbands: 0,
                pol: pdm_types::Polarization::RightCircular,
                activity_id: 3,
            },
            values: (0..MAX_BASELINE_SUBBANDS).map(|i| i as f32).collect(),
        };
        let bytes = baseline.to_wire().unwrap();
        assert_eq!(
            bytes.len(),
            BaselineHeader::WIRE_SIZE + MAX_BASELINE_SUBBANDS * 4
        );
        let decoded = Baseline::from_wire(&bytes).unwrap();
        assert_eq!(decoded.header.number_of_subbands as usize, MAX_BASELINE_SUBBANDS);
        assert_eq!(decoded.values, baseline.values);
    }

    #[test]
    fn baseline_encode_rejects_overlong_value_slice() {
        let baseline = Baseline {
            header: BaselineHeader::default(),
            values: vec![0.0; MAX_BASELINE_SUBBANDS + 1],
        };
        assert!(matches!(
            baseline.to_wire(),
            Err(WireError::InvalidCount {
                field: "number_of_subbands",
                ..
            })
        ));
    }

    #[test]
    fn pulse_signal_carries_exactly_the_declared_pulses() {
        let signal = PulseSignal {
            header: PulseSignalHeader::default(),
            pulses: vec![
                Pulse {
                    rf_freq: 1420.1,
                    power: 9.5,
                    spectrum_number: 2,
                    bin_number: 77,
                    pol: pdm_types::Polarization::LeftCircular,
                },
                Pulse::default(),
            ],
        };
        let bytes = signal.to_wire().unwrap();
        assert_eq!(
            bytes.len(),
            PulseSignalHeader::WIRE_SIZE + 2 * Pulse::WIRE_SIZE
        );
        let decoded = PulseSignal::from_wire(&bytes).unwrap();
        assert_eq!(decoded.header.train.number_of_pulses, 2);
        assert_eq!(decoded.pulses, signal.pulses);
    }

    #[test]
    fn complex_amplitudes_round_trip() {
        let mut subband = SubbandCoef1KHz::default();
        subband.coef[5] = pdm_types::ComplexPair(0x7f);
        let compamps = ComplexAmplitudes {
            header: ComplexAmplitudeHeader {
                rf_center_freq: 1420.0,
                half_frame_number: 4,
                activity_id: 9,
                hz_per_subband: 533.333,
                start_subband_id: 100,
                number_of_subbands: 0,
                over_sampling: 25.0,
                pol: pdm_types::Polarization::Both,
            },
            subbands: vec![subband.clone(), SubbandCoef1KHz::default()],
        };
        let bytes = compamps.to_wire().unwrap();
        assert_eq!(bytes.len(), ComplexAmplitudeHeader::WIRE_SIZE + 2 * 512);
        let decoded = ComplexAmplitudes::from_wire(&bytes).unwrap();
        assert_eq!(decoded.header.number_of_subbands, 2);
        assert_eq!(decoded.subbands[0], subband);
    }

    #[test]
    fn archive_data_count_comes_from_embedded_header() {
        let archive = ArchiveData {
            header: ArchiveDataHeader::default(),
            compamps: ComplexAmplitudes {
                header: ComplexAmplitudeHeader::default(),
                subbands: vec![SubbandCoef1KHz::default(); 3],
            },
        };
        let bytes = archive.to_wire().unwrap();
        assert_eq!(
            bytes.len(),
            ArchiveDataHeader::WIRE_SIZE + ComplexAmplitudeHeader::WIRE_SIZE + 3 * 512
        );
        let decoded = ArchiveData::from_wire(&bytes).unwrap();
        assert_eq!(decoded.compamps.header.number_of_subbands, 3);
        assert_eq!(decoded.compamps.subbands.len(), 3);
    }

    #[test]
    fn legacy_baseline_is_full_capacity_on_the_wire() {
        let mut legacy = LegacyBaseline::default();
        legacy.header.number_of_subbands = 2;
        legacy.baseline_values[0] = 1.5;
        legacy.baseline_values[1] = 2.5;
        let bytes = legacy.to_wire().unwrap();
        assert_eq!(
            bytes.len(),
            BaselineHeader::WIRE_SIZE + MAX_BASELINE_SUBBANDS * 4
        );
        let decoded = LegacyBaseline::from_wire(&bytes).unwrap();
        assert_eq!(decoded, legacy);
        // Slots past the count travel as zero fill.
        assert_eq!(decoded.baseline_values[2], 0.0);
    }

    #[test]
    fn legacy_complex_amplitudes_always_carry_one_block() {
        let mut legacy = LegacyComplexAmplitudes::default();
        legacy.header.number_of_subbands = 1;
        legacy.compamp.coef[0] = pdm_types::ComplexPair(0x12);
        let bytes = legacy.to_wire().unwrap();
        assert_eq!(bytes.len(), ComplexAmplitudeHeader::WIRE_SIZE + 512);
        let decoded = LegacyComplexAmplitudes::from_wire(&bytes).unwrap();
        assert_eq!(decoded, legacy);
    }
}
