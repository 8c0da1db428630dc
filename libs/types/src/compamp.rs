//! Complex amplitude payloads: bit-packed I/Q spectral coefficients
//! shipped per subband, both as live science data and as archived data for
//! confirmed signals.
//!
//! `ComplexAmplitudes` is the current variable-length form.
//! [`LegacyComplexAmplitudes`] is the deprecated single-subband form kept
//! for byte-compatibility with older peers.

use crate::common::Polarization;
use crate::constants::MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME;
use crate::signal::SignalId;

/// One complex spectral coefficient: two signed 4-bit two's-complement
/// values in one byte, real in the high nibble, imaginary in the low.
///
/// Construction from signed components is the job of the packed-sample
/// codec in `pdm-codec`, which enforces the [-8, 7] range; this type only
/// carries the packed byte and sign-extends on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplexPair(pub u8);

impl ComplexPair {
    /// Real component, sign-extended from the high nibble.
    pub fn re(self) -> i8 {
        ((self.0 & 0xf0) as i8) >> 4
    }

    /// Imaginary component, sign-extended from the low nibble.
    pub fn im(self) -> i8 {
        (((self.0 << 4) as i8) >> 4) as i8
    }
}

/// One subband's coefficient block for a half frame at 1 KHz resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubbandCoef1KHz {
    #[cfg_attr(feature = "serde", serde(with = "serde_coef_block"))]
    pub coef: Box<[ComplexPair; MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME]>,
}

impl Default for SubbandCoef1KHz {
    fn default() -> Self {
        Self {
            coef: Box::new([ComplexPair::default(); MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME]),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_coef_block {
    use super::{ComplexPair, MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        v: &[ComplexPair; MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME],
        s: S,
    ) -> Result<S::Ok, S::Error> {
        v.as_slice().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Box<[ComplexPair; MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME]>, D::Error> {
        let v = Vec::<ComplexPair>::deserialize(d)?;
        let arr: [ComplexPair; MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME] = v
            .try_into()
            .map_err(|_| serde::de::Error::custom("wrong coefficient block length"))?;
        Ok(Box::new(arr))
    }
}

/// Header of a complex amplitude report; followed on the wire by
/// `number_of_subbands` [`SubbandCoef1KHz`] blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplexAmplitudeHeader {
    /// Center frequency of the first subband (MHz).
    pub rf_center_freq: f64,
    pub half_frame_number: i32,
    pub activity_id: i32,
    pub hz_per_subband: f64,
    pub start_subband_id: i32,
    pub number_of_subbands: i32,
    /// Percentage by which each subchannel is oversampled.
    pub over_sampling: f32,
    pub pol: Polarization,
}

/// Variable-length complex amplitude report.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplexAmplitudes {
    pub header: ComplexAmplitudeHeader,
    pub subbands: Vec<SubbandCoef1KHz>,
}

/// Deprecated single-subband complex amplitude form. Exactly one
/// coefficient block follows the header on the wire regardless of the
/// header count.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyComplexAmplitudes {
    pub header: ComplexAmplitudeHeader,
    pub compamp: SubbandCoef1KHz,
}

/// Ask the PDM to archive (or discard) complex amplitude data for a signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveRequest {
    pub signal_id: SignalId,
}

/// Identifies which signal an archive data response belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveDataHeader {
    pub signal_id: SignalId,
}

/// Archived complex amplitudes for one signal: the archive header followed
/// by a complete complex amplitude report, whose own header carries the
/// subband count.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArchiveData {
    pub header: ArchiveDataHeader,
    pub compamps: ComplexAmplitudes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complex_pair_sign_extends_both_nibbles() {
        let p = ComplexPair(0x7f); // re = 7, im = -1
        assert_eq!(p.re(), 7);
        assert_eq!(p.im(), -1);

        let p = ComplexPair(0x80); // re = -8, im = 0
        assert_eq!(p.re(), -8);
        assert_eq!(p.im(), 0);

        let p = ComplexPair(0x00);
        assert_eq!(p.re(), 0);
        assert_eq!(p.im(), 0);
    }
}
