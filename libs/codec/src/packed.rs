//! # Packed Sample Codec
//!
//! ## Purpose
//!
//! Bit packing for complex spectral coefficients. Each sample is one byte:
//! the real component in the high nibble, the imaginary in the low, both as
//! signed 4-bit two's complement. The representable range is [-8, 7];
//! values outside it are rejected, never clamped, since a silently saturated
//! coefficient would corrupt science data without a trace.

use pdm_types::compamp::{ComplexPair, SubbandCoef1KHz};
use pdm_types::constants::MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME;

use crate::error::{WireError, WireResult};
use crate::wire::{WireReader, WireWriter};

/// Inclusive packable range of one signed 4-bit component.
pub const SAMPLE_MIN: i32 = -8;
pub const SAMPLE_MAX: i32 = 7;

/// Pack a complex sample into one byte.
///
/// Either component outside [-8, 7] yields [`WireError::SampleOverflow`].
pub fn pack_sample(re: i32, im: i32) -> WireResult<ComplexPair> {
    if !(SAMPLE_MIN..=SAMPLE_MAX).contains(&re) || !(SAMPLE_MIN..=SAMPLE_MAX).contains(&im) {
        return Err(WireError::SampleOverflow { re, im });
    }
    Ok(ComplexPair(((re as u8) << 4) | ((im as u8) & 0x0f)))
}

/// Unpack a byte into its signed components.
pub fn unpack_sample(pair: ComplexPair) -> (i8, i8) {
    (pair.re(), pair.im())
}

/// Append one subband's coefficient block to the wire buffer.
pub fn encode_coef_block(block: &SubbandCoef1KHz, w: &mut WireWriter) {
    // ComplexPair is a transparent packed byte; the block is a straight
    // byte run with no endianness concerns.
    let mut bytes = [0u8; MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME];
    for (dst, pair) in bytes.iter_mut().zip(block.coef.iter()) {
        *dst = pair.0;
    }
    w.write_bytes(&bytes);
}

/// Read one subband's coefficient block from the wire.
pub fn decode_coef_block(r: &mut WireReader<'_>) -> WireResult<SubbandCoef1KHz> {
    let raw = r.read_bytes("coef", MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME)?;
    let mut block = SubbandCoef1KHz::default();
    for (dst, src) in block.coef.iter_mut().zip(raw) {
        *dst = ComplexPair(*src);
    }
    Ok(block)
}
