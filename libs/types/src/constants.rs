//! # Protocol Constants - SSE-PDM Interface Core Constants
//!
//! ## Purpose
//!
//! Central registry of protocol-level constants shared by the SSE controller
//! and the PDM instrument. These values define wire-level capacities and the
//! message code range and must remain stable for backward compatibility with
//! deployed peers and archived data.
//!
//! ## Integration Points
//!
//! - **Fixed Payloads**: text/array capacities fix every struct's wire size
//! - **Variable Payloads**: per-message element-count ceilings bound decode
//!   allocation from untrusted input
//! - **Message Registry**: `PDM_CODE_RANGE_START` anchors the closed code
//!   enumeration

/// Interface version exchanged in `HereIAm` / `ThereYouAre` and reported in
/// `PdmIntrinsics`. Peers with differing version strings must not proceed.
pub const SSE_PDM_INTERFACE_VERSION: &str =
    "SSE-PDM Interface Version 1.130 2010-Jan-14  0:39:37 UTC";

/// First value of the PDM message code range. Codes below this value belong
/// to other subsystem interfaces sharing the same controller.
pub const PDM_CODE_RANGE_START: i32 = 10000;

/// Capacity of every fixed text field, terminator included.
pub const MAX_TEXT_STRING: usize = 64;

/// Capacity of the free-form text in an `NssMessage`, terminator included.
pub const MAX_NSS_MESSAGE_STRING: usize = 256;

/// Capacity of a dotted-quad IP address field, terminator included.
pub const MAX_IP_ADDR_STRING: usize = 16;

/// Number of pulse detection resolutions (1 Hz - 1024 Hz).
pub const MAX_RESOLUTIONS: usize = 11;

/// Trailing-array capacity of the deprecated fixed-length `LegacyBaseline`.
pub const MAX_BASELINE_SUBBANDS: usize = 4096;

/// Complex samples per subband per half frame at 1 Hz resolution.
pub const MAX_SUBBAND_BINS_PER_1HZ_HALF_FRAME: usize = 1024;

/// Complex samples per subband per half frame at 1 KHz resolution.
pub const MAX_SUBBAND_BINS_PER_1KHZ_HALF_FRAME: usize = 512;

/// Concurrent activities a PDM tracks (one observing, one pending).
pub const MAX_PDM_ACTIVITIES: usize = 2;

/// Coherent segments embedded in a `CwCoherentSignal`.
pub const MAX_CW_COHERENT_SEGMENTS: usize = 8;

/// Element-count ceiling for frequency-mask band arrays.
pub const MAX_FREQ_MASK_BANDS: usize = 4096;

/// Element-count ceiling for the pulse array of a pulse signal.
pub const MAX_PULSES_PER_TRAIN: usize = 4096;

/// Element-count ceiling for complex-amplitude subband arrays. Bounds the
/// largest message on the wire to ~2 MiB of coefficient data.
pub const MAX_COMPAMP_SUBBANDS: usize = 4096;
