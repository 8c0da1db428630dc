//! # SSE-PDM Interface Types
//!
//! Payload structures, enumerations and constants for the point-to-point
//! binary protocol between a PDM (periodogram/power-detection instrument)
//! and its supervising SSE controller.
//!
//! ## Design Philosophy
//!
//! - **Pure data**: this crate holds wire shapes only. Encoding rules,
//!   the message registry, the activity lifecycle and classification
//!   legality all live in `pdm-codec`.
//! - **Closed enumerations**: every wire enum is `#[repr(i32)]` with
//!   `num_enum` checked conversion, so an out-of-range discriminant is a
//!   recoverable protocol error.
//! - **No marshalling artifacts**: alignment padding present on the wire
//!   is the codec's business and never appears as a struct field.
//!
//! ## Quick Start
//!
//! ```rust
//! use pdm_types::{CwPowerSignal, PdmMessageCode, SignalClass, SignalId};
//!
//! let mut signal = CwPowerSignal::default();
//! signal.sig.signal_id = SignalId { pdm_number: 7, activity_id: 42, ..Default::default() };
//! signal.sig.sig_class = SignalClass::Cand;
//! assert!(PdmMessageCode::SendCwPowerSignal.is_valid_frame_code());
//! ```

pub mod activity;
pub mod baseline;
pub mod class;
pub mod codes;
pub mod common;
pub mod compamp;
pub mod config;
pub mod constants;
pub mod mask;
pub mod signal;

// Re-export the full vocabulary at crate root for convenience.
pub use activity::{
    BaselineLimits, Count, PdmActivityParameters, PdmActivityState, PdmActivityStatus,
    PdmOperation, PdmOperations, PdmScienceDataRequest, PdmStatus, PdmTuned, PulseParameters,
    SciDataRequestType, StartActivity,
};
pub use baseline::{
    Baseline, BaselineHeader, BaselineLimitsExceededDetails, BaselineStatistics, BaselineStatus,
    LegacyBaseline,
};
pub use class::{SignalClass, SignalClassReason};
pub use codes::PdmMessageCode;
pub use common::{NssDate, NssMessage, NssMessageSeverity, Polarization, Resolution, SiteId};
pub use compamp::{
    ArchiveData, ArchiveDataHeader, ArchiveRequest, ComplexAmplitudeHeader, ComplexAmplitudes,
    ComplexPair, LegacyComplexAmplitudes, SubbandCoef1KHz,
};
pub use config::{HereIAm, PdmBaseAddr, PdmConfiguration, PdmIntrinsics, ThereYouAre};
pub use constants::*;
pub use mask::{
    FrequencyBand, FrequencyMask, FrequencyMaskHeader, RecentRfiMask, RecentRfiMaskHeader,
};
pub use signal::{
    ConfirmationStats, CwBadBand, CwCoherentSegment, CwCoherentSignal, CwPowerSignal,
    DetectionStatistics, FollowUpCwSignal, FollowUpPulseSignal, FollowUpSignal, Pulse,
    PulseBadBand, PulseSignal, PulseSignalHeader, PulseTrainDescription, SignalDescription,
    SignalId, SignalPath,
};
