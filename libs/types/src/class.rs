//! # Signal Classification Taxonomy
//!
//! ## Purpose
//!
//! Classification of detected signals and the closed set of reasons a class
//! may be assigned for. Reasons are partitioned by assigning actor: the PDM
//! instrument assigns a reason exactly once at initial detection; the SSE
//! controller assigns reasons on every later reclassification (confirmation
//! and grid observations). The legality rules live in
//! `pdm-codec`'s classification table; this module only defines the
//! vocabulary.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Current classification of a signal.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalClass {
    /// Not yet assigned a classification.
    #[default]
    Uninit = 0,
    /// Candidate pending further observation.
    Cand = 1,
    Rfi = 2,
    /// Known test signal.
    Test = 3,
    /// Everything else.
    Unknown = 4,
}

/// Reason a classification was assigned.
///
/// Grouped by the class the reason supports; `GridWest` .. `GridEast`
/// variants record the outcome at each of the five confirmation grid
/// pointings.
#[repr(i32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalClassReason {
    #[default]
    ClassReasonUninit = 0,

    // Cand, instrument assigned
    PassedPowerThresh = 1,
    PassedCoherentDetect = 2,

    // Cand, controller assigned
    Confirm = 3,
    Reconfirm = 4,
    NotSeenOff = 5,
    SecondaryFoundSignal = 6,
    SeenGridWest = 7,
    NotSeenGridWest = 8,
    SeenGridSouth = 9,
    NotSeenGridSouth = 10,
    SeenGridOn = 11,
    NotSeenGridOn = 12,
    SeenGridNorth = 13,
    NotSeenGridNorth = 14,
    SeenGridEast = 15,
    NotSeenGridEast = 16,
    GridPrediction = 17,

    // Rfi, instrument assigned
    ZeroDrift = 18,
    RecentRfiMatch = 19,
    FailedCoherentDetect = 20,
    FailedPowerThresh = 21,
    NoSignalFound = 22,
    SnrTooHigh = 23,
    SnrTooLow = 24,
    DriftTooHigh = 25,

    // Rfi, controller assigned
    SeenOff = 26,
    NoReconfirm = 27,
    SeenMultipleBeams = 28,
    FallsInBadBand = 29,
    FailedCoherentDetectGridWest = 30,
    ZeroDriftGridWest = 31,
    RecentRfiMatchGridWest = 32,
    FailedCoherentDetectGridSouth = 33,
    ZeroDriftGridSouth = 34,
    RecentRfiMatchGridSouth = 35,
    FailedCoherentDetectGridOn = 36,
    ZeroDriftGridOn = 37,
    RecentRfiMatchGridOn = 38,
    FailedCoherentDetectGridNorth = 39,
    ZeroDriftGridNorth = 40,
    RecentRfiMatchGridNorth = 41,
    FailedCoherentDetectGridEast = 42,
    ZeroDriftGridEast = 43,
    RecentRfiMatchGridEast = 44,

    // Test, controller assigned
    TestSignalMatch = 45,

    // Unknown, instrument assigned (PassedPowerThresh also applies)
    TooManyCandidates = 46,

    // Unknown, controller assigned (SeenOff also applies)
    BirdieScan = 47,
    RfiScan = 48,
    SecondaryNoSignalFound = 49,

    /// Range sentinel.
    SignalClassReasonEnd = 50,
}

impl SignalClassReason {
    /// True when the reason is assigned by the PDM instrument at initial
    /// classification, false when it is a controller reclassification
    /// reason. The sentinels belong to neither actor.
    pub fn is_instrument_assigned(self) -> bool {
        use SignalClassReason::*;
        matches!(
            self,
            PassedPowerThresh
                | PassedCoherentDetect
                | ZeroDrift
                | RecentRfiMatch
                | FailedCoherentDetect
                | FailedPowerThresh
                | NoSignalFound
                | SnrTooHigh
                | SnrTooLow
                | DriftTooHigh
                | TooManyCandidates
        )
    }

    /// True when the reason may only appear in a controller-issued
    /// reclassification.
    pub fn is_controller_assigned(self) -> bool {
        !self.is_instrument_assigned()
            && !matches!(
                self,
                SignalClassReason::ClassReasonUninit | SignalClassReason::SignalClassReasonEnd
            )
    }
}
