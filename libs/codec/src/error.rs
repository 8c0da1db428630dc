//! Protocol error types.
//!
//! Every failure mode of the codec, registry, activity tracker and
//! classification table is one variant here. Decode-path errors are
//! recoverable at the message boundary: a malformed frame is rejected
//! whole, with no partial application of decoded fields, and the
//! connection stays usable for the next frame.

use thiserror::Error;

/// Errors raised by the SSE-PDM protocol layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Fewer bytes remain than the next field requires.
    #[error("truncated input: field {field} needs {needed} bytes, {remaining} remain")]
    TruncatedInput {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A decoded enum discriminant, count or boolean violates its
    /// documented domain.
    #[error("field {field} out of range: {value}")]
    FieldOutOfRange { field: &'static str, value: i64 },

    /// A variable-length header declares more elements than the documented
    /// maximum; the trailing array is not read or allocated.
    #[error("oversized payload: {field} declares {declared} elements, maximum is {max}")]
    OversizedPayload {
        field: &'static str,
        declared: i64,
        max: usize,
    },

    /// Caller supplied more elements than the structure may carry.
    #[error("invalid count: {field} given {given} elements, maximum is {max}")]
    InvalidCount {
        field: &'static str,
        given: usize,
        max: usize,
    },

    /// A complex sample component falls outside the packable [-8, 7] range.
    #[error("sample overflow: ({re}, {im}) outside the 4-bit signed range")]
    SampleOverflow { re: i32, im: i32 },

    /// A raw message code falls outside the known range.
    #[error("unknown message code: {raw}")]
    UnknownMessageCode { raw: i32 },

    /// A status or control message referenced an activity id that is not
    /// being tracked.
    #[error("unknown activity: {activity_id}")]
    UnknownActivity { activity_id: i32 },

    /// A control message arrived that the activity's current state does
    /// not accept.
    #[error("illegal state transition for activity {activity_id}: {from:?} rejects {code:?}")]
    IllegalStateTransition {
        activity_id: i32,
        from: pdm_types::PdmActivityState,
        code: pdm_types::PdmMessageCode,
    },

    /// A reclassification supplied a reason outside the target class's
    /// legal set.
    #[error("illegal classification: reason {reason:?} is not legal for class {class:?}")]
    IllegalClassification {
        class: pdm_types::SignalClass,
        reason: pdm_types::SignalClassReason,
    },

    /// Starting another activity while the tracker is full of non-terminal
    /// activities.
    #[error("capacity exceeded: {limit} activities already tracked")]
    CapacityExceeded { limit: usize },

    /// Payload variant handed to the encoder does not match the shape
    /// registered for the message code.
    #[error("payload mismatch: {code:?} does not carry this payload")]
    PayloadMismatch { code: pdm_types::PdmMessageCode },
}

/// Result alias used throughout the codec.
pub type WireResult<T> = Result<T, WireError>;
