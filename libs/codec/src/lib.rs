//! # SSE-PDM Protocol Codec
//!
//! Encoding and decoding rules for the binary point-to-point protocol
//! between a PDM (periodogram/power-detection instrument) and its
//! supervising SSE controller, plus the two pieces of cross-message
//! state the protocol defines: the activity lifecycle and the signal
//! classification rules.
//!
//! ## Architecture Role
//!
//! ```text
//! transport bytes ──► registry (code → shape) ──► fixed / variable /
//!                                                  packed codecs
//!                                                       │
//!                     activity tracker ◄── control ─────┤
//!                     classification table ◄── signal ──┘
//! ```
//!
//! The transport delivers raw frames; [`registry::decode_frame`] selects
//! and runs the payload codec; control payloads drive the
//! [`activity::ActivityTracker`], signal payloads are checked against the
//! [`classify`] rule table. Encoding is the mirror path through
//! [`registry::encode_frame`].
//!
//! ## Design Rules
//!
//! - One message, one result: a malformed frame is rejected whole with a
//!   [`WireError`]; no partially decoded state escapes.
//! - All byte-order handling lives in [`wire`]; payload codecs compose
//!   field by field in declaration order, padding included.
//! - Untrusted counts are bounded before allocation.
//!
//! This crate performs no I/O and installs no tracing subscriber.

pub mod activity;
pub mod classify;
pub mod error;
pub mod fixed;
pub mod packed;
pub mod registry;
pub mod variable;
pub mod wire;

pub use activity::ActivityTracker;
pub use classify::{classify_initial, reclassify, validate};
pub use error::{WireError, WireResult};
pub use fixed::WireCodec;
pub use packed::{pack_sample, unpack_sample, SAMPLE_MAX, SAMPLE_MIN};
pub use registry::{
    decode_frame, decode_payload, encode_frame, encode_payload, lookup, Payload,
    PayloadDescriptor, PayloadKind,
};
pub use variable::VariableCodec;
pub use wire::{WireReader, WireWriter};
