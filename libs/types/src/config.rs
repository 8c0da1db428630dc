//! Connection setup and instrument description payloads: the
//! `HereIAm`/`ThereYouAre` handshake, the multicast base address, the
//! intrinsics the PDM reports about itself and the configuration the SSE
//! pushes down.
//!
//! The handshake structures travel under codes in the common SSE interface
//! range shared by every subsystem, not under [`PdmMessageCode`]
//! (crate::codes::PdmMessageCode); they are plain wire types here.

use crate::common::{NssDate, SiteId};

/// First message a connecting instrument sends: its interface version.
///
/// Wire layout: one [`MAX_TEXT_STRING`](crate::constants::MAX_TEXT_STRING)
/// NUL-terminated text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HereIAm {
    pub interface_version_number: String,
}

/// Controller's handshake reply: where the PDM should connect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThereYouAre {
    /// SSE address for the PDM to connect to, dotted quad.
    pub sse_ip: String,
    pub port_id: i32,
    pub interface_version_number: String,
}

/// Multicast base address for the channelized input stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmBaseAddr {
    pub addr: String,
    pub port: i32,
}

/// Static description the PDM reports about itself on request.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmIntrinsics {
    pub interface_version_number: String,
    pub pdm_name: String,
    pub pdm_host_name: String,
    /// Version of the PDM code itself.
    pub pdm_code_version: String,
    /// Channel (input) base address.
    pub channel_base: PdmBaseAddr,

    // Digital filter bank
    pub foldings: i32,
    /// Oversampling as a percentage overlap.
    pub oversampling: f32,
    pub filter_name: String,

    /// Usable subband width.
    pub hz_per_subband: f64,
    /// Max number of subbands; indicates PDM bandwidth.
    pub max_subbands: i32,
    pub serial_number: i32,
    pub birdie_mask_date: NssDate,
    pub rcvr_birdie_mask_date: NssDate,
    pub perm_mask_date: NssDate,
}

/// Site-level configuration the SSE pushes to a PDM.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PdmConfiguration {
    pub site: SiteId,
    /// Logical id.
    pub pdm_id: i32,
    /// MHz
    pub a2d_clockrate: f64,
    pub archiver_hostname: String,
    pub archiver_port: i32,
}
