// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! RTPS message header parsing and protocol constants (DDS-RTPS v2.3 Sec.8.3).
//!
//! Only the fixed 20-byte header is handled here: magic, protocol version,
//! vendor id, and the GUID prefix. Submessage walking lives in
//! [`submessage`], entity-id classification in [`entity`].

pub mod entity;
pub mod submessage;

/// RTPS protocol magic string: "RTPS" (Sec.8.3.3.1)
pub const RTPS_MAGIC: &[u8; 4] = b"RTPS";

/// RTPS header size (magic + version + vendor + GUID prefix)
pub const RTPS_HEADER_SIZE: usize = 20;

/// GUID prefix size (RTPS v2.3 spec: 12 bytes)
pub const RTPS_GUID_PREFIX_SIZE: usize = 12;

// ============================================================================
// RTPS Submessage IDs (RTPS v2.3 Table 8.13)
// ============================================================================

/// PAD submessage ID - alignment filler
pub const RTPS_SUBMSG_PAD: u8 = 0x01;

/// ACKNACK submessage ID - reliable protocol acknowledgment
pub const RTPS_SUBMSG_ACKNACK: u8 = 0x06;

/// HEARTBEAT submessage ID - reliable protocol heartbeat
pub const RTPS_SUBMSG_HEARTBEAT: u8 = 0x07;

/// GAP submessage ID - indicates irrelevant sequence numbers
pub const RTPS_SUBMSG_GAP: u8 = 0x08;

/// INFO_TS submessage ID - timestamp information
pub const RTPS_SUBMSG_INFO_TS: u8 = 0x09;

/// INFO_DST submessage ID - destination GUID prefix
pub const RTPS_SUBMSG_INFO_DST: u8 = 0x0e;

/// DATA submessage ID - complete user/discovery data
pub const RTPS_SUBMSG_DATA: u8 = 0x15;

/// DATA_FRAG submessage ID - fragmented user/discovery data
pub const RTPS_SUBMSG_DATA_FRAG: u8 = 0x16;

/// Fixed 20-byte RTPS message header.
#[derive(Debug, Clone)]
pub struct RtpsHeader {
    pub version_major: u8,
    pub version_minor: u8,
    /// Vendor id, big-endian on the wire (OMG vendor registry values).
    pub vendor_id: u16,
    /// Opaque participant prefix; rendered as hex, never interpreted.
    pub guid_prefix: [u8; RTPS_GUID_PREFIX_SIZE],
    /// Offset of the first submessage within the UDP payload.
    pub submessages_offset: usize,
}

impl RtpsHeader {
    /// GUID prefix as lowercase hex for reporting.
    pub fn guid_prefix_hex(&self) -> String {
        self.guid_prefix
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Protocol version as "major.minor".
    pub fn protocol_version(&self) -> String {
        format!("{}.{}", self.version_major, self.version_minor)
    }
}

/// Parse the RTPS header at the start of a UDP payload.
///
/// Returns `None` when the payload is shorter than 20 bytes or does not
/// start with the literal `RTPS` token; that frame is simply not RTPS
/// traffic, not an error.
pub fn parse_rtps_header(payload: &[u8]) -> Option<RtpsHeader> {
    if payload.len() < RTPS_HEADER_SIZE {
        return None;
    }
    if &payload[0..4] != RTPS_MAGIC {
        return None;
    }

    let mut guid_prefix = [0u8; RTPS_GUID_PREFIX_SIZE];
    guid_prefix.copy_from_slice(&payload[8..20]);

    Some(RtpsHeader {
        version_major: payload[4],
        version_minor: payload[5],
        vendor_id: u16::from_be_bytes([payload[6], payload[7]]),
        guid_prefix,
        submessages_offset: RTPS_HEADER_SIZE,
    })
}
