// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! CDR parameter-list decoding (RTPS v2.3 Sec.9.4.2.11, PL_CDR_LE).
//!
//! Discovery payloads are a flat sequence of (pid, length, value) triples
//! behind a 4-byte encapsulation header, terminated by PID_SENTINEL. Each
//! value is padded so the next parameter header lands on a 4-byte boundary.
//!
//! Decoding is best-effort by design: a malformed value never aborts the
//! list walk, it produces [`DecodedValue::DecodeError`] for that parameter
//! and the walk continues. The validator downstream decides what a decode
//! failure means for a given pid.

use std::fmt;

// ============================================================================
// Parameter ids
// ============================================================================

/// Terminates the parameter list.
pub const PID_SENTINEL: u16 = 0x0001;
/// Topic name of the announced endpoint (string).
pub const PID_TOPIC_NAME: u16 = 0x0003;
/// Registered type name of the announced endpoint (string).
pub const PID_TYPE_NAME: u16 = 0x0004;
/// Reliability QoS policy (kind + max_blocking_time).
pub const PID_RELIABILITY: u16 = 0x001A;
/// Durability QoS policy (kind).
pub const PID_DURABILITY: u16 = 0x001D;
/// GUID of the announced endpoint (16 bytes).
pub const PID_ENDPOINT_GUID: u16 = 0x005A;

/// PL_CDR encapsulation: 2-byte scheme id + 2 option bytes.
pub const ENCAPSULATION_HEADER_SIZE: usize = 4;

/// Printable name of a known pid.
///
/// Display names only; the semantic decoders key on the `PID_*` constants
/// above. Discovery captures are full of pids this tool does not interpret,
/// and a correct label in the dump beats a raw hex code when comparing
/// vendor announcements.
pub fn pid_name(pid: u16) -> Option<&'static str> {
    let name = match pid {
        PID_SENTINEL => "PID_SENTINEL",
        0x0002 => "PID_PARTICIPANT_LEASE_DURATION",
        PID_TOPIC_NAME => "PID_TOPIC_NAME",
        PID_TYPE_NAME => "PID_TYPE_NAME",
        0x000F => "PID_DOMAIN_ID",
        0x0015 => "PID_PROTOCOL_VERSION",
        0x0016 => "PID_VENDOR_ID",
        PID_RELIABILITY => "PID_RELIABILITY",
        0x001B => "PID_LIVELINESS",
        PID_DURABILITY => "PID_DURABILITY",
        0x001E => "PID_DURABILITY_SERVICE",
        0x001F => "PID_OWNERSHIP",
        0x0021 => "PID_PRESENTATION",
        0x0023 => "PID_DEADLINE",
        0x0025 => "PID_DESTINATION_ORDER",
        0x0027 => "PID_LATENCY_BUDGET",
        0x0029 => "PID_PARTITION",
        0x002B => "PID_LIFESPAN",
        0x002C => "PID_USER_DATA",
        0x002D => "PID_GROUP_DATA",
        0x002E => "PID_TOPIC_DATA",
        0x002F => "PID_UNICAST_LOCATOR",
        0x0030 => "PID_MULTICAST_LOCATOR",
        0x0031 => "PID_DEFAULT_UNICAST_LOCATOR",
        0x0032 => "PID_METATRAFFIC_UNICAST_LOCATOR",
        0x0033 => "PID_METATRAFFIC_MULTICAST_LOCATOR",
        0x0035 => "PID_TRANSPORT_PRIORITY",
        0x0040 => "PID_HISTORY",
        0x0041 => "PID_RESOURCE_LIMITS",
        0x0043 => "PID_EXPECTS_INLINE_QOS",
        0x0048 => "PID_DEFAULT_MULTICAST_LOCATOR",
        0x0050 => "PID_PARTICIPANT_GUID",
        0x0058 => "PID_BUILTIN_ENDPOINT_SET",
        0x0059 => "PID_PROPERTY_LIST",
        PID_ENDPOINT_GUID => "PID_ENDPOINT_GUID",
        0x0062 => "PID_ENTITY_NAME",
        0x0070 => "PID_KEY_HASH",
        _ => return None,
    };
    Some(name)
}

// ============================================================================
// Decoded values
// ============================================================================

/// Reliability kind as carried in PID_RELIABILITY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReliabilityKind {
    Reliable,
    BestEffort,
}

impl fmt::Display for ReliabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReliabilityKind::Reliable => write!(f, "RELIABLE"),
            ReliabilityKind::BestEffort => write!(f, "BEST_EFFORT"),
        }
    }
}

/// Durability kind as carried in PID_DURABILITY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurabilityKind {
    Volatile,
    TransientLocal,
    Transient,
    Persistent,
    Unknown(u32),
}

impl DurabilityKind {
    fn from_wire(kind: u32) -> Self {
        match kind {
            0 => DurabilityKind::Volatile,
            1 => DurabilityKind::TransientLocal,
            2 => DurabilityKind::Transient,
            3 => DurabilityKind::Persistent,
            other => DurabilityKind::Unknown(other),
        }
    }
}

impl fmt::Display for DurabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurabilityKind::Volatile => write!(f, "VOLATILE"),
            DurabilityKind::TransientLocal => write!(f, "TRANSIENT_LOCAL"),
            DurabilityKind::Transient => write!(f, "TRANSIENT"),
            DurabilityKind::Persistent => write!(f, "PERSISTENT"),
            DurabilityKind::Unknown(kind) => write!(f, "UNKNOWN({kind})"),
        }
    }
}

/// Interpretation of a parameter value, when one is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// CDR string (topic name, type name).
    Text(String),
    /// 16-byte GUID rendered as lowercase hex.
    Guid(String),
    Reliability(ReliabilityKind),
    Durability(DurabilityKind),
    /// The value bytes did not match the pid's expected shape.
    DecodeError,
}

impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedValue::Text(s) => write!(f, "{s}"),
            DecodedValue::Guid(hex) => write!(f, "{hex}"),
            DecodedValue::Reliability(kind) => write!(f, "{kind}"),
            DecodedValue::Durability(kind) => write!(f, "{kind}"),
            DecodedValue::DecodeError => write!(f, "<decode error>"),
        }
    }
}

/// One entry of a decoded parameter list.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub pid: u16,
    /// Known pid name, or `UNKNOWN_0x....` for unregistered pids.
    pub name: String,
    /// Declared value length in bytes (unpadded).
    pub length: u16,
    /// Raw value bytes, clamped to what the payload actually contains.
    pub value: Vec<u8>,
    /// Typed interpretation for pids this tool understands.
    pub decoded: Option<DecodedValue>,
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a PL_CDR_LE parameter list from a serialized payload.
///
/// Stops at PID_SENTINEL, at the end of the payload, or when too few bytes
/// remain for another parameter header. Truncated values are clamped rather
/// than rejected; interpretation of the clamped value is then best-effort.
pub fn decode_parameter_list(payload: &[u8]) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut offset = ENCAPSULATION_HEADER_SIZE;

    while offset + 4 <= payload.len() {
        let pid = u16::from_le_bytes([payload[offset], payload[offset + 1]]);
        let length = u16::from_le_bytes([payload[offset + 2], payload[offset + 3]]);
        if pid == PID_SENTINEL {
            break;
        }

        let value_start = offset + 4;
        let value_end = value_start + length as usize;
        let value = payload
            .get(value_start..value_end)
            .unwrap_or(&[])
            .to_vec();

        let name = pid_name(pid)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("UNKNOWN_0x{pid:04X}"));
        let decoded = decode_value(pid, &value);

        params.push(Parameter {
            pid,
            name,
            length,
            value,
            decoded,
        });

        // Values are padded to the next 4-byte boundary.
        offset = value_start + ((length as usize + 3) & !3);
    }

    params
}

fn decode_value(pid: u16, value: &[u8]) -> Option<DecodedValue> {
    match pid {
        PID_TOPIC_NAME | PID_TYPE_NAME => {
            Some(decode_string(value).map_or(DecodedValue::DecodeError, DecodedValue::Text))
        }
        PID_ENDPOINT_GUID => {
            if value.len() >= 16 {
                let hex: String = value[..16].iter().map(|b| format!("{b:02x}")).collect();
                Some(DecodedValue::Guid(hex))
            } else {
                Some(DecodedValue::DecodeError)
            }
        }
        PID_RELIABILITY => {
            if value.len() >= 12 {
                let kind = u32::from_le_bytes([value[0], value[1], value[2], value[3]]);
                let kind = if kind == 1 {
                    ReliabilityKind::Reliable
                } else {
                    ReliabilityKind::BestEffort
                };
                Some(DecodedValue::Reliability(kind))
            } else {
                Some(DecodedValue::DecodeError)
            }
        }
        PID_DURABILITY => {
            if value.len() >= 4 {
                let kind = u32::from_le_bytes([value[0], value[1], value[2], value[3]]);
                Some(DecodedValue::Durability(DurabilityKind::from_wire(kind)))
            } else {
                Some(DecodedValue::DecodeError)
            }
        }
        _ => None,
    }
}

/// Decode a CDR string: u32 LE length (includes the NUL terminator),
/// followed by the bytes. Returns `None` when the shape is wrong.
fn decode_string(value: &[u8]) -> Option<String> {
    if value.len() < 4 {
        return None;
    }
    let declared = u32::from_le_bytes([value[0], value[1], value[2], value[3]]) as usize;
    if declared == 0 {
        return Some(String::new());
    }
    if 4 + declared > value.len() {
        return None;
    }
    // The declared length counts the trailing NUL.
    let bytes = &value[4..4 + declared - 1];
    std::str::from_utf8(bytes).ok().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(pid: u16, value: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&pid.to_le_bytes());
        buf.extend_from_slice(&(value.len() as u16).to_le_bytes());
        buf.extend_from_slice(value);
        while buf.len() % 4 != 0 {
            buf.push(0);
        }
        buf
    }

    fn cdr_string(s: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&((s.len() as u32) + 1).to_le_bytes());
        buf.extend_from_slice(s.as_bytes());
        buf.push(0);
        buf
    }

    fn payload(params: &[Vec<u8>]) -> Vec<u8> {
        let mut buf = vec![0x00, 0x03, 0x00, 0x00]; // PL_CDR_LE encapsulation
        for p in params {
            buf.extend_from_slice(p);
        }
        buf.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]); // sentinel
        buf
    }

    #[test]
    fn test_decodes_topic_and_type_names() {
        let buf = payload(&[
            param(PID_TOPIC_NAME, &cdr_string("TempSensor")),
            param(PID_TYPE_NAME, &cdr_string("sensors::Temp")),
        ]);
        let params = decode_parameter_list(&buf);
        assert_eq!(params.len(), 2);
        assert_eq!(
            params[0].decoded,
            Some(DecodedValue::Text("TempSensor".into()))
        );
        assert_eq!(params[0].name, "PID_TOPIC_NAME");
        assert_eq!(
            params[1].decoded,
            Some(DecodedValue::Text("sensors::Temp".into()))
        );
    }

    #[test]
    fn test_sentinel_terminates_list() {
        let mut buf = payload(&[param(PID_TOPIC_NAME, &cdr_string("T"))]);
        // Parameters after the sentinel must be invisible
        buf.extend_from_slice(&param(PID_TYPE_NAME, &cdr_string("ignored")));
        assert_eq!(decode_parameter_list(&buf).len(), 1);
    }

    #[test]
    fn test_endpoint_guid_rendered_as_hex() {
        let guid: Vec<u8> = (0u8..16).collect();
        let buf = payload(&[param(PID_ENDPOINT_GUID, &guid)]);
        let params = decode_parameter_list(&buf);
        assert_eq!(
            params[0].decoded,
            Some(DecodedValue::Guid(
                "000102030405060708090a0b0c0d0e0f".into()
            ))
        );
    }

    #[test]
    fn test_short_guid_is_decode_error() {
        let buf = payload(&[param(PID_ENDPOINT_GUID, &[0u8; 8])]);
        let params = decode_parameter_list(&buf);
        assert_eq!(params[0].decoded, Some(DecodedValue::DecodeError));
    }

    #[test]
    fn test_reliability_kinds() {
        let mut reliable = vec![0u8; 12];
        reliable[0] = 1;
        let best_effort = vec![0u8; 12];
        let buf = payload(&[
            param(PID_RELIABILITY, &reliable),
            param(PID_RELIABILITY, &best_effort),
        ]);
        let params = decode_parameter_list(&buf);
        assert_eq!(
            params[0].decoded,
            Some(DecodedValue::Reliability(ReliabilityKind::Reliable))
        );
        assert_eq!(
            params[1].decoded,
            Some(DecodedValue::Reliability(ReliabilityKind::BestEffort))
        );
    }

    #[test]
    fn test_durability_kinds() {
        let buf = payload(&[
            param(PID_DURABILITY, &1u32.to_le_bytes()),
            param(PID_DURABILITY, &9u32.to_le_bytes()),
        ]);
        let params = decode_parameter_list(&buf);
        assert_eq!(
            params[0].decoded,
            Some(DecodedValue::Durability(DurabilityKind::TransientLocal))
        );
        assert_eq!(
            params[1].decoded,
            Some(DecodedValue::Durability(DurabilityKind::Unknown(9)))
        );
        assert_eq!(params[1].decoded.as_ref().unwrap().to_string(), "UNKNOWN(9)");
    }

    #[test]
    fn test_pid_names_match_builtin_table() {
        // Labels for pids outside the required set track the discovery
        // constants, not the hex codes that happen to sit nearby.
        assert_eq!(pid_name(0x0002), Some("PID_PARTICIPANT_LEASE_DURATION"));
        assert_eq!(pid_name(0x000F), Some("PID_DOMAIN_ID"));
        assert_eq!(pid_name(0x0043), Some("PID_EXPECTS_INLINE_QOS"));
        assert_eq!(pid_name(0x0058), Some("PID_BUILTIN_ENDPOINT_SET"));
        assert_eq!(pid_name(0x0070), Some("PID_KEY_HASH"));
        assert_eq!(pid_name(0x000B), None);
    }

    #[test]
    fn test_unknown_pid_name_and_raw_value() {
        let buf = payload(&[param(0x7FEE, &[1, 2, 3, 4])]);
        let params = decode_parameter_list(&buf);
        assert_eq!(params[0].name, "UNKNOWN_0x7FEE");
        assert_eq!(params[0].value, vec![1, 2, 3, 4]);
        assert!(params[0].decoded.is_none());
    }

    #[test]
    fn test_truncated_value_is_clamped() {
        // Declared length 32, only 4 value bytes present, no sentinel
        let mut buf = vec![0x00, 0x03, 0x00, 0x00];
        buf.extend_from_slice(&PID_TOPIC_NAME.to_le_bytes());
        buf.extend_from_slice(&32u16.to_le_bytes());
        buf.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

        let params = decode_parameter_list(&buf);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].value, Vec::<u8>::new());
        assert_eq!(params[0].decoded, Some(DecodedValue::DecodeError));
    }

    #[test]
    fn test_odd_length_pads_to_alignment() {
        // "abc" string: 4 + 4 = 8 bytes, but force a 7-byte declared length
        let topic = cdr_string("ab"); // 4 + 3 = 7 bytes, pads to 8
        let buf = payload(&[
            param(PID_TOPIC_NAME, &topic),
            param(PID_TYPE_NAME, &cdr_string("T")),
        ]);
        let params = decode_parameter_list(&buf);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].decoded, Some(DecodedValue::Text("ab".into())));
        assert_eq!(params[1].decoded, Some(DecodedValue::Text("T".into())));
    }

    #[test]
    fn test_empty_string_decodes_empty() {
        let buf = payload(&[param(PID_TOPIC_NAME, &0u32.to_le_bytes())]);
        let params = decode_parameter_list(&buf);
        assert_eq!(params[0].decoded, Some(DecodedValue::Text(String::new())));
    }

    #[test]
    fn test_invalid_utf8_is_decode_error() {
        let mut value = 5u32.to_le_bytes().to_vec();
        value.extend_from_slice(&[0xff, 0xfe, 0xfd, 0xfc, 0x00]);
        let buf = payload(&[param(PID_TOPIC_NAME, &value)]);
        let params = decode_parameter_list(&buf);
        assert_eq!(params[0].decoded, Some(DecodedValue::DecodeError));
    }
}
