// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! RTPS submessage walker (RTPS v2.3 Sec.8.3.7).
//!
//! Submessages follow the fixed RTPS header back to back, each introduced
//! by a 4-byte header: id (1), flags (1), octetsToNextHeader (2, LE). The
//! walker is a lazy iterator; the bounds invariants live in one place,
//! [`SubmessageIter::next`], instead of at every call site:
//!
//! - iteration ends when fewer than 4 header bytes remain;
//! - a submessage whose declared length would overrun the buffer is never
//!   yielded;
//! - a declared length of 0 marks the terminal submessage of the packet
//!   (yielded, then the walk stops).

use super::entity::{classify_entity_id, EntityRole};
use super::RTPS_SUBMSG_DATA;

/// Fixed part of a DATA body: extraFlags (2) + octetsToInlineQos (2) +
/// reader/writer entity ids (8) + sequence number (8).
pub const DATA_FIELDS_MIN_SIZE: usize = 20;

/// One submessage as found on the wire.
#[derive(Debug, Clone)]
pub struct Submessage<'a> {
    /// Submessage kind id (e.g. 0x15 = DATA).
    pub id: u8,
    pub flags: u8,
    /// octetsToNextHeader as declared by the submessage header.
    pub length: u16,
    /// Body bytes, exactly `length` of them.
    pub body: &'a [u8],
    /// Offset of the submessage header within the walked buffer.
    pub offset: usize,
    /// Decoded DATA fields; `None` for non-DATA kinds and undersized bodies.
    pub data: Option<DataFields<'a>>,
}

/// Decoded fields of a DATA submessage.
#[derive(Debug, Clone)]
pub struct DataFields<'a> {
    pub extra_flags: u16,
    pub octets_to_inline_qos: u16,
    /// Reader entity id, big-endian on the wire per RTPS v2.3 Sec.9.4.5.3.
    pub reader_id: u32,
    /// Writer entity id, big-endian on the wire.
    pub writer_id: u32,
    /// SequenceNumber_t is (high: i32, low: u32) on the wire; this
    /// diagnostic reads the 8 bytes as one little-endian u64, which is
    /// equivalent for the non-negative values reliable endpoints emit.
    /// The zero-sequence validation warning is defined against this read.
    pub sequence_number: u64,
    /// Role of the announcing writer.
    pub role: EntityRole,
    /// Serialized payload: starts at octetsToInlineQos when that is >= 20,
    /// else at the fixed 20-byte field block.
    pub payload: &'a [u8],
}

/// Walk the submessages of `buf` starting at `offset` (normally the end of
/// the RTPS header).
pub fn submessages(buf: &[u8], offset: usize) -> SubmessageIter<'_> {
    SubmessageIter {
        buf,
        offset,
        done: false,
    }
}

/// Lazy, bounds-checked iterator over a submessage sequence.
pub struct SubmessageIter<'a> {
    buf: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Iterator for SubmessageIter<'a> {
    type Item = Submessage<'a>;

    fn next(&mut self) -> Option<Submessage<'a>> {
        if self.done || self.offset + 4 > self.buf.len() {
            return None;
        }

        let id = self.buf[self.offset];
        let flags = self.buf[self.offset + 1];
        let length =
            u16::from_le_bytes([self.buf[self.offset + 2], self.buf[self.offset + 3]]);

        let body_start = self.offset + 4;
        let body_end = body_start + length as usize;
        if body_end > self.buf.len() {
            // Over-claiming header: nothing sound beyond this point.
            self.done = true;
            return None;
        }

        let body = &self.buf[body_start..body_end];
        let data = if id == RTPS_SUBMSG_DATA && body.len() >= DATA_FIELDS_MIN_SIZE {
            Some(decode_data_fields(body))
        } else {
            None
        };

        let submessage = Submessage {
            id,
            flags,
            length,
            body,
            offset: self.offset,
            data,
        };

        if length == 0 {
            // Zero-length submessage is conventionally the last one.
            self.done = true;
        } else {
            self.offset = body_end;
        }

        Some(submessage)
    }
}

fn decode_data_fields(body: &[u8]) -> DataFields<'_> {
    let extra_flags = u16::from_le_bytes([body[0], body[1]]);
    let octets_to_inline_qos = u16::from_le_bytes([body[2], body[3]]);
    let reader_id = u32::from_be_bytes([body[4], body[5], body[6], body[7]]);
    let writer_id = u32::from_be_bytes([body[8], body[9], body[10], body[11]]);
    let sequence_number = u64::from_le_bytes([
        body[12], body[13], body[14], body[15], body[16], body[17], body[18], body[19],
    ]);

    let payload_start = if octets_to_inline_qos as usize >= DATA_FIELDS_MIN_SIZE {
        octets_to_inline_qos as usize
    } else {
        DATA_FIELDS_MIN_SIZE
    };
    let payload = body.get(payload_start..).unwrap_or(&[]);

    DataFields {
        extra_flags,
        octets_to_inline_qos,
        reader_id,
        writer_id,
        sequence_number,
        role: classify_entity_id(writer_id),
        payload,
    }
}
