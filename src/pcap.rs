// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Libpcap capture file reader.
//!
//! # Format Overview
//!
//! ```text
//! +---------------------------------------------------------+
//! |                Global Header (24 bytes)                  |
//! |  Magic (4) | VerMajor (2) | VerMinor (2) | Zone (4)     |
//! |  Sigfigs (4) | Snaplen (4) | Network (4)                |
//! +---------------------------------------------------------+
//! |                Record 0                                  |
//! |  TsSec (4) | TsUsec (4) | InclLen (4) | OrigLen (4)     |
//! |  frame data (InclLen bytes)                              |
//! +---------------------------------------------------------+
//! |                Record 1                                  |
//! |  ...                                                     |
//! +---------------------------------------------------------+
//! ```
//!
//! The magic value selects the endianness of every integer field that
//! follows: `0xa1b2c3d4` written little-endian, `0xd4c3b2a1` big-endian.
//! A record whose declared frame length exceeds the bytes left in the file
//! ends the stream (logged as a warning); records already produced stay
//! valid. Only a bad global header is fatal.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Pcap magic for little-endian captures.
pub const PCAP_MAGIC_LE: u32 = 0xa1b2_c3d4;

/// Pcap magic for big-endian captures.
pub const PCAP_MAGIC_BE: u32 = 0xd4c3_b2a1;

/// Global header size (magic + version + zone + sigfigs + snaplen + network).
pub const GLOBAL_HEADER_SIZE: usize = 24;

/// Per-record header size (ts_sec + ts_usec + incl_len + orig_len).
pub const RECORD_HEADER_SIZE: usize = 16;

/// Capture read errors. Only the global header can be fatal; everything
/// after it degrades to an early end of stream.
#[derive(Debug, Error)]
pub enum PcapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid pcap file: header too short")]
    HeaderTooShort,

    #[error("Invalid pcap magic: {magic:08x}")]
    BadMagic { magic: u32 },
}

/// One raw frame lifted out of the capture file.
#[derive(Debug, Clone)]
pub struct CapturedPacket {
    /// 1-based position in the capture.
    pub number: u32,
    /// Capture timestamp in seconds (microsecond resolution).
    pub timestamp: f64,
    /// Raw frame bytes, exactly `size` of them.
    pub data: Vec<u8>,
    /// Captured length as declared by the record header.
    pub size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endianness {
    Little,
    Big,
}

/// Streaming reader over a libpcap capture file.
///
/// One packet is held in memory at a time. The reader is also an
/// [`Iterator`] over `Result<CapturedPacket, PcapError>`.
pub struct PcapReader {
    reader: BufReader<File>,
    endian: Endianness,
    packet_number: u32,
    done: bool,
}

impl PcapReader {
    /// Open a capture file, validating the 24-byte global header.
    ///
    /// # Errors
    ///
    /// `PcapError::HeaderTooShort` when fewer than 24 bytes are available,
    /// `PcapError::BadMagic` for an unrecognized magic value. Both are
    /// fatal for the whole run.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PcapError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut header = [0u8; GLOBAL_HEADER_SIZE];
        reader
            .read_exact(&mut header)
            .map_err(|_| PcapError::HeaderTooShort)?;

        let magic = LittleEndian::read_u32(&header[0..4]);
        let endian = match magic {
            PCAP_MAGIC_LE => Endianness::Little,
            PCAP_MAGIC_BE => Endianness::Big,
            other => return Err(PcapError::BadMagic { magic: other }),
        };

        Ok(Self {
            reader,
            endian,
            packet_number: 0,
            done: false,
        })
    }

    fn read_u32_field(&self, buf: &[u8]) -> u32 {
        match self.endian {
            Endianness::Little => LittleEndian::read_u32(buf),
            Endianness::Big => BigEndian::read_u32(buf),
        }
    }

    /// Read the next packet record.
    ///
    /// Returns `Ok(None)` at a clean end of file. A record whose frame data
    /// is shorter than its declared captured length ends the stream early
    /// with a warning instead of an error.
    pub fn next_packet(&mut self) -> Result<Option<CapturedPacket>, PcapError> {
        if self.done {
            return Ok(None);
        }

        let mut record = [0u8; RECORD_HEADER_SIZE];
        if let Err(e) = self.reader.read_exact(&mut record) {
            // A partial record header is treated the same as a clean EOF.
            if e.kind() == io::ErrorKind::UnexpectedEof {
                self.done = true;
                return Ok(None);
            }
            return Err(PcapError::Io(e));
        }

        self.packet_number += 1;

        let ts_sec = self.read_u32_field(&record[0..4]);
        let ts_usec = self.read_u32_field(&record[4..8]);
        let incl_len = self.read_u32_field(&record[8..12]);
        let _orig_len = self.read_u32_field(&record[12..16]);

        // Read at most what the file actually holds; the declared length is
        // untrusted and must not drive an allocation.
        let mut data = Vec::new();
        let read = self
            .reader
            .by_ref()
            .take(u64::from(incl_len))
            .read_to_end(&mut data)?;
        if (read as u64) < u64::from(incl_len) {
            log::warn!(
                "packet {} truncated (declared {} bytes, got {}), stopping",
                self.packet_number,
                incl_len,
                read
            );
            self.done = true;
            return Ok(None);
        }

        Ok(Some(CapturedPacket {
            number: self.packet_number,
            timestamp: f64::from(ts_sec) + f64::from(ts_usec) / 1_000_000.0,
            data,
            size: incl_len,
        }))
    }
}

impl Iterator for PcapReader {
    type Item = Result<CapturedPacket, PcapError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_packet() {
            Ok(Some(packet)) => Some(Ok(packet)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
