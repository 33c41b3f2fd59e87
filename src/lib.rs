// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Offline SEDP validation for RTPS captures.
//!
//! Reads libpcap capture files, peels Ethernet/IPv4/UDP down to RTPS
//! messages, walks their submessages, and validates every SEDP endpoint
//! announcement against the required discovery parameter set. Built for
//! postmortem debugging of discovery problems: a missing PID_TYPE_NAME or
//! an empty topic name in a capture explains a silent endpoint-match
//! failure faster than any live tracing does.
//!
//! The pipeline, stage by stage:
//!
//! 1. [`pcap`]     - capture file framing (global header, record headers)
//! 2. [`frame`]    - Ethernet II / IPv4 / UDP decapsulation
//! 3. [`rtps`]     - RTPS header, submessage walking, entity classification
//! 4. [`cdr`]      - PL_CDR_LE parameter-list decoding
//! 5. [`validate`] - SEDP required-parameter checks
//! 6. [`report`]   - per-announcement report blocks and the run summary
//!
//! Everything is synchronous single-pass: packets stream through in
//! capture order and nothing is retained across packets beyond counters.

pub mod cdr;
pub mod frame;
pub mod pcap;
pub mod report;
pub mod rtps;
pub mod validate;

pub use pcap::{CapturedPacket, PcapError, PcapReader};
pub use report::{Reporter, Summary};
pub use validate::ValidationResult;
