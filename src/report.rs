// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-packet announcement reports and the run summary.
//!
//! The reporter drives the whole decode pipeline for each captured packet:
//! decapsulate, parse the RTPS header, walk submessages, decode SEDP
//! parameter lists, validate, print. Non-RTPS packets are counted only as
//! captured traffic; SPDP announcements are tallied but not reported in
//! detail.

use std::io::{self, Write};

use colored::Colorize;

use crate::cdr::decode_parameter_list;
use crate::frame::decapsulate;
use crate::pcap::CapturedPacket;
use crate::rtps::entity::{entity_name, EntityRole};
use crate::rtps::submessage::{submessages, DataFields};
use crate::rtps::parse_rtps_header;
use crate::validate::validate_sedp;

/// Counters accumulated over one capture file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Packets read from the capture, RTPS or not.
    pub total_packets: u64,
    /// Packets carrying a valid RTPS header.
    pub rtps_packets: u64,
    /// DATA submessages from SPDP writers.
    pub spdp_packets: u64,
    /// DATA submessages from SEDP writers.
    pub sedp_packets: u64,
}

/// Decodes packets and writes announcement reports to `out`.
pub struct Reporter<W: Write> {
    out: W,
    dump_pids: bool,
    summary: Summary,
}

impl Reporter<io::Stdout> {
    pub fn stdout(dump_pids: bool) -> Self {
        Reporter::with_writer(io::stdout(), dump_pids)
    }
}

impl<W: Write> Reporter<W> {
    pub fn with_writer(out: W, dump_pids: bool) -> Self {
        Reporter {
            out,
            dump_pids,
            summary: Summary::default(),
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Decode one captured packet, updating counters and printing a report
    /// block for every SEDP announcement found in it.
    pub fn process_packet(&mut self, packet: &CapturedPacket) -> io::Result<()> {
        self.summary.total_packets += 1;

        let Some(datagram) = decapsulate(&packet.data) else {
            return Ok(());
        };
        let Some(header) = parse_rtps_header(datagram.payload) else {
            return Ok(());
        };
        self.summary.rtps_packets += 1;
        log::debug!(
            "packet #{}: RTPS {} from {}:{}",
            packet.number,
            header.protocol_version(),
            datagram.src_ip,
            datagram.src_port
        );

        for sub in submessages(datagram.payload, header.submessages_offset) {
            let Some(data) = sub.data else { continue };
            match data.role {
                EntityRole::Spdp => self.summary.spdp_packets += 1,
                EntityRole::SedpPub | EntityRole::SedpSub => {
                    self.summary.sedp_packets += 1;
                    let endpoints = format!(
                        "{}:{} -> {}:{}",
                        datagram.src_ip, datagram.src_port, datagram.dst_ip, datagram.dst_port
                    );
                    self.print_announcement(packet, &endpoints, &header.guid_prefix_hex(), &data)?;
                }
                EntityRole::Builtin | EntityRole::User => {}
            }
        }
        Ok(())
    }

    fn print_announcement(
        &mut self,
        packet: &CapturedPacket,
        endpoints: &str,
        guid_prefix: &str,
        data: &DataFields<'_>,
    ) -> io::Result<()> {
        let params = decode_parameter_list(data.payload);
        let result = validate_sedp(data, &params);
        let kind = match data.role {
            EntityRole::SedpPub => "Publication",
            _ => "Subscription",
        };

        writeln!(self.out, "{}", "=".repeat(70))?;
        writeln!(
            self.out,
            "Packet #{} - {} Announcement",
            packet.number, kind
        )?;
        writeln!(self.out, "{}", "=".repeat(70))?;
        writeln!(self.out, "  Source:          {endpoints}")?;
        writeln!(self.out, "  Size:            {} bytes", packet.size)?;
        writeln!(self.out, "  GUID Prefix:     {guid_prefix}")?;
        writeln!(
            self.out,
            "  Writer EntityID: 0x{:08X} ({})",
            data.writer_id,
            entity_name(data.writer_id).unwrap_or("UNKNOWN")
        )?;
        writeln!(
            self.out,
            "  Reader EntityID: 0x{:08X} ({})",
            data.reader_id,
            entity_name(data.reader_id).unwrap_or("UNKNOWN")
        )?;
        writeln!(self.out, "  Sequence Number: {}", data.sequence_number)?;
        writeln!(self.out, "  Parameters:      {}", params.len())?;

        if self.dump_pids {
            for param in &params {
                match &param.decoded {
                    Some(value) => writeln!(
                        self.out,
                        "  [0x{:04X}] {} (len={}) = {}",
                        param.pid, param.name, param.length, value
                    )?,
                    None => writeln!(
                        self.out,
                        "  [0x{:04X}] {} (len={})",
                        param.pid, param.name, param.length
                    )?,
                }
            }
        }

        if !result.issues.is_empty() {
            writeln!(self.out, "  {}", "[X] VALIDATION ISSUES:".red().bold())?;
            for issue in &result.issues {
                writeln!(self.out, "      - {}", issue.red())?;
            }
        }
        if !result.warnings.is_empty() {
            writeln!(self.out, "  {}", "[!] WARNINGS:".yellow().bold())?;
            for warning in &result.warnings {
                writeln!(self.out, "      - {}", warning.yellow())?;
            }
        }
        if result.passed() && result.warnings.is_empty() {
            writeln!(self.out, "  {}", "[OK] Packet validation PASSED".green())?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn print_summary(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(70))?;
        writeln!(self.out, "Summary")?;
        writeln!(self.out, "{}", "=".repeat(70))?;
        writeln!(self.out, "  Total packets: {}", self.summary.total_packets)?;
        writeln!(self.out, "  RTPS packets:  {}", self.summary.rtps_packets)?;
        writeln!(self.out, "  SPDP packets:  {}", self.summary.spdp_packets)?;
        writeln!(self.out, "  SEDP packets:  {}", self.summary.sedp_packets)?;
        Ok(())
    }
}
