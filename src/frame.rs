// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ethernet/IPv4/UDP decapsulation.
//!
//! Captured frames that are not Ethernet-framed IPv4/UDP are not errors;
//! a capture interface sees plenty of ARP, IPv6, and TCP traffic that is
//! simply not RTPS. [`decapsulate`] answers `None` for all of those and the
//! caller moves on to the next frame.

use std::net::Ipv4Addr;

/// EtherType for IPv4 (offset 12..14 of the Ethernet header, big-endian).
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// IPv4 protocol number for UDP.
pub const IP_PROTO_UDP: u8 = 17;

/// Destination MAC (6) + source MAC (6) + EtherType (2).
pub const ETHERNET_HEADER_SIZE: usize = 14;

/// Minimum IPv4 header: 20 bytes (IHL = 5).
pub const IPV4_HEADER_MIN_SIZE: usize = 20;

/// Source port (2) + destination port (2) + length (2) + checksum (2).
pub const UDP_HEADER_SIZE: usize = 8;

/// UDP 4-tuple plus payload, borrowed from one captured frame.
#[derive(Debug, Clone)]
pub struct UdpDatagram<'a> {
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
    pub src_port: u16,
    pub dst_port: u16,
    pub payload: &'a [u8],
}

/// Strip Ethernet, IPv4, and UDP headers from one raw frame.
///
/// Returns `None` for any frame that is not Ethernet + IPv4 + UDP, or any
/// frame too short for the headers it claims to carry.
pub fn decapsulate(frame: &[u8]) -> Option<UdpDatagram<'_>> {
    if frame.len() < ETHERNET_HEADER_SIZE {
        return None;
    }

    let ethertype = u16::from_be_bytes([frame[12], frame[13]]);
    if ethertype != ETHERTYPE_IPV4 {
        return None;
    }

    let ip = &frame[ETHERNET_HEADER_SIZE..];
    if ip.len() < IPV4_HEADER_MIN_SIZE {
        return None;
    }

    let version = ip[0] >> 4;
    let header_len = usize::from(ip[0] & 0x0f) * 4;
    if version != 4 || header_len < IPV4_HEADER_MIN_SIZE {
        return None;
    }

    if ip[9] != IP_PROTO_UDP {
        return None;
    }

    let src_ip = Ipv4Addr::new(ip[12], ip[13], ip[14], ip[15]);
    let dst_ip = Ipv4Addr::new(ip[16], ip[17], ip[18], ip[19]);

    let udp = ip.get(header_len..)?;
    if udp.len() < UDP_HEADER_SIZE {
        return None;
    }

    let src_port = u16::from_be_bytes([udp[0], udp[1]]);
    let dst_port = u16::from_be_bytes([udp[2], udp[3]]);

    Some(UdpDatagram {
        src_ip,
        dst_ip,
        src_port,
        dst_port,
        payload: &udp[UDP_HEADER_SIZE..],
    })
}
