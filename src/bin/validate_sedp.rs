// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! validate_sedp - Validate SEDP announcements in a pcap capture
//!
//! Reads a libpcap file, finds SEDP endpoint announcements, and checks
//! each one against the required discovery parameter set.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use hdds_sedp_validate::{PcapReader, Reporter};

/// Validate SEDP announcements in a pcap capture
#[derive(Parser, Debug)]
#[command(name = "validate_sedp")]
#[command(version)]
#[command(about = "Validate SEDP endpoint announcements captured in a pcap file")]
struct Args {
    /// Capture file to analyze (libpcap format)
    pcap_file: PathBuf,

    /// Dump every decoded parameter of each announcement, with debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Dump every decoded parameter of each announcement
    #[arg(long)]
    dump_pids: bool,
}

fn main() {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(&args) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if !args.pcap_file.exists() {
        anyhow::bail!("File not found: {}", args.pcap_file.display());
    }

    println!("Analyzing: {}", args.pcap_file.display());
    println!();

    let reader = PcapReader::open(&args.pcap_file)
        .with_context(|| format!("failed to open {}", args.pcap_file.display()))?;

    let mut reporter = Reporter::stdout(args.dump_pids || args.verbose);
    for packet in reader {
        let packet = packet.context("failed reading capture")?;
        reporter
            .process_packet(&packet)
            .context("failed writing report")?;
    }
    reporter.print_summary().context("failed writing summary")?;

    Ok(())
}
