// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! SEDP announcement validation.
//!
//! Checks a decoded SEDP DATA submessage against the parameter set a
//! compliant endpoint announcement must carry (RTPS v2.3 Sec.8.5.4.2).
//! Findings are split into issues (non-compliant announcement) and
//! warnings (suspicious but tolerated by most stacks).

use crate::cdr::{
    DecodedValue, Parameter, PID_DURABILITY, PID_ENDPOINT_GUID, PID_RELIABILITY,
    PID_TOPIC_NAME, PID_TYPE_NAME,
};
use crate::rtps::submessage::DataFields;

/// Parameters every SEDP endpoint announcement must carry.
pub const REQUIRED_SEDP_PIDS: [(u16, &str); 5] = [
    (PID_ENDPOINT_GUID, "PID_ENDPOINT_GUID"),
    (PID_TOPIC_NAME, "PID_TOPIC_NAME"),
    (PID_TYPE_NAME, "PID_TYPE_NAME"),
    (PID_RELIABILITY, "PID_RELIABILITY"),
    (PID_DURABILITY, "PID_DURABILITY"),
];

/// Outcome of validating one announcement.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Violations of the required-parameter contract.
    pub issues: Vec<String>,
    /// Findings worth surfacing that are not outright violations.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate an SEDP announcement.
///
/// Non-SEDP writers (SPDP, user data, other builtins) are out of scope and
/// return an empty result.
pub fn validate_sedp(data: &DataFields<'_>, params: &[Parameter]) -> ValidationResult {
    let mut result = ValidationResult::default();
    if !data.role.is_sedp() {
        return result;
    }

    for (pid, name) in REQUIRED_SEDP_PIDS {
        let count = params.iter().filter(|p| p.pid == pid).count();
        if count == 0 {
            result
                .issues
                .push(format!("Missing required PID: {name} (0x{pid:04X})"));
        } else if count > 1 {
            result
                .warnings
                .push(format!("Duplicate PID: {name} (0x{pid:04X}) appears {count} times"));
        }
    }

    check_string_pid(params, PID_TOPIC_NAME, "TOPIC_NAME", &mut result);
    check_string_pid(params, PID_TYPE_NAME, "TYPE_NAME", &mut result);

    if data.sequence_number == 0 {
        result
            .warnings
            .push("Sequence number is 0 (should start from 1 for Reliable QoS)".to_owned());
    }

    result
}

/// A present string parameter must decode to a non-empty string.
fn check_string_pid(params: &[Parameter], pid: u16, label: &str, result: &mut ValidationResult) {
    if let Some(param) = params.iter().find(|p| p.pid == pid) {
        let ok = matches!(&param.decoded, Some(DecodedValue::Text(s)) if !s.is_empty());
        if !ok {
            result.issues.push(format!("Empty or invalid {label}"));
        }
    }
}
