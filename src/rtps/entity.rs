// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Builtin entity-id classification (RTPS v2.3 Sec.8.2.4.3 / Table 9.1).
//!
//! EntityId_t is always big-endian on the wire; the `u32` values here are
//! the big-endian reading of the four id bytes. Classification is a direct
//! id-to-role mapping so that display-name wording can change without
//! touching classification logic.

use std::fmt;

// ============================================================================
// Well-known builtin entity IDs
// ============================================================================

/// Participant entity ID
pub const ENTITYID_PARTICIPANT: u32 = 0x0000_01C1;

/// SPDP built-in participant writer entity ID
pub const ENTITYID_SPDP_BUILTIN_PARTICIPANT_WRITER: u32 = 0x0001_00C2;

/// SPDP built-in participant reader entity ID
pub const ENTITYID_SPDP_BUILTIN_PARTICIPANT_READER: u32 = 0x0001_00C7;

/// SEDP publications (DataWriter) built-in writer entity ID
pub const ENTITYID_SEDP_BUILTIN_PUBLICATIONS_WRITER: u32 = 0x0000_03C2;

/// SEDP publications (DataWriter) built-in reader entity ID
pub const ENTITYID_SEDP_BUILTIN_PUBLICATIONS_READER: u32 = 0x0000_03C7;

/// SEDP subscriptions (DataReader) built-in writer entity ID
pub const ENTITYID_SEDP_BUILTIN_SUBSCRIPTIONS_WRITER: u32 = 0x0000_04C2;

/// SEDP subscriptions (DataReader) built-in reader entity ID
pub const ENTITYID_SEDP_BUILTIN_SUBSCRIPTIONS_READER: u32 = 0x0000_04C7;

/// SEDP topics built-in writer entity ID
pub const ENTITYID_SEDP_BUILTIN_TOPICS_WRITER: u32 = 0x0000_02C2;

/// SEDP topics built-in reader entity ID
pub const ENTITYID_SEDP_BUILTIN_TOPICS_READER: u32 = 0x0000_02C7;

/// P2P built-in PARTICIPANT_MESSAGE writer entity ID (liveliness)
pub const ENTITYID_P2P_BUILTIN_PARTICIPANT_MESSAGE_WRITER: u32 = 0x0002_00C2;

/// P2P built-in PARTICIPANT_MESSAGE reader entity ID (liveliness)
pub const ENTITYID_P2P_BUILTIN_PARTICIPANT_MESSAGE_READER: u32 = 0x0002_00C7;

/// TypeLookup built-in reader entity ID (XTypes request/reply)
pub const ENTITYID_TYPELOOKUP_READER: u32 = 0x0003_00C3;

/// TypeLookup built-in writer entity ID (XTypes request/reply)
pub const ENTITYID_TYPELOOKUP_WRITER: u32 = 0x0003_00C4;

/// Logical role of the endpoint behind a writer/reader entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRole {
    /// Participant discovery announcement.
    Spdp,
    /// Publication (DataWriter) discovery announcement.
    SedpPub,
    /// Subscription (DataReader) discovery announcement.
    SedpSub,
    /// Recognized builtin endpoint with no validation rules here.
    Builtin,
    /// Anything not in the builtin table; user-defined endpoints land here.
    User,
}

impl EntityRole {
    pub fn is_sedp(self) -> bool {
        matches!(self, EntityRole::SedpPub | EntityRole::SedpSub)
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityRole::Spdp => "SPDP",
            EntityRole::SedpPub => "SEDP_PUB",
            EntityRole::SedpSub => "SEDP_SUB",
            EntityRole::Builtin => "BUILTIN",
            EntityRole::User => "USER",
        }
    }
}

impl fmt::Display for EntityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an entity id into its discovery role.
///
/// Unknown ids classify as [`EntityRole::User`]; that is expected for every
/// application-defined endpoint and is never an error.
pub fn classify_entity_id(entity_id: u32) -> EntityRole {
    match entity_id {
        ENTITYID_PARTICIPANT
        | ENTITYID_SPDP_BUILTIN_PARTICIPANT_WRITER
        | ENTITYID_SPDP_BUILTIN_PARTICIPANT_READER => EntityRole::Spdp,

        ENTITYID_SEDP_BUILTIN_PUBLICATIONS_WRITER
        | ENTITYID_SEDP_BUILTIN_PUBLICATIONS_READER => EntityRole::SedpPub,

        ENTITYID_SEDP_BUILTIN_SUBSCRIPTIONS_WRITER
        | ENTITYID_SEDP_BUILTIN_SUBSCRIPTIONS_READER => EntityRole::SedpSub,

        ENTITYID_SEDP_BUILTIN_TOPICS_WRITER
        | ENTITYID_SEDP_BUILTIN_TOPICS_READER
        | ENTITYID_P2P_BUILTIN_PARTICIPANT_MESSAGE_WRITER
        | ENTITYID_P2P_BUILTIN_PARTICIPANT_MESSAGE_READER
        | ENTITYID_TYPELOOKUP_READER
        | ENTITYID_TYPELOOKUP_WRITER => EntityRole::Builtin,

        _ => EntityRole::User,
    }
}

/// Display name for a well-known entity id.
pub fn entity_name(entity_id: u32) -> Option<&'static str> {
    match entity_id {
        ENTITYID_PARTICIPANT => Some("ENTITYID_PARTICIPANT"),
        ENTITYID_SPDP_BUILTIN_PARTICIPANT_WRITER => {
            Some("ENTITYID_SPDP_BUILTIN_PARTICIPANT_WRITER")
        }
        ENTITYID_SPDP_BUILTIN_PARTICIPANT_READER => {
            Some("ENTITYID_SPDP_BUILTIN_PARTICIPANT_READER")
        }
        ENTITYID_SEDP_BUILTIN_PUBLICATIONS_WRITER => {
            Some("ENTITYID_SEDP_BUILTIN_PUBLICATIONS_WRITER")
        }
        ENTITYID_SEDP_BUILTIN_PUBLICATIONS_READER => {
            Some("ENTITYID_SEDP_BUILTIN_PUBLICATIONS_READER")
        }
        ENTITYID_SEDP_BUILTIN_SUBSCRIPTIONS_WRITER => {
            Some("ENTITYID_SEDP_BUILTIN_SUBSCRIPTIONS_WRITER")
        }
        ENTITYID_SEDP_BUILTIN_SUBSCRIPTIONS_READER => {
            Some("ENTITYID_SEDP_BUILTIN_SUBSCRIPTIONS_READER")
        }
        ENTITYID_SEDP_BUILTIN_TOPICS_WRITER => Some("ENTITYID_SEDP_BUILTIN_TOPICS_WRITER"),
        ENTITYID_SEDP_BUILTIN_TOPICS_READER => Some("ENTITYID_SEDP_BUILTIN_TOPICS_READER"),
        ENTITYID_P2P_BUILTIN_PARTICIPANT_MESSAGE_WRITER => {
            Some("ENTITYID_P2P_BUILTIN_PARTICIPANT_MESSAGE_WRITER")
        }
        ENTITYID_P2P_BUILTIN_PARTICIPANT_MESSAGE_READER => {
            Some("ENTITYID_P2P_BUILTIN_PARTICIPANT_MESSAGE_READER")
        }
        ENTITYID_TYPELOOKUP_READER => Some("ENTITYID_TYPELOOKUP_READER"),
        ENTITYID_TYPELOOKUP_WRITER => Some("ENTITYID_TYPELOOKUP_WRITER"),
        _ => None,
    }
}
