//! Identity types for Earmark
//!
//! Caller identities are strongly typed wrappers so the admin, a program's
//! responsible party, and a depositor cannot be mixed up with program ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a caller: the admin, a responsible party, or a depositor.
///
/// Compared by equality against stored identities; how a caller proves it
/// holds an identity (session, signature, request header) is the concern of
/// the surrounding transport, not of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartyId(pub Uuid);

impl PartyId {
    /// Create a new random identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from a string (with or without prefix)
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        let s = s.strip_prefix("party_").unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// The null identity. Never valid as an admin or responsible party.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the null identity
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PartyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "party_{}", self.0)
    }
}

impl From<Uuid> for PartyId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl AsRef<Uuid> for PartyId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

/// Sequential identifier of a program.
///
/// Ids are assigned by the registry starting at 0 in creation order, with no
/// gaps and no reuse: program `n` is the `n`-th program ever created. The
/// counter is an explicit contract, not an artifact of storage layout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProgramId(pub u64);

impl ProgramId {
    /// Create from a raw sequence number
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Position of this program in the creation-ordered sequence
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program_{}", self.0)
    }
}

impl From<u64> for ProgramId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_party_id_display_and_parse() {
        let id = PartyId::new();
        let s = id.to_string();
        assert!(s.starts_with("party_"));
        assert_eq!(PartyId::parse(&s).unwrap(), id);
    }

    #[test]
    fn test_party_id_equality() {
        let uuid = Uuid::new_v4();
        let a = PartyId::from_uuid(uuid);
        let b = PartyId::from_uuid(uuid);
        assert_eq!(a, b);
    }

    #[test]
    fn test_nil_identity() {
        assert!(PartyId::nil().is_nil());
        assert!(!PartyId::new().is_nil());
    }

    #[test]
    fn test_program_id_ordering() {
        assert!(ProgramId::new(0) < ProgramId::new(1));
        assert_eq!(ProgramId::new(3).index(), 3);
    }
}
