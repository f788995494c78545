//! Party identities, roles and per-party protocol state.

use serde::{Deserialize, Serialize};

/// Identifies one of the four protocol participants.
///
/// The variant order is the fixed contribution order in which the parties
/// fold their encrypted vectors into the running sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyId {
    /// The coordinator.
    Alice,
    /// Second contributor.
    Bob,
    /// Third contributor.
    Chris,
    /// Fourth contributor.
    David,
}

impl PartyId {
    /// All parties in contribution order.
    pub const ALL: [PartyId; 4] = [PartyId::Alice, PartyId::Bob, PartyId::Chris, PartyId::David];

    /// The party's display name.
    pub fn name(self) -> &'static str {
        match self {
            PartyId::Alice => "Alice",
            PartyId::Bob => "Bob",
            PartyId::Chris => "Chris",
            PartyId::David => "David",
        }
    }

    /// The role this party plays in the protocol execution.
    pub fn role(self) -> Role {
        match self {
            PartyId::Alice => Role::Coordinator,
            _ => Role::Contributor,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// The role played by a particular party in the protocol execution.
///
/// The parties differ only in whether they perform the key operations; there
/// is no further hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Contributes an input vector and additionally generates the key pair,
    /// decrypts the accumulated sum and deals the shares.
    Coordinator,
    /// Contributes an input vector, but performs no key operations.
    Contributor,
}

/// One protocol participant: its identity, its private input vector and,
/// after share distribution, its quarter of the share set.
#[derive(Debug, Clone)]
pub struct Party {
    id: PartyId,
    vector: Vec<i64>,
    shares: Option<Vec<u64>>,
}

impl Party {
    pub(crate) fn new(id: PartyId, vector: Vec<i64>) -> Self {
        Party {
            id,
            vector,
            shares: None,
        }
    }

    /// The party's identity.
    pub fn id(&self) -> PartyId {
        self.id
    }

    /// The party's private input vector.
    pub fn vector(&self) -> &[i64] {
        &self.vector
    }

    /// The share slice assigned to this party, once share distribution has
    /// run.
    pub fn shares(&self) -> Option<&[u64]> {
        self.shares.as_deref()
    }

    pub(crate) fn set_shares(&mut self, shares: Vec<u64>) {
        self.shares = Some(shares);
    }
}
