//! Authorization for simulated calls.

use peergov_core::{Authority, AuthorityError};
use peergov_types::{Address, PeerPubkey};
use std::collections::BTreeSet;

/// Resolves the operator as the address controlled by the bookkeeper set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookkeeperOperator {
    bookkeepers: Vec<PeerPubkey>,
}

impl BookkeeperOperator {
    pub fn new(bookkeepers: Vec<PeerPubkey>) -> Self {
        Self { bookkeepers }
    }

    pub fn bookkeepers(&self) -> &[PeerPubkey] {
        &self.bookkeepers
    }

    /// The operator address. Fails for an empty bookkeeper set.
    pub fn operator(&self) -> Result<Address, AuthorityError> {
        Address::from_bookkeepers(&self.bookkeepers)
            .ok_or_else(|| AuthorityError::OperatorUnavailable("no bookkeepers".into()))
    }
}

/// The authority seen by one call: who signed it, and who the operator is.
pub struct CallAuthority<'a> {
    operator: &'a BookkeeperOperator,
    signers: BTreeSet<Address>,
}

impl<'a> CallAuthority<'a> {
    pub fn new(operator: &'a BookkeeperOperator, signers: &[Address]) -> Self {
        Self {
            operator,
            signers: signers.iter().copied().collect(),
        }
    }
}

impl Authority for CallAuthority<'_> {
    fn is_authorized(&self, address: &Address) -> bool {
        self.signers.contains(address)
    }

    fn current_operator(&self) -> Result<Address, AuthorityError> {
        self.operator.operator()
    }
}
