use thiserror::Error;

use crate::keys::identifier::Identifier;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is {len} bytes long, at most {max} are allowed")]
    TooLong { len: usize, max: usize },
}

/// A structural invariant that [`crate::tree::AvlTree::validate`] found broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("key {key} is out of order (expected strictly between {lower:?} and {upper:?})")]
    OutOfOrder {
        key: Identifier,
        lower: Option<Identifier>,
        upper: Option<Identifier>,
    },
    #[error("node {key} has balance factor {balance}")]
    Unbalanced { key: Identifier, balance: isize },
    #[error("node {key} records height {stored} but its children give {computed}")]
    HeightMismatch {
        key: Identifier,
        stored: usize,
        computed: usize,
    },
    #[error("tree reports {expected} entries but holds {counted}")]
    LenMismatch { expected: usize, counted: usize },
}
