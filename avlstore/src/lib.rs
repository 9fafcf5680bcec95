//! Height-balanced (AVL) search trees keyed by short strings.
//!
//! - [`AvlTree`]: the engine. Unique keys, O(log n) search/insert/delete.
//! - [`ScoreStore`]: scores in an `AvlTree` plus running count, mean and population standard
//!   deviation, and a consuming merge between stores.
//! - [`StringSet`]: string membership on the same engine.
//!
//! Everything is single threaded and exclusively owned; callers sharing a structure across
//! threads must serialize access themselves.

pub mod error;
pub mod keys;
mod node;
pub mod record;
pub mod set;
pub mod stats;
pub mod store;
pub mod summary;
pub mod tree;
pub mod walk;

pub use error::{IdentifierError, InvariantError};
pub use keys::MAX_IDENTIFIER_LEN;
pub use keys::identifier::Identifier;
pub use record::{Grade, Record};
pub use set::{SET_SENTINEL, StringSet};
pub use stats::{TreeStats, TreeStatsTrait};
pub use store::ScoreStore;
pub use summary::{Moments, Summary};
pub use tree::AvlTree;
pub use walk::Order;
