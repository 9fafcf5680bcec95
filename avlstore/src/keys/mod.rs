pub mod identifier;

/// Longest identifier, in bytes. Longer input is truncated (see [`identifier::Identifier::new`]).
pub const MAX_IDENTIFIER_LEN: usize = 19;
