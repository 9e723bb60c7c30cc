//! Token standards.
pub mod erc721a;
