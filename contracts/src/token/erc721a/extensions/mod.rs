//! Common extensions to the ERC-721A ledger.
pub mod burnable;
pub mod metadata;

pub use burnable::IErc721ABurnable;
pub use metadata::IErc721AMetadata;
