//! Optional Metadata of the ERC-721A ledger.
use crate::token::erc721a::Erc721A;

/// Interface for the optional metadata functions from the ERC-721 standard.
pub trait IErc721AMetadata {
    /// Returns the token collection name.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    fn name(&self) -> String;

    /// Returns token collection symbol.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    fn symbol(&self) -> String;
}

impl IErc721AMetadata for Erc721A {
    fn name(&self) -> String {
        self.config().name.clone()
    }

    fn symbol(&self) -> String {
        self.config().symbol.clone()
    }
}
