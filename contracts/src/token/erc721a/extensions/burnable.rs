//! Optional Burnable extension of the ERC-721A ledger.
use alloy_primitives::{Address, U256};

use crate::token::erc721a::{self, Erc721A};

/// An [`Erc721A`] ledger whose tokens can be burned (destroyed).
pub trait IErc721ABurnable {
    /// The error type associated to this trait implementation.
    type Error: Into<Vec<u8>>;

    /// Burns `token_id` on behalf of `caller`.
    /// The approval is cleared when the token is burned.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `caller` - Account performing the burn.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`erc721a::Error::NonexistentToken`] - If token does not exist.
    /// * [`erc721a::Error::TransferCallerNotOwnerNorApproved`] - If `caller`
    ///   is neither the owner, approved for the token, nor an operator of the
    ///   owner.
    fn burn(&mut self, caller: Address, token_id: U256)
        -> Result<(), Self::Error>;
}

impl IErc721ABurnable for Erc721A {
    type Error = erc721a::Error;

    fn burn(
        &mut self,
        caller: Address,
        token_id: U256,
    ) -> Result<(), Self::Error> {
        self._burn(token_id, Some(caller))
    }
}
