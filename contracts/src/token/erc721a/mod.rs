//! Implementation of a compact ERC-721A ownership and mint ledger.
//!
//! [`Erc721A`] assigns token ids sequentially and records ownership per mint
//! batch rather than per token, so minting `n` tokens stores a single
//! ownership record. Ownership lookups scan backward to the nearest explicit
//! record, see [`ownership`] for the layout.
//!
//! Every mutating operation checks all of its preconditions before touching
//! the state. A returned [`Error`] means nothing changed.
use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolError;
use derive_more::From;
use tracing::debug;

mod address_data;
pub mod config;
pub mod extensions;
pub mod ownership;
pub mod shared;

pub use address_data::AddressData;
pub use config::Erc721AConfig;
pub use ownership::{Ownerships, TokenOwnership};
pub use shared::SharedErc721A;

pub use sol::*;
#[cfg_attr(coverage_nightly, coverage(off))]
mod sol {
    use alloy_sol_macro::sol;

    sol! {
        /// Indicates a `token_id` that was never minted or has been burned.
        ///
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721ANonexistentToken(uint256 token_id);

        /// Indicates a balance query for `Address::ZERO`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721ABalanceQueryForZeroAddress();

        /// Indicates that `from` is not the owner of `token_id`.
        ///
        /// * `from` - Address the token was expected to be owned by.
        /// * `token_id` - Token id as a number.
        /// * `owner` - Actual owner of the token.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721ATransferFromIncorrectOwner(
            address from,
            uint256 token_id,
            address owner
        );

        /// Indicates that `caller` may not transfer or burn `token_id`.
        ///
        /// * `caller` - Account attempting the operation.
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721ATransferCallerNotOwnerNorApproved(
            address caller,
            uint256 token_id
        );

        /// Indicates a transfer of `token_id` to `Address::ZERO`.
        ///
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721ATransferToZeroAddress(uint256 token_id);

        /// Indicates that `caller` may not approve spenders for `token_id`.
        ///
        /// * `caller` - Account attempting the approval.
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721AApprovalCallerNotOwnerNorApproved(
            address caller,
            uint256 token_id
        );

        /// Indicates an approval of `token_id` for its own `owner`.
        ///
        /// * `owner` - Owner of the token.
        /// * `token_id` - Token id as a number.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721AApprovalToCurrentOwner(address owner, uint256 token_id);

        /// Indicates that `caller` tried to make itself its own operator.
        ///
        /// * `caller` - Account attempting the approval.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721AApproveToCaller(address caller);

        /// Indicates a mint to `Address::ZERO`.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721AMintToZeroAddress();

        /// Indicates a mint of zero tokens.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721AMintZeroQuantity();

        /// Indicates a mint larger than the configured batch size.
        ///
        /// * `batch_size` - Requested number of tokens.
        /// * `max_batch` - Maximum number of tokens per mint.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721AExceededMaxBatchMint(
            uint256 batch_size,
            uint256 max_batch
        );

        /// Indicates a mint that would run past the last representable id.
        ///
        /// * `next_token_id` - Id the mint would start at.
        /// * `quantity` - Requested number of tokens.
        #[derive(Debug)]
        #[allow(missing_docs)]
        error ERC721ATokenIdOverflow(uint256 next_token_id, uint256 quantity);
    }
}

/// An [`Erc721A`] error.
///
/// Each variant wraps the Solidity error a host would revert with. Converting
/// an [`Error`] into `Vec<u8>` yields its ABI-encoded revert data.
#[derive(From, Debug)]
pub enum Error {
    /// Indicates a token that was never minted or has been burned.
    NonexistentToken(ERC721ANonexistentToken),
    /// Indicates a balance query for `Address::ZERO`.
    BalanceQueryForZeroAddress(ERC721ABalanceQueryForZeroAddress),
    /// Indicates that the sender is not the owner of the token.
    TransferFromIncorrectOwner(ERC721ATransferFromIncorrectOwner),
    /// Indicates that the caller may not transfer or burn the token.
    TransferCallerNotOwnerNorApproved(ERC721ATransferCallerNotOwnerNorApproved),
    /// Indicates a transfer to `Address::ZERO`.
    TransferToZeroAddress(ERC721ATransferToZeroAddress),
    /// Indicates that the caller may not approve spenders for the token.
    ApprovalCallerNotOwnerNorApproved(ERC721AApprovalCallerNotOwnerNorApproved),
    /// Indicates an approval of a token for its own owner.
    ApprovalToCurrentOwner(ERC721AApprovalToCurrentOwner),
    /// Indicates an operator approval of the caller for itself.
    ApproveToCaller(ERC721AApproveToCaller),
    /// Indicates a mint to `Address::ZERO`.
    MintToZeroAddress(ERC721AMintToZeroAddress),
    /// Indicates a mint of zero tokens.
    MintZeroQuantity(ERC721AMintZeroQuantity),
    /// Indicates a mint larger than the configured batch size.
    ExceededMaxBatchMint(ERC721AExceededMaxBatchMint),
    /// Indicates a mint that would run past the last representable id.
    TokenIdOverflow(ERC721ATokenIdOverflow),
}

impl From<Error> for Vec<u8> {
    fn from(value: Error) -> Vec<u8> {
        match value {
            Error::NonexistentToken(e) => e.abi_encode(),
            Error::BalanceQueryForZeroAddress(e) => e.abi_encode(),
            Error::TransferFromIncorrectOwner(e) => e.abi_encode(),
            Error::TransferCallerNotOwnerNorApproved(e) => e.abi_encode(),
            Error::TransferToZeroAddress(e) => e.abi_encode(),
            Error::ApprovalCallerNotOwnerNorApproved(e) => e.abi_encode(),
            Error::ApprovalToCurrentOwner(e) => e.abi_encode(),
            Error::ApproveToCaller(e) => e.abi_encode(),
            Error::MintToZeroAddress(e) => e.abi_encode(),
            Error::MintZeroQuantity(e) => e.abi_encode(),
            Error::ExceededMaxBatchMint(e) => e.abi_encode(),
            Error::TokenIdOverflow(e) => e.abi_encode(),
        }
    }
}

/// Required interface of an ERC-721 compliant ledger.
///
/// The caller identity is passed explicitly. Authenticating it is the job of
/// whoever invokes the ledger.
pub trait IErc721A {
    /// The error type associated to this trait implementation.
    type Error: Into<Vec<u8>>;

    /// Returns the number of tokens in existence, i.e. minted and not burned.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    fn total_supply(&self) -> U256;

    /// Returns the number of tokens in `owner`'s account.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    /// * `owner` - Account of the token's owner.
    ///
    /// # Errors
    ///
    /// * [`Error::BalanceQueryForZeroAddress`] - If owner address is
    ///   `Address::ZERO`.
    fn balance_of(&self, owner: Address) -> Result<U256, Self::Error>;

    /// Returns the owner of the `token_id` token.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    fn owner_of(&self, token_id: U256) -> Result<Address, Self::Error>;

    /// Transfers `token_id` token from `from` to `to` on behalf of `caller`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `caller` - Account performing the transfer.
    /// * `from` - Account of the sender.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    /// * [`Error::TransferFromIncorrectOwner`] - If the owner is not `from`.
    /// * [`Error::TransferToZeroAddress`] - If `to` is `Address::ZERO`.
    /// * [`Error::TransferCallerNotOwnerNorApproved`] - If `caller` is neither
    ///   `from`, approved for `token_id`, nor an operator of `from`.
    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Gives permission to `to` to transfer `token_id` token to another
    /// account. The approval is cleared when the token is transferred.
    ///
    /// Only a single account can be approved at a time, so approving
    /// `Address::ZERO` clears previous approvals.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `caller` - Account granting the approval.
    /// * `to` - Account to approve.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    /// * [`Error::ApprovalToCurrentOwner`] - If `to` owns the token.
    /// * [`Error::ApprovalCallerNotOwnerNorApproved`] - If `caller` is neither
    ///   the owner nor an operator of the owner.
    fn approve(
        &mut self,
        caller: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Self::Error>;

    /// Approve or remove `operator` as an operator for `caller`.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `caller` - Account whose tokens `operator` may manage.
    /// * `operator` - Account to add to the set of authorized operators.
    /// * `approved` - Whether permission is granted or revoked.
    ///
    /// # Errors
    ///
    /// * [`Error::ApproveToCaller`] - If `operator` is `caller`.
    fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), Self::Error>;

    /// Returns the account approved for `token_id` token, `Address::ZERO` if
    /// none.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    fn get_approved(&self, token_id: U256) -> Result<Address, Self::Error>;

    /// Returns whether `operator` is allowed to manage all the assets of
    /// `owner`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    /// * `owner` - Account of the token's owner.
    /// * `operator` - Account to be checked.
    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;
}

/// State of an [`Erc721A`] ledger.
#[derive(Clone, Debug, Default)]
pub struct Erc721A {
    config: Erc721AConfig,
    /// Next token id to be minted.
    current_index: u64,
    burn_counter: u64,
    ownerships: Ownerships,
    address_data: HashMap<Address, AddressData>,
    token_approvals: HashMap<U256, Address>,
    operator_approvals: HashMap<Address, HashMap<Address, bool>>,
}

impl IErc721A for Erc721A {
    type Error = Error;

    fn total_supply(&self) -> U256 {
        let minted = self.current_index - self.config.start_token_id;
        U256::from(minted - self.burn_counter)
    }

    fn balance_of(&self, owner: Address) -> Result<U256, Error> {
        if owner.is_zero() {
            return Err(ERC721ABalanceQueryForZeroAddress {}.into());
        }
        Ok(U256::from(self.address_data(owner).balance))
    }

    fn owner_of(&self, token_id: U256) -> Result<Address, Error> {
        self.ownership_of(token_id).map(|ownership| ownership.addr)
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        let (index, previous) = self._check_transfer(from, to, token_id)?;
        if !self._is_approved_or_owner(from, caller, token_id) {
            return Err(ERC721ATransferCallerNotOwnerNorApproved {
                caller,
                token_id,
            }
            .into());
        }
        self._update(index, previous, to, token_id);
        Ok(())
    }

    fn approve(
        &mut self,
        caller: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        let owner = self.owner_of(token_id)?;
        if to == owner {
            return Err(
                ERC721AApprovalToCurrentOwner { owner, token_id }.into()
            );
        }
        if caller != owner && !self.is_approved_for_all(owner, caller) {
            return Err(ERC721AApprovalCallerNotOwnerNorApproved {
                caller,
                token_id,
            }
            .into());
        }
        self._approve(owner, to, token_id);
        Ok(())
    }

    fn set_approval_for_all(
        &mut self,
        caller: Address,
        operator: Address,
        approved: bool,
    ) -> Result<(), Error> {
        if operator == caller {
            return Err(ERC721AApproveToCaller { caller }.into());
        }
        self.operator_approvals
            .entry(caller)
            .or_default()
            .insert(operator, approved);
        debug!(
            target: "erc721a",
            owner = %caller,
            operator = %operator,
            approved,
            "ApprovalForAll"
        );
        Ok(())
    }

    fn get_approved(&self, token_id: U256) -> Result<Address, Error> {
        self.ownership_of(token_id)?;
        Ok(self._get_approved(token_id))
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals
            .get(&owner)
            .and_then(|operators| operators.get(&operator))
            .copied()
            .unwrap_or_default()
    }
}

impl Erc721A {
    /// Creates an empty ledger.
    ///
    /// # Arguments
    ///
    /// * `config` - Collection parameters, see [`Erc721AConfig`].
    #[must_use]
    pub fn new(config: Erc721AConfig) -> Self {
        Self {
            current_index: config.start_token_id,
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration the ledger was created with.
    #[must_use]
    pub fn config(&self) -> &Erc721AConfig {
        &self.config
    }

    /// Returns the id of the first token ever minted.
    #[must_use]
    pub fn start_token_id(&self) -> U256 {
        U256::from(self.config.start_token_id)
    }

    /// Returns the id the next mint will start at.
    #[must_use]
    pub fn next_token_id(&self) -> U256 {
        U256::from(self.current_index)
    }

    /// Returns the number of tokens ever minted.
    #[must_use]
    pub fn total_minted(&self) -> U256 {
        U256::from(self.current_index - self.config.start_token_id)
    }

    /// Returns the number of tokens ever burned.
    #[must_use]
    pub fn total_burned(&self) -> U256 {
        U256::from(self.burn_counter)
    }

    /// Returns the number of tokens ever minted to `owner`.
    #[must_use]
    pub fn number_minted(&self, owner: Address) -> U256 {
        U256::from(self.address_data(owner).number_minted)
    }

    /// Returns the number of tokens of `owner` ever burned.
    #[must_use]
    pub fn number_burned(&self, owner: Address) -> U256 {
        U256::from(self.address_data(owner).number_burned)
    }

    /// Returns the auxiliary value stored for `owner`.
    #[must_use]
    pub fn get_aux(&self, owner: Address) -> u64 {
        self.address_data(owner).aux
    }

    /// Stores an auxiliary value for `owner`.
    ///
    /// The value is opaque to the ledger and leaves every counter of `owner`
    /// untouched. Restricting who may set it is up to the caller.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `owner` - Account the value is stored for.
    /// * `aux` - Value to store.
    pub fn set_aux(&mut self, owner: Address, aux: u64) {
        self.address_data.entry(owner).or_default().aux = aux;
    }

    /// Returns the aggregate data of `owner`, zeroed if the account never
    /// held a token.
    #[must_use]
    pub fn address_data(&self, owner: Address) -> AddressData {
        self.address_data.get(&owner).copied().unwrap_or_default()
    }

    /// Returns whether `token_id` was minted and not burned.
    #[must_use]
    pub fn exists(&self, token_id: U256) -> bool {
        self.ownership_of(token_id).is_ok()
    }

    /// Returns the resolved ownership of `token_id`.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    pub fn ownership_of(
        &self,
        token_id: U256,
    ) -> Result<TokenOwnership, Error> {
        self._resolve(token_id).map(|(_, ownership)| ownership)
    }

    /// Returns the record explicitly stored for `token_id`, `None` if the
    /// slot is implicit or the token was never minted.
    #[must_use]
    pub fn ownership_at(&self, token_id: U256) -> Option<TokenOwnership> {
        self._index_of(token_id).and_then(|index| self.ownerships.get(index))
    }

    /// Returns the ownership of `token_id` without failing.
    ///
    /// Burned tokens yield their burned record and tokens that were never
    /// minted yield the empty record.
    #[must_use]
    pub fn explicit_ownership_of(&self, token_id: U256) -> TokenOwnership {
        self._index_of(token_id)
            .and_then(|index| self.ownerships.resolve(index))
            .map(|(_, ownership)| ownership)
            .unwrap_or_default()
    }

    /// Writes the resolved owner of `token_id` into its slot, so that later
    /// lookups do not need to scan. Explicit slots are left untouched.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    pub fn initialize_ownership_at(
        &mut self,
        token_id: U256,
    ) -> Result<(), Error> {
        let (index, ownership) = self._resolve(token_id)?;
        if self.ownerships.get(index).is_none() {
            self.ownerships.set(index, TokenOwnership::owned(ownership.addr));
        }
        Ok(())
    }

    /// Mints `quantity` consecutive tokens to `to`, starting at
    /// [`Self::next_token_id`].
    ///
    /// A single ownership record is written for the whole batch.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `to` - Account of the recipient.
    /// * `quantity` - Number of tokens to mint.
    ///
    /// # Errors
    ///
    /// * [`Error::MintToZeroAddress`] - If `to` is `Address::ZERO`.
    /// * [`Error::MintZeroQuantity`] - If `quantity` is zero.
    /// * [`Error::ExceededMaxBatchMint`] - If `quantity` exceeds
    ///   [`Erc721AConfig::max_batch_size`].
    /// * [`Error::TokenIdOverflow`] - If the last id would not be
    ///   representable.
    pub fn _mint(&mut self, to: Address, quantity: U256) -> Result<(), Error> {
        if to.is_zero() {
            return Err(ERC721AMintToZeroAddress {}.into());
        }
        if quantity.is_zero() {
            return Err(ERC721AMintZeroQuantity {}.into());
        }

        let max_batch = self.config.max_batch_size;
        let count = u64::try_from(quantity)
            .ok()
            .filter(|count| *count <= max_batch)
            .ok_or_else(|| ERC721AExceededMaxBatchMint {
                batch_size: quantity,
                max_batch: U256::from(max_batch),
            })?;

        let first = self.current_index;
        let Some(end) = first.checked_add(count) else {
            return Err(ERC721ATokenIdOverflow {
                next_token_id: U256::from(first),
                quantity,
            }
            .into());
        };

        // Per-address counters never exceed the number of minted ids, which
        // is bounded by `end`.
        let data = self.address_data.entry(to).or_default();
        data.balance += count;
        data.number_minted += count;
        self.ownerships.push_batch(to, count);
        self.current_index = end;

        debug!(
            target: "erc721a",
            from_token_id = first,
            to_token_id = end - 1,
            to = %to,
            "ConsecutiveTransfer"
        );
        Ok(())
    }

    /// Transfers `token_id` from `from` to `to`.
    ///
    /// As opposed to [`IErc721A::transfer_from`], this imposes no
    /// restrictions on the caller.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `from` - Account of the sender.
    /// * `to` - Account of the recipient.
    /// * `token_id` - Token id as a number.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    /// * [`Error::TransferFromIncorrectOwner`] - If the owner is not `from`.
    /// * [`Error::TransferToZeroAddress`] - If `to` is `Address::ZERO`.
    pub fn _transfer(
        &mut self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(), Error> {
        let (index, previous) = self._check_transfer(from, to, token_id)?;
        self._update(index, previous, to, token_id);
        Ok(())
    }

    /// Destroys `token_id`.
    ///
    /// If `auth` is set, it must be the owner of the token, approved for it,
    /// or an operator of the owner. The approval is cleared when the token is
    /// burned.
    ///
    /// # Arguments
    ///
    /// * `&mut self` - Write access to the ledger's state.
    /// * `token_id` - Token id as a number.
    /// * `auth` - Account used for authorization of the burn, if any.
    ///
    /// # Errors
    ///
    /// * [`Error::NonexistentToken`] - If the token does not exist.
    /// * [`Error::TransferCallerNotOwnerNorApproved`] - If `auth` may not
    ///   operate on the token.
    pub fn _burn(
        &mut self,
        token_id: U256,
        auth: Option<Address>,
    ) -> Result<(), Error> {
        let (index, previous) = self._resolve(token_id)?;
        let from = previous.addr;

        if let Some(caller) = auth {
            if !self._is_approved_or_owner(from, caller, token_id) {
                return Err(ERC721ATransferCallerNotOwnerNorApproved {
                    caller,
                    token_id,
                }
                .into());
            }
        }

        self.token_approvals.remove(&token_id);
        let data = self.address_data.entry(from).or_default();
        data.balance -= 1;
        data.number_burned += 1;
        self.ownerships.anchor_next(index, previous);
        self.ownerships.set(index, TokenOwnership::burned(from));
        self.burn_counter += 1;

        debug!(
            target: "erc721a",
            from = %from,
            to = %Address::ZERO,
            token_id = %token_id,
            "Transfer"
        );
        Ok(())
    }

    /// Returns the approved address for `token_id`, `Address::ZERO` if none
    /// or if the token does not exist.
    #[must_use]
    pub fn _get_approved(&self, token_id: U256) -> Address {
        self.token_approvals.get(&token_id).copied().unwrap_or_default()
    }

    /// Returns whether `spender` may operate on `owner`'s `token_id`.
    ///
    /// WARNING: This function assumes that `owner` is the actual owner of
    /// `token_id` and does not verify this assumption.
    ///
    /// # Arguments
    ///
    /// * `&self` - Read access to the ledger's state.
    /// * `owner` - Account of the token's owner.
    /// * `spender` - Account that will spend the token.
    /// * `token_id` - Token id as a number.
    #[must_use]
    pub fn _is_approved_or_owner(
        &self,
        owner: Address,
        spender: Address,
        token_id: U256,
    ) -> bool {
        !spender.is_zero()
            && (owner == spender
                || self.is_approved_for_all(owner, spender)
                || self._get_approved(token_id) == spender)
    }

    /// Converts `token_id` into its slot index, `None` if the token was never
    /// minted.
    fn _index_of(&self, token_id: U256) -> Option<u64> {
        let id = u64::try_from(token_id).ok()?;
        if id < self.config.start_token_id || id >= self.current_index {
            return None;
        }
        Some(id - self.config.start_token_id)
    }

    /// Resolves the live ownership of `token_id` together with its slot
    /// index.
    fn _resolve(
        &self,
        token_id: U256,
    ) -> Result<(u64, TokenOwnership), Error> {
        self._index_of(token_id)
            .and_then(|index| {
                let (_, ownership) = self.ownerships.resolve(index)?;
                (!ownership.burned).then_some((index, ownership))
            })
            .ok_or_else(|| ERC721ANonexistentToken { token_id }.into())
    }

    /// Checks the caller-independent preconditions of a transfer.
    fn _check_transfer(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<(u64, TokenOwnership), Error> {
        let (index, previous) = self._resolve(token_id)?;
        if previous.addr != from {
            return Err(ERC721ATransferFromIncorrectOwner {
                from,
                token_id,
                owner: previous.addr,
            }
            .into());
        }
        if to.is_zero() {
            return Err(ERC721ATransferToZeroAddress { token_id }.into());
        }
        Ok((index, previous))
    }

    /// Moves the token at slot `index` from its `previous` owner to `to`.
    /// Every precondition must already hold.
    fn _update(
        &mut self,
        index: u64,
        previous: TokenOwnership,
        to: Address,
        token_id: U256,
    ) {
        let from = previous.addr;

        self.token_approvals.remove(&token_id);
        self.address_data.entry(from).or_default().balance -= 1;
        self.address_data.entry(to).or_default().balance += 1;

        self.ownerships.anchor_next(index, previous);
        self.ownerships.set(index, TokenOwnership::owned(to));

        debug!(
            target: "erc721a",
            from = %from,
            to = %to,
            token_id = %token_id,
            "Transfer"
        );
    }

    /// Sets the approval of `token_id` to `to`, clearing it for
    /// `Address::ZERO`.
    fn _approve(&mut self, owner: Address, to: Address, token_id: U256) {
        if to.is_zero() {
            self.token_approvals.remove(&token_id);
        } else {
            self.token_approvals.insert(token_id, to);
        }
        debug!(
            target: "erc721a",
            owner = %owner,
            approved = %to,
            token_id = %token_id,
            "Approval"
        );
    }
}
