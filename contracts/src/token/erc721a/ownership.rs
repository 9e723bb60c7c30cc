//! Sparse ownership records for sequentially minted tokens.
//!
//! A batch mint writes a single explicit record at the first token of the
//! batch. Every other token of the batch stays implicit: its owner is the one
//! stored in the nearest explicit record at a lower index. Transfers and burns
//! write an explicit record at the touched token and, when the following token
//! would otherwise lose its anchor, at the following token as well.
//!
//! Slots are indexed by the token's offset from the first mintable id. Only
//! explicit records are stored, so a mint costs one record whatever its size.

use std::collections::BTreeMap;

use alloy_primitives::Address;

/// Ownership of a single token, as stored in an explicit slot or as resolved
/// through a backward scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenOwnership {
    /// Owner of the token. `Address::ZERO` for the empty record.
    pub addr: Address,
    /// Whether the record was written by a mint, i.e. heads a mint batch.
    pub mint_origin: bool,
    /// Whether the token has been burned.
    pub burned: bool,
}

impl TokenOwnership {
    /// Record written by a mint at the head of a batch.
    #[must_use]
    pub fn minted(addr: Address) -> Self {
        Self { addr, mint_origin: true, burned: false }
    }

    /// Record written when `addr` starts owning an already minted token.
    #[must_use]
    pub fn owned(addr: Address) -> Self {
        Self { addr, mint_origin: false, burned: false }
    }

    /// Record written when the token of `addr` is burned.
    #[must_use]
    pub fn burned(addr: Address) -> Self {
        Self { addr, mint_origin: false, burned: true }
    }
}

/// Explicit [`TokenOwnership`] records over a range of minted slots.
///
/// A minted slot without a record is implicit.
#[derive(Clone, Debug, Default)]
pub struct Ownerships {
    records: BTreeMap<u64, TokenOwnership>,
    len: u64,
}

impl Ownerships {
    /// Number of minted slots, explicit or implicit.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether no token has ever been minted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of explicit slots.
    #[must_use]
    pub fn explicit_len(&self) -> usize {
        self.records.len()
    }

    /// Appends a batch of `quantity` slots owned by `to`.
    ///
    /// Only the head of the batch is explicit. The caller guarantees that the
    /// new length fits in a `u64`.
    pub(crate) fn push_batch(&mut self, to: Address, quantity: u64) {
        if quantity == 0 {
            return;
        }
        self.records.insert(self.len, TokenOwnership::minted(to));
        self.len += quantity;
    }

    /// Returns the explicit record stored at `index`, if any.
    #[must_use]
    pub fn get(&self, index: u64) -> Option<TokenOwnership> {
        self.records.get(&index).copied()
    }

    /// Overwrites slot `index` with an explicit record.
    ///
    /// Returns `false`, and stores nothing, if `index` was never minted.
    pub(crate) fn set(
        &mut self,
        index: u64,
        ownership: TokenOwnership,
    ) -> bool {
        if index >= self.len {
            return false;
        }
        self.records.insert(index, ownership);
        true
    }

    /// Resolves slot `index` by scanning backward to the nearest explicit
    /// record. Returns the index of that record together with the record.
    ///
    /// Returns `None` if `index` was never minted.
    #[must_use]
    pub fn resolve(&self, index: u64) -> Option<(u64, TokenOwnership)> {
        if index >= self.len {
            return None;
        }
        self.records
            .range(..=index)
            .next_back()
            .map(|(anchor, ownership)| (*anchor, *ownership))
    }

    /// Keeps slot `index + 1` resolving to `previous` before slot `index` is
    /// overwritten.
    ///
    /// The following slot only needs an explicit record when it exists and is
    /// implicit, since its scan would otherwise stop at the new record written
    /// at `index`.
    pub(crate) fn anchor_next(&mut self, index: u64, previous: TokenOwnership) {
        let Some(next) = index.checked_add(1) else {
            return;
        };
        if next < self.len && self.get(next).is_none() {
            self.records.insert(next, TokenOwnership::owned(previous.addr));
        }
    }
}
