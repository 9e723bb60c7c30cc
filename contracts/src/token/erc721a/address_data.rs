//! Per-address aggregate counters.

/// Aggregate data of an account that has minted or received tokens.
///
/// Field widths follow the packed address-data word of ERC-721A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AddressData {
    /// Number of tokens currently owned.
    pub balance: u64,
    /// Number of tokens ever minted to the account.
    pub number_minted: u64,
    /// Number of tokens of the account ever burned.
    pub number_burned: u64,
    /// Opaque value, never interpreted by the ledger.
    pub aux: u64,
}
