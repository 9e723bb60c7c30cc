//! Construction parameters of an [`super::Erc721A`] ledger.
use serde::{Deserialize, Serialize};

/// Default cap on the size of a single mint batch.
///
/// Mirrors the ERC-2309 consecutive-transfer limit, which keeps off-chain
/// indexers that record one entry per token within reasonable bounds.
pub const DEFAULT_MAX_BATCH_SIZE: u64 = 5000;

/// Configuration of an [`super::Erc721A`] ledger.
///
/// Every field is optional when deserializing, missing ones take their
/// [`Default`] value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Erc721AConfig {
    /// Token collection name.
    pub name: String,
    /// Token collection symbol.
    pub symbol: String,
    /// Id of the first minted token.
    pub start_token_id: u64,
    /// Maximum number of tokens a single mint may create.
    pub max_batch_size: u64,
}

impl Default for Erc721AConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            start_token_id: 0,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl Erc721AConfig {
    /// Creates a configuration for the collection `name` / `symbol` with
    /// default numbering.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self { name: name.into(), symbol: symbol.into(), ..Self::default() }
    }

    /// Sets the id of the first minted token.
    #[must_use]
    pub fn with_start_token_id(mut self, start_token_id: u64) -> Self {
        self.start_token_id = start_token_id;
        self
    }

    /// Sets the maximum number of tokens a single mint may create.
    #[must_use]
    pub fn with_max_batch_size(mut self, max_batch_size: u64) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }
}
