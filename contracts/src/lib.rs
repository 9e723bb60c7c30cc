/*!
# Compact ERC-721A Ledger

An in-memory ERC-721A ownership and mint ledger. Token ids are assigned
sequentially and ownership is recorded once per mint batch, so minting many
tokens at once costs a single ownership record. Ownership, balance and approval
lookups stay cheap regardless of the total supply.

The ledger is a plain owned value. Whoever hosts it supplies the caller of each
operation and serializes mutations, e.g. through
[`token::erc721a::SharedErc721A`].

## Usage

```rust
use alloy_primitives::{address, uint};
use erc721a_kernel::token::erc721a::{Erc721A, Erc721AConfig, IErc721A};

let alice = address!("A11CEacF9aa32246d767FCCD72e02d6bCbcC375d");
let bob = address!("F4EaCDAbEf3c8f1EdE91b6f2A6840bc2E4DD3526");

let mut ledger = Erc721A::new(Erc721AConfig::new("Azuki", "AZUKI"));
ledger._mint(alice, uint!(10_U256))?;
ledger.transfer_from(alice, alice, bob, uint!(4_U256))?;

assert_eq!(ledger.owner_of(uint!(4_U256))?, bob);
assert_eq!(ledger.balance_of(alice)?, uint!(9_U256));
assert_eq!(ledger.total_supply(), uint!(10_U256));
# Ok::<(), erc721a_kernel::token::erc721a::Error>(())
```

Every failing operation returns a distinct [`token::erc721a::Error`] and
leaves the ledger untouched. State transitions are reported as `tracing`
events on the `erc721a` target.
*/

#![allow(clippy::module_name_repetitions, clippy::used_underscore_items)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod token;
