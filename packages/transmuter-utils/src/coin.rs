use std::collections::BTreeMap;

use cosmwasm_std::Uint128;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Decimal digit string on the wire, e.g. `"1000000"`.
pub type TokenAmount = Uint128;

/// Fields the contract may add to a shape that this crate does not know about.
/// They are kept as-is and written back out on serialization.
pub type Extensions = BTreeMap<String, serde_json::Value>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct Coin {
    pub amount: TokenAmount,
    pub denom: String,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Coin {
    pub fn new(amount: impl Into<TokenAmount>, denom: impl Into<String>) -> Self {
        Coin {
            amount: amount.into(),
            denom: denom.into(),
            extensions: Extensions::new(),
        }
    }
}

impl From<cosmwasm_std::Coin> for Coin {
    fn from(coin: cosmwasm_std::Coin) -> Self {
        Coin::new(coin.amount, coin.denom)
    }
}

// Drops the extensions, bank coins have no room for them
impl From<Coin> for cosmwasm_std::Coin {
    fn from(coin: Coin) -> Self {
        cosmwasm_std::Coin {
            denom: coin.denom,
            amount: coin.amount,
        }
    }
}
