use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Decimal, Uint128};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::coin::{Coin, Extensions, TokenAmount};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct InstantiateMsg {
    pub pool_asset_denoms: Vec<String>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl InstantiateMsg {
    pub fn new(pool_asset_denoms: Vec<String>) -> Self {
        InstantiateMsg {
            pool_asset_denoms,
            extensions: Extensions::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    JoinPool(JoinPoolMsg),
    Transmute(TransmuteMsg),
    ExitPool(ExitPoolMsg),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
pub struct JoinPoolMsg {
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct TransmuteMsg {
    pub token_out_denom: String,
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ExitPoolMsg {
    pub tokens_out: Vec<Coin>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ExecuteMsg {
    pub fn join_pool() -> Self {
        ExecuteMsg::JoinPool(JoinPoolMsg::default())
    }

    pub fn transmute(token_out_denom: impl Into<String>) -> Self {
        ExecuteMsg::Transmute(TransmuteMsg {
            token_out_denom: token_out_denom.into(),
            extensions: Extensions::new(),
        })
    }

    pub fn exit_pool(tokens_out: Vec<Coin>) -> Self {
        ExecuteMsg::ExitPool(ExitPoolMsg {
            tokens_out,
            extensions: Extensions::new(),
        })
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PoolResponse)]
    Pool {},
    /// Share balance of `address`
    #[returns(SharesResponse)]
    Shares { address: String },
}

/// Messages the chain's pool manager sends to the contract.
#[cw_serde]
pub enum SudoMsg {
    SetActive {
        is_active: bool,
    },
    /// Swaps an exact `token_in` for at least `token_out_min_amount` of `token_out_denom`.
    SwapExactAmountIn {
        sender: String,
        token_in: cosmwasm_std::Coin,
        token_out_denom: String,
        token_out_min_amount: Uint128,
        swap_fee: Decimal,
    },
    /// Swaps at most `token_in_max_amount` of `token_in_denom` for an exact `token_out`.
    SwapExactAmountOut {
        sender: String,
        token_in_denom: String,
        token_in_max_amount: Uint128,
        token_out: cosmwasm_std::Coin,
        swap_fee: Decimal,
    },
}

// Set as response data of the sudo swaps
#[cw_serde]
pub struct SwapExactAmountInResponseData {
    pub token_out_amount: Uint128,
}

#[cw_serde]
pub struct SwapExactAmountOutResponseData {
    pub token_in_amount: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
pub struct AdminResponse {
    /// `None` when the contract has no admin
    #[serde(default)]
    pub admin: Option<String>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct PoolResponse {
    pub pool: TransmuterPool,
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
pub struct TransmuterPool {
    pub pool_assets: Vec<Coin>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct SharesResponse {
    pub shares: TokenAmount,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl TransmuterPool {
    /// Empty pool holding a zero balance of every denom, in the given order.
    pub fn new(denoms: &[String]) -> Self {
        TransmuterPool {
            pool_assets: denoms
                .iter()
                .map(|denom| Coin::new(Uint128::zero(), denom.as_str()))
                .collect(),
            extensions: Extensions::new(),
        }
    }

    pub fn denoms(&self) -> impl Iterator<Item = &str> {
        self.pool_assets.iter().map(|coin| coin.denom.as_str())
    }

    pub fn contains_denom(&self, denom: &str) -> bool {
        self.denoms().any(|d| d == denom)
    }

    /// Zero for denoms outside the pool.
    pub fn balance_of(&self, denom: &str) -> TokenAmount {
        self.pool_assets
            .iter()
            .find(|coin| coin.denom == denom)
            .map(|coin| coin.amount)
            .unwrap_or_default()
    }

    pub(crate) fn asset_mut(&mut self, denom: &str) -> Option<&mut Coin> {
        self.pool_assets.iter_mut().find(|coin| coin.denom == denom)
    }
}
