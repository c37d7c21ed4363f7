// The shapes here mirror the public API of the Osmosis transmuter contract
// (https://github.com/osmosis-labs/transmuter). Field names are dictated by that contract.
use cosmwasm_std::{to_json_binary, Coin, CosmosMsg, StdResult, WasmMsg};

pub mod coin;
pub mod error;
pub mod msg;
pub mod queries;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(test)]
mod tests;

pub use coin::{Extensions, TokenAmount};
pub use validation::TransmuterMsgValidation;

use msg::{ExecuteMsg, InstantiateMsg};

// Deposits `funds` into the pool in exchange for shares
pub fn join_pool_msg(contract: impl Into<String>, funds: Vec<Coin>) -> StdResult<CosmosMsg> {
    execute_msg(contract, &ExecuteMsg::join_pool(), funds)
}

// Swaps the single coin in `funds` for the same amount of `token_out_denom`
pub fn transmute_msg(
    contract: impl Into<String>,
    token_out_denom: impl Into<String>,
    funds: Vec<Coin>,
) -> StdResult<CosmosMsg> {
    execute_msg(contract, &ExecuteMsg::transmute(token_out_denom), funds)
}

// Burns shares of the sender for the listed pool assets
pub fn exit_pool_msg(
    contract: impl Into<String>,
    tokens_out: Vec<coin::Coin>,
) -> StdResult<CosmosMsg> {
    execute_msg(contract, &ExecuteMsg::exit_pool(tokens_out), vec![])
}

pub fn execute_msg(
    contract: impl Into<String>,
    msg: &ExecuteMsg,
    funds: Vec<Coin>,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: contract.into(),
        msg: to_json_binary(msg)?,
        funds,
    }))
}

pub fn instantiate_msg(
    code_id: u64,
    admin: Option<String>,
    label: impl Into<String>,
    pool_asset_denoms: Vec<String>,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Instantiate {
        admin,
        code_id,
        msg: to_json_binary(&InstantiateMsg::new(pool_asset_denoms))?,
        funds: vec![],
        label: label.into(),
    }))
}
