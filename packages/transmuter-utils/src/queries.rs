use cosmwasm_std::{
    to_json_binary, to_json_vec, Binary, ContractResult, CustomQuery, QuerierWrapper,
    QueryRequest, StdError, StdResult, SystemResult, Uint128, WasmQuery,
};
use serde::de::DeserializeOwned;

use crate::msg::{PoolResponse, QueryMsg, SharesResponse, TransmuterPool};

/// Decodes a contract response with `serde_json`. Unknown fields may carry
/// floats or integers wider than 64 bits, which the chain codec refuses.
pub fn decode_response<T: DeserializeOwned>(data: &[u8]) -> StdResult<T> {
    serde_json::from_slice(data)
        .map_err(|err| StdError::parse_err(std::any::type_name::<T>(), err))
}

pub fn query_pool<C>(
    querier: &QuerierWrapper<C>,
    contract: impl Into<String>,
) -> StdResult<TransmuterPool>
where
    C: CustomQuery,
{
    let data = query_smart_raw(querier, contract, &QueryMsg::Pool {})?;
    let res: PoolResponse = decode_response(&data)?;
    Ok(res.pool)
}

pub fn query_shares<C>(
    querier: &QuerierWrapper<C>,
    contract: impl Into<String>,
    address: impl Into<String>,
) -> StdResult<Uint128>
where
    C: CustomQuery,
{
    let data = query_smart_raw(
        querier,
        contract,
        &QueryMsg::Shares {
            address: address.into(),
        },
    )?;
    let res: SharesResponse = decode_response(&data)?;
    Ok(res.shares)
}

// Same as `query_wasm_smart`, minus the decoding
fn query_smart_raw<C>(
    querier: &QuerierWrapper<C>,
    contract: impl Into<String>,
    msg: &QueryMsg,
) -> StdResult<Binary>
where
    C: CustomQuery,
{
    let request: QueryRequest<C> = WasmQuery::Smart {
        contract_addr: contract.into(),
        msg: to_json_binary(msg)?,
    }
    .into();

    match querier.raw_query(&to_json_vec(&request)?) {
        SystemResult::Err(system_err) => Err(StdError::generic_err(format!(
            "Querier system error: {system_err}"
        ))),
        SystemResult::Ok(ContractResult::Err(contract_err)) => Err(StdError::generic_err(
            format!("Querier contract error: {contract_err}"),
        )),
        SystemResult::Ok(ContractResult::Ok(value)) => Ok(value),
    }
}
