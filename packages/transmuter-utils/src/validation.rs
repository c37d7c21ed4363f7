use std::collections::BTreeSet;

use cosmwasm_std::{ensure, Api};

use crate::{
    coin::{Coin, Extensions},
    error::TransmuterError,
    msg::{ExecuteMsg, InstantiateMsg, QueryMsg},
};

/// Smallest pool that has something to transmute into.
pub const MIN_POOL_ASSET_DENOMS: usize = 2;

/// Checks that go beyond the wire shape. Run before sending a message to the
/// contract, or on the contract side after decoding one.
pub trait TransmuterMsgValidation {
    fn validate(&self, api: &dyn Api) -> Result<(), TransmuterError>;
}

impl TransmuterMsgValidation for Coin {
    fn validate(&self, _api: &dyn Api) -> Result<(), TransmuterError> {
        ensure_no_reserved_keys(&self.extensions, &["amount", "denom"])?;
        ensure!(!self.denom.is_empty(), TransmuterError::EmptyDenom);
        Ok(())
    }
}

impl TransmuterMsgValidation for InstantiateMsg {
    fn validate(&self, _api: &dyn Api) -> Result<(), TransmuterError> {
        ensure_no_reserved_keys(&self.extensions, &["pool_asset_denoms"])?;
        ensure!(
            self.pool_asset_denoms.len() >= MIN_POOL_ASSET_DENOMS,
            TransmuterError::NotEnoughPoolAssets {
                min: MIN_POOL_ASSET_DENOMS,
                actual: self.pool_asset_denoms.len(),
            }
        );
        ensure_unique_denoms(self.pool_asset_denoms.iter().map(String::as_str))
    }
}

impl TransmuterMsgValidation for ExecuteMsg {
    fn validate(&self, api: &dyn Api) -> Result<(), TransmuterError> {
        match self {
            ExecuteMsg::JoinPool(_) => Ok(()),
            ExecuteMsg::Transmute(msg) => {
                ensure_no_reserved_keys(&msg.extensions, &["token_out_denom"])?;
                ensure!(!msg.token_out_denom.is_empty(), TransmuterError::EmptyDenom);
                Ok(())
            }
            ExecuteMsg::ExitPool(msg) => {
                ensure_no_reserved_keys(&msg.extensions, &["tokens_out"])?;
                for coin in &msg.tokens_out {
                    coin.validate(api)?;
                }
                ensure_unique_denoms(msg.tokens_out.iter().map(|coin| coin.denom.as_str()))
            }
        }
    }
}

impl TransmuterMsgValidation for QueryMsg {
    fn validate(&self, api: &dyn Api) -> Result<(), TransmuterError> {
        match self {
            QueryMsg::Pool {} => Ok(()),
            QueryMsg::Shares { address } => {
                api.addr_validate(address)?;
                Ok(())
            }
        }
    }
}

// A shadowing key would be written twice on encoding
fn ensure_no_reserved_keys(
    extensions: &Extensions,
    fields: &[&str],
) -> Result<(), TransmuterError> {
    match fields.iter().find(|field| extensions.contains_key(**field)) {
        Some(field) => Err(TransmuterError::ReservedExtensionKey {
            key: field.to_string(),
        }),
        None => Ok(()),
    }
}

fn ensure_unique_denoms<'a>(denoms: impl Iterator<Item = &'a str>) -> Result<(), TransmuterError> {
    let mut seen = BTreeSet::new();
    for denom in denoms {
        ensure!(!denom.is_empty(), TransmuterError::EmptyDenom);
        ensure!(
            seen.insert(denom),
            TransmuterError::DuplicateDenom {
                denom: denom.to_string()
            }
        );
    }
    Ok(())
}
