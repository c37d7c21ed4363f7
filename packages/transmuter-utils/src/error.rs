use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TransmuterError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Denom must not be empty")]
    EmptyDenom,

    #[error("Extension key {key} shadows a declared field")]
    ReservedExtensionKey { key: String },

    #[error("Duplicate denom: {denom}")]
    DuplicateDenom { denom: String },

    #[error("Pool requires at least {min} asset denoms, got {actual}")]
    NotEnoughPoolAssets { min: usize, actual: usize },

    #[error("Funds must contain exactly one coin")]
    SingleCoinExpected,

    #[error("Funds must not be empty")]
    EmptyFunds,

    #[error("Denom {denom} is not part of the pool")]
    InvalidPoolAssetDenom { denom: String },

    #[error("Cannot transmute {denom} into itself")]
    SameDenomTransmute { denom: String },

    #[error("Insufficient pool asset {denom}: required {required}, available {available}")]
    InsufficientPoolAsset {
        denom: String,
        required: Uint128,
        available: Uint128,
    },

    #[error("Insufficient shares: required {required}, available {available}")]
    InsufficientShares {
        required: Uint128,
        available: Uint128,
    },
}
