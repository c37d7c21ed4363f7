use anyhow::anyhow;
use cosmwasm_std::{coin, Addr, Coin, Empty, Uint128};
use cw_multi_test::{error::AnyResult, App, AppResponse, Contract, ContractWrapper, Executor};
use getset::Getters;

use crate::{
    exit_pool_msg, instantiate_msg, join_pool_msg,
    msg::{InstantiateMsg, TransmuterPool},
    queries::{query_pool, query_shares},
    transmute_msg,
};

/// Minimal in-process stand-in for the transmuter contract.
///
/// Every pool asset is worth the same: transmuting is 1:1 and joining mints one
/// share per unit deposited. Enough to drive the message types end to end.
pub mod mock_transmuter {
    use cosmwasm_std::{
        ensure, to_json_binary, Addr, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo, Response,
        StdError, StdResult, Uint128,
    };
    use cw_storage_plus::{Item, Map};

    use crate::{
        error::TransmuterError,
        msg::{ExecuteMsg, InstantiateMsg, PoolResponse, QueryMsg, SharesResponse, TransmuterPool},
        Extensions, TransmuterMsgValidation,
    };

    const POOL: Item<TransmuterPool> = Item::new("pool");
    const SHARES: Map<&Addr, Uint128> = Map::new("shares");

    pub fn instantiate(
        deps: DepsMut,
        _env: Env,
        _info: MessageInfo,
        msg: InstantiateMsg,
    ) -> Result<Response, TransmuterError> {
        msg.validate(deps.api)?;

        POOL.save(deps.storage, &TransmuterPool::new(&msg.pool_asset_denoms))?;

        Ok(Response::new()
            .add_attribute("method", "instantiate")
            .add_attribute("pool_asset_denoms", msg.pool_asset_denoms.join(",")))
    }

    pub fn execute(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        msg: ExecuteMsg,
    ) -> Result<Response, TransmuterError> {
        msg.validate(deps.api)?;

        match msg {
            ExecuteMsg::JoinPool(_) => join_pool(deps, info),
            ExecuteMsg::Transmute(msg) => transmute(deps, info, msg.token_out_denom),
            ExecuteMsg::ExitPool(msg) => exit_pool(
                deps,
                info,
                msg.tokens_out.into_iter().map(Into::into).collect(),
            ),
        }
    }

    fn join_pool(deps: DepsMut, info: MessageInfo) -> Result<Response, TransmuterError> {
        ensure!(!info.funds.is_empty(), TransmuterError::EmptyFunds);

        let mut pool = POOL.load(deps.storage)?;
        let mut minted = Uint128::zero();
        for fund in &info.funds {
            let asset = pool.asset_mut(&fund.denom).ok_or_else(|| {
                TransmuterError::InvalidPoolAssetDenom {
                    denom: fund.denom.clone(),
                }
            })?;
            asset.amount = asset.amount.checked_add(fund.amount).map_err(StdError::from)?;
            minted = minted.checked_add(fund.amount).map_err(StdError::from)?;
        }
        POOL.save(deps.storage, &pool)?;

        let shares = SHARES
            .may_load(deps.storage, &info.sender)?
            .unwrap_or_default()
            .checked_add(minted)
            .map_err(StdError::from)?;
        SHARES.save(deps.storage, &info.sender, &shares)?;

        deps.api
            .debug(&format!("{} joined pool, minted {minted} shares", info.sender));

        Ok(Response::new()
            .add_attribute("method", "join_pool")
            .add_attribute("shares_minted", minted.to_string()))
    }

    fn transmute(
        deps: DepsMut,
        info: MessageInfo,
        token_out_denom: String,
    ) -> Result<Response, TransmuterError> {
        ensure!(info.funds.len() == 1, TransmuterError::SingleCoinExpected);
        let token_in = &info.funds[0];
        ensure!(
            token_in.denom != token_out_denom,
            TransmuterError::SameDenomTransmute {
                denom: token_out_denom
            }
        );

        let mut pool = POOL.load(deps.storage)?;
        ensure!(
            pool.contains_denom(&token_in.denom),
            TransmuterError::InvalidPoolAssetDenom {
                denom: token_in.denom.clone()
            }
        );

        let asset_out = pool.asset_mut(&token_out_denom).ok_or_else(|| {
            TransmuterError::InvalidPoolAssetDenom {
                denom: token_out_denom.clone(),
            }
        })?;
        ensure!(
            asset_out.amount >= token_in.amount,
            TransmuterError::InsufficientPoolAsset {
                denom: token_out_denom.clone(),
                required: token_in.amount,
                available: asset_out.amount,
            }
        );
        asset_out.amount -= token_in.amount;

        if let Some(asset_in) = pool.asset_mut(&token_in.denom) {
            asset_in.amount = asset_in
                .amount
                .checked_add(token_in.amount)
                .map_err(StdError::from)?;
        }
        POOL.save(deps.storage, &pool)?;

        let token_out = cosmwasm_std::coin(token_in.amount.u128(), token_out_denom);
        deps.api
            .debug(&format!("transmuting {token_in} into {token_out}"));

        Ok(Response::new()
            .add_attribute("method", "transmute")
            .add_attribute("token_in", token_in.to_string())
            .add_attribute("token_out", token_out.to_string())
            .add_message(BankMsg::Send {
                to_address: info.sender.to_string(),
                amount: vec![token_out],
            }))
    }

    fn exit_pool(
        deps: DepsMut,
        info: MessageInfo,
        tokens_out: Vec<cosmwasm_std::Coin>,
    ) -> Result<Response, TransmuterError> {
        let mut pool = POOL.load(deps.storage)?;

        let mut burnt = Uint128::zero();
        for token in &tokens_out {
            let asset = pool.asset_mut(&token.denom).ok_or_else(|| {
                TransmuterError::InvalidPoolAssetDenom {
                    denom: token.denom.clone(),
                }
            })?;
            ensure!(
                asset.amount >= token.amount,
                TransmuterError::InsufficientPoolAsset {
                    denom: token.denom.clone(),
                    required: token.amount,
                    available: asset.amount,
                }
            );
            asset.amount -= token.amount;
            burnt = burnt.checked_add(token.amount).map_err(StdError::from)?;
        }

        let shares = SHARES
            .may_load(deps.storage, &info.sender)?
            .unwrap_or_default();
        ensure!(
            shares >= burnt,
            TransmuterError::InsufficientShares {
                required: burnt,
                available: shares,
            }
        );

        POOL.save(deps.storage, &pool)?;
        SHARES.save(deps.storage, &info.sender, &(shares - burnt))?;

        let mut response = Response::new()
            .add_attribute("method", "exit_pool")
            .add_attribute("shares_burnt", burnt.to_string());

        let tokens_out: Vec<_> = tokens_out
            .into_iter()
            .filter(|token| !token.amount.is_zero())
            .collect();
        if !tokens_out.is_empty() {
            response = response.add_message(BankMsg::Send {
                to_address: info.sender.to_string(),
                amount: tokens_out,
            });
        }

        Ok(response)
    }

    pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
        match msg {
            QueryMsg::Pool {} => to_json_binary(&PoolResponse {
                pool: POOL.load(deps.storage)?,
                extensions: Extensions::new(),
            }),
            QueryMsg::Shares { address } => {
                let address = deps.api.addr_validate(&address)?;
                to_json_binary(&SharesResponse {
                    shares: SHARES.may_load(deps.storage, &address)?.unwrap_or_default(),
                    extensions: Extensions::new(),
                })
            }
        }
    }
}

pub fn mock_transmuter_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        mock_transmuter::execute,
        mock_transmuter::instantiate,
        mock_transmuter::query,
    ))
}

#[derive(Getters)]
pub struct TransmuterTestSuite {
    #[getset(get = "pub")]
    app: App,
    #[getset(get = "pub")]
    owner: Addr,
    #[getset(get = "pub")]
    transmuter_code_id: u64,
}

impl TransmuterTestSuite {
    pub fn new(balances: &[(&str, Vec<Coin>)]) -> Self {
        let mut app = App::default();

        let owner = app.api().addr_make("owner");
        let accounts: Vec<(Addr, Vec<Coin>)> = balances
            .iter()
            .map(|(name, coins)| (app.api().addr_make(name), coins.clone()))
            .collect();

        app.init_modules(|router, _, store| {
            for (addr, coins) in accounts {
                router.bank.init_balance(store, &addr, coins).unwrap();
            }
        });

        let transmuter_code_id = app.store_code(mock_transmuter_contract());

        Self {
            app,
            owner,
            transmuter_code_id,
        }
    }

    pub fn addr(&self, name: &str) -> Addr {
        self.app.api().addr_make(name)
    }

    /// Instantiates through a raw `WasmMsg::Instantiate` and reads the new
    /// address back from the emitted event.
    pub fn instantiate_transmuter(&mut self, pool_asset_denoms: &[&str]) -> AnyResult<Addr> {
        let msg = instantiate_msg(
            self.transmuter_code_id,
            Some(self.owner.to_string()),
            "transmuter",
            pool_asset_denoms.iter().map(|d| d.to_string()).collect(),
        )?;
        let res = self.app.execute(self.owner.clone(), msg)?;

        res.events
            .iter()
            .filter(|event| event.ty == "instantiate")
            .flat_map(|event| event.attributes.iter())
            .find(|attr| attr.key == "_contract_address")
            .map(|attr| Addr::unchecked(&attr.value))
            .ok_or_else(|| anyhow!("transmuter address not found in events"))
    }

    /// Instantiates with `instantiate_contract`, for payloads the helper can't build.
    pub fn instantiate_raw(&mut self, msg: &InstantiateMsg) -> AnyResult<Addr> {
        let owner = self.owner.clone();
        let code_id = self.transmuter_code_id;
        self.app.instantiate_contract(
            code_id,
            owner.clone(),
            msg,
            &[],
            "transmuter",
            Some(owner.to_string()),
        )
    }

    pub fn join_pool(
        &mut self,
        sender: &Addr,
        transmuter: &Addr,
        funds: Vec<Coin>,
    ) -> AnyResult<AppResponse> {
        self.app
            .execute(sender.clone(), join_pool_msg(transmuter, funds)?)
    }

    pub fn transmute(
        &mut self,
        sender: &Addr,
        transmuter: &Addr,
        token_out_denom: &str,
        funds: Vec<Coin>,
    ) -> AnyResult<AppResponse> {
        self.app.execute(
            sender.clone(),
            transmute_msg(transmuter, token_out_denom, funds)?,
        )
    }

    pub fn exit_pool(
        &mut self,
        sender: &Addr,
        transmuter: &Addr,
        tokens_out: Vec<crate::coin::Coin>,
    ) -> AnyResult<AppResponse> {
        self.app
            .execute(sender.clone(), exit_pool_msg(transmuter, tokens_out)?)
    }

    pub fn query_pool(&self, transmuter: &Addr) -> TransmuterPool {
        query_pool(&self.app.wrap(), transmuter).unwrap()
    }

    pub fn query_shares(&self, transmuter: &Addr, address: &Addr) -> Uint128 {
        query_shares(&self.app.wrap(), transmuter, address).unwrap()
    }

    pub fn query_balance(&self, addr: &Addr, denom: &str) -> Coin {
        self.app.wrap().query_balance(addr, denom).unwrap()
    }

    pub fn assert_balance(&self, addr: &Addr, amount: u128, denom: &str) {
        assert_eq!(self.query_balance(addr, denom), coin(amount, denom));
    }

    pub fn execute_raw<T: serde::Serialize + std::fmt::Debug>(
        &mut self,
        sender: &Addr,
        transmuter: &Addr,
        msg: &T,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        self.app
            .execute_contract(sender.clone(), transmuter.clone(), msg, funds)
    }
}
