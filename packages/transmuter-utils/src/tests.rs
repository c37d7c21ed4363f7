use cosmwasm_std::{coin, to_json_binary, Addr, Uint128};
use serde_json::json;

use crate::{
    coin::Coin,
    error::TransmuterError,
    msg::{ExecuteMsg, InstantiateMsg},
    testing::TransmuterTestSuite,
};

const ATOM: &str = "uatom";
const OSMO: &str = "uosmo";
const ION: &str = "uion";

fn setup() -> (TransmuterTestSuite, Addr, Addr, Addr) {
    let mut suite = TransmuterTestSuite::new(&[
        ("alice", vec![coin(1_000_000, ATOM), coin(1_000_000, OSMO)]),
        ("bob", vec![coin(500, ATOM), coin(500, ION)]),
    ]);
    let transmuter = suite.instantiate_transmuter(&[ATOM, OSMO]).unwrap();
    let alice = suite.addr("alice");
    let bob = suite.addr("bob");

    (suite, transmuter, alice, bob)
}

fn contract_err(err: anyhow::Error) -> TransmuterError {
    err.downcast::<TransmuterError>().unwrap()
}

#[test]
fn instantiate_creates_empty_pool_in_denom_order() {
    let (suite, transmuter, alice, _) = setup();

    let pool = suite.query_pool(&transmuter);
    assert_eq!(
        pool.pool_assets,
        vec![Coin::new(0u128, ATOM), Coin::new(0u128, OSMO)]
    );
    assert_eq!(suite.query_shares(&transmuter, &alice), Uint128::zero());
}

#[test]
fn instantiate_rejects_single_denom_pool() {
    let mut suite = TransmuterTestSuite::new(&[]);

    let err = suite.instantiate_transmuter(&[ATOM]).unwrap_err();
    assert_eq!(
        contract_err(err),
        TransmuterError::NotEnoughPoolAssets { min: 2, actual: 1 }
    );
}

#[test]
fn instantiate_accepts_unknown_fields() {
    let mut suite = TransmuterTestSuite::new(&[]);

    let mut msg = InstantiateMsg::new(vec![ATOM.to_string(), OSMO.to_string()]);
    msg.extensions
        .insert("alloyed_asset_subdenom".to_string(), json!("atomosmo"));

    let transmuter = suite.instantiate_raw(&msg).unwrap();
    assert_eq!(suite.query_pool(&transmuter).pool_assets.len(), 2);
}

#[test]
fn join_pool_mints_shares() {
    let (mut suite, transmuter, alice, _) = setup();

    suite
        .join_pool(&alice, &transmuter, vec![coin(1_000, ATOM), coin(2_000, OSMO)])
        .unwrap();

    let pool = suite.query_pool(&transmuter);
    assert_eq!(pool.balance_of(ATOM), Uint128::new(1_000));
    assert_eq!(pool.balance_of(OSMO), Uint128::new(2_000));
    assert_eq!(suite.query_shares(&transmuter, &alice), Uint128::new(3_000));
    suite.assert_balance(&alice, 999_000, ATOM);
    suite.assert_balance(&transmuter, 2_000, OSMO);
}

#[test]
fn join_pool_rejects_foreign_denom() {
    let (mut suite, transmuter, _, bob) = setup();

    let err = suite
        .join_pool(&bob, &transmuter, vec![coin(100, ION)])
        .unwrap_err();
    assert_eq!(
        contract_err(err),
        TransmuterError::InvalidPoolAssetDenom {
            denom: ION.to_string()
        }
    );
}

#[test]
fn join_pool_without_funds_fails() {
    let (mut suite, transmuter, alice, _) = setup();

    let err = suite.join_pool(&alice, &transmuter, vec![]).unwrap_err();
    assert_eq!(contract_err(err), TransmuterError::EmptyFunds);
}

#[test]
fn transmute_swaps_one_to_one() {
    let (mut suite, transmuter, alice, bob) = setup();
    suite
        .join_pool(&alice, &transmuter, vec![coin(10_000, OSMO)])
        .unwrap();

    let res = suite
        .transmute(&bob, &transmuter, OSMO, vec![coin(400, ATOM)])
        .unwrap();
    assert!(res.events.iter().any(|event| event
        .attributes
        .iter()
        .any(|attr| attr.key == "method" && attr.value == "transmute")));

    suite.assert_balance(&bob, 100, ATOM);
    suite.assert_balance(&bob, 400, OSMO);

    let pool = suite.query_pool(&transmuter);
    assert_eq!(
        pool.pool_assets,
        vec![Coin::new(400u128, ATOM), Coin::new(9_600u128, OSMO)]
    );
}

#[test]
fn transmute_fails_on_insufficient_pool_asset() {
    let (mut suite, transmuter, alice, bob) = setup();
    suite
        .join_pool(&alice, &transmuter, vec![coin(100, OSMO)])
        .unwrap();

    let err = suite
        .transmute(&bob, &transmuter, OSMO, vec![coin(101, ATOM)])
        .unwrap_err();
    assert_eq!(
        contract_err(err),
        TransmuterError::InsufficientPoolAsset {
            denom: OSMO.to_string(),
            required: Uint128::new(101),
            available: Uint128::new(100),
        }
    );
}

#[test]
fn transmute_requires_exactly_one_coin() {
    let (mut suite, transmuter, alice, _) = setup();

    let err = suite
        .transmute(&alice, &transmuter, OSMO, vec![coin(1, ATOM), coin(1, OSMO)])
        .unwrap_err();
    assert_eq!(contract_err(err), TransmuterError::SingleCoinExpected);
}

#[test]
fn transmute_into_same_denom_fails() {
    let (mut suite, transmuter, alice, _) = setup();

    let err = suite
        .transmute(&alice, &transmuter, ATOM, vec![coin(1, ATOM)])
        .unwrap_err();
    assert_eq!(
        contract_err(err),
        TransmuterError::SameDenomTransmute {
            denom: ATOM.to_string()
        }
    );
}

#[test]
fn transmute_with_empty_denom_fails_validation() {
    let (mut suite, transmuter, alice, _) = setup();

    let err = suite
        .transmute(&alice, &transmuter, "", vec![coin(1, ATOM)])
        .unwrap_err();
    assert_eq!(contract_err(err), TransmuterError::EmptyDenom);
}

#[test]
fn transmute_without_token_out_denom_is_rejected_on_decode() {
    let (mut suite, transmuter, alice, _) = setup();

    let raw = json!({"transmute": {}});
    let res = suite.execute_raw(&alice, &transmuter, &raw, &[coin(1, ATOM)]);
    assert!(res.is_err());
}

#[test]
fn execute_with_unknown_fields_is_accepted() {
    let (mut suite, transmuter, alice, _) = setup();
    suite
        .join_pool(&alice, &transmuter, vec![coin(50, OSMO)])
        .unwrap();

    let raw = json!({"transmute": {"token_out_denom": OSMO, "note": "ignored by the pool"}});
    suite
        .execute_raw(&alice, &transmuter, &raw, &[coin(50, ATOM)])
        .unwrap();

    assert_eq!(suite.query_pool(&transmuter).balance_of(OSMO), Uint128::zero());
}

#[test]
fn exit_pool_burns_shares_and_returns_tokens() {
    let (mut suite, transmuter, alice, _) = setup();
    suite
        .join_pool(&alice, &transmuter, vec![coin(1_000, ATOM), coin(1_000, OSMO)])
        .unwrap();

    suite
        .exit_pool(
            &alice,
            &transmuter,
            vec![Coin::new(300u128, ATOM), Coin::new(700u128, OSMO)],
        )
        .unwrap();

    assert_eq!(suite.query_shares(&transmuter, &alice), Uint128::new(1_000));
    suite.assert_balance(&alice, 999_300, ATOM);
    suite.assert_balance(&alice, 999_700, OSMO);

    let pool = suite.query_pool(&transmuter);
    assert_eq!(pool.balance_of(ATOM), Uint128::new(700));
    assert_eq!(pool.balance_of(OSMO), Uint128::new(300));
}

#[test]
fn exit_pool_with_empty_tokens_out_is_a_noop() {
    let (mut suite, transmuter, alice, _) = setup();
    suite
        .join_pool(&alice, &transmuter, vec![coin(10, ATOM)])
        .unwrap();

    suite.exit_pool(&alice, &transmuter, vec![]).unwrap();

    assert_eq!(suite.query_shares(&transmuter, &alice), Uint128::new(10));
}

#[test]
fn exit_pool_fails_on_insufficient_shares() {
    let (mut suite, transmuter, alice, bob) = setup();
    suite
        .join_pool(&alice, &transmuter, vec![coin(1_000, ATOM)])
        .unwrap();
    suite
        .join_pool(&bob, &transmuter, vec![coin(10, ATOM)])
        .unwrap();

    let err = suite
        .exit_pool(&bob, &transmuter, vec![Coin::new(11u128, ATOM)])
        .unwrap_err();
    assert_eq!(
        contract_err(err),
        TransmuterError::InsufficientShares {
            required: Uint128::new(11),
            available: Uint128::new(10),
        }
    );
}

#[test]
fn exit_pool_coin_without_denom_is_rejected_on_decode() {
    let (mut suite, transmuter, alice, _) = setup();

    let raw = json!({"exit_pool": {"tokens_out": [{"amount": "1"}]}});
    assert!(suite.execute_raw(&alice, &transmuter, &raw, &[]).is_err());
}

#[test]
fn exit_pool_with_two_tags_is_rejected_on_decode() {
    let (mut suite, transmuter, alice, _) = setup();

    let raw = json!({"join_pool": {}, "exit_pool": {"tokens_out": []}});
    assert!(suite.execute_raw(&alice, &transmuter, &raw, &[]).is_err());
}

#[test]
fn shares_query_rejects_invalid_address() {
    let (suite, transmuter, _, _) = setup();

    let res = crate::queries::query_shares(&suite.app().wrap(), &transmuter, "not-an-address");
    assert!(res.is_err());
}

#[test]
fn execute_msg_binary_matches_helper_payload() {
    let (_, transmuter, _, _) = setup();

    let cosmos_msg = crate::transmute_msg(&transmuter, OSMO, vec![coin(1, ATOM)]).unwrap();
    let cosmwasm_std::CosmosMsg::Wasm(cosmwasm_std::WasmMsg::Execute {
        contract_addr,
        msg,
        funds,
    }) = cosmos_msg
    else {
        panic!("expected wasm execute");
    };

    assert_eq!(contract_addr, transmuter.to_string());
    assert_eq!(msg, to_json_binary(&ExecuteMsg::transmute(OSMO)).unwrap());
    assert_eq!(funds, vec![coin(1, ATOM)]);
}
