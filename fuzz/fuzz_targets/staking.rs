#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{vec, Address, Env};
use staking::{StakingContract, StakingContractClient};

const DAY: u64 = 86_400;
const START: u64 = 1_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64, claim: bool },
    Withdraw { amount: u64, claim: bool, waive: bool },
    ClaimRewards,
    Advance { secs: u32 },
    Accrue,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let staking_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(
        &owner,
        &staking_token,
        &100i128,
        &reward_token,
        &10i128,
        &START,
        &(START + 30 * DAY),
        &35i128,
        &1_000i128,
        &vec![&env],
    );

    StellarAssetClient::new(&env, &reward_token)
        .mock_all_auths()
        .mint(&owner, &1_000_000_000i128);
    client.deposit_program_rewards(&owner, &1_000_000_000i128);

    let mut users = vec![&env, owner.clone()];
    for _ in 0..4 {
        users.push_back(Address::generate(&env));
    }
    for user in users.iter() {
        StellarAssetClient::new(&env, &staking_token)
            .mock_all_auths()
            .mint(&user, &i128::from(u64::MAX));
    }

    env.ledger().set_timestamp(START);
    let mut now = START;

    // Call functions with arbitrary parameters to find unhandled panics
    // (e.g., overflow from missing math protection). try_ results are
    // discarded: rejections are expected, panics are findings.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = users.get((i as u32) % users.len()).unwrap();
        match action {
            FuzzAction::Stake { amount, claim } => {
                let amt = amount as i128;
                let _ = client.try_stake(&caller, &amt, &claim);
            }
            FuzzAction::Withdraw {
                amount,
                claim,
                waive,
            } => {
                let amt = amount as i128;
                let _ = client.try_withdraw(&caller, &amt, &claim, &waive);
            }
            FuzzAction::ClaimRewards => {
                let _ = client.try_claim_rewards(&caller);
            }
            FuzzAction::Advance { secs } => {
                now = now.saturating_add(secs as u64);
                env.ledger().set_timestamp(now);
            }
            FuzzAction::Accrue => {
                let _ = client.try_accrue_rewards_period(&owner);
            }
        }
    }
});
