#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    pub starts_at: u64,
    pub depletion_at: u64,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws staked tokens.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a user is paid rewards, either through an explicit claim or
/// as part of a stake/withdraw settlement.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    /// Net amount transferred to the staker after tax.
    pub taxed: i128,
    /// Portion retained in the tax ledger.
    pub taxes: i128,
    pub timestamp: u64,
}

/// Fired when reward value moves to the lost ledger: either an accrual
/// period elapsed with no stakers, or a withdrawing user waived their
/// pending reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsLostEvent {
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the emission inputs change: pool deposits and withdrawals,
/// and depletion date updates.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConditionChangedEvent {
    pub reward_remaining: i128,
    pub last_accrued_at: u64,
    pub depletion_at: u64,
    pub timestamp: u64,
}

/// Fired when the stake/claim minimums change.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingRestrictionChangedEvent {
    pub min_staking_amount: i128,
    pub min_reward_amount: i128,
    pub timestamp: u64,
}

/// Fired when the reward tax ratio changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TaxConditionChangedEvent {
    pub tax_numerator: i128,
    pub tax_denominator: i128,
    pub timestamp: u64,
}

/// Fired when a stray (non-program) token balance is recovered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenRecoveredEvent {
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when stake/withdraw operations are halted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PausedEvent {
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when stake/withdraw operations resume.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnpausedEvent {
    pub caller: Address,
    pub timestamp: u64,
}

/// Fired when the owner grants a capability role.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleGrantedEvent {
    pub role: common::roles::Role,
    pub account: Address,
    pub timestamp: u64,
}

/// Fired when the owner revokes a capability role.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleRevokedEvent {
    pub role: common::roles::Role,
    pub account: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    staking_token: Address,
    reward_token: Address,
    starts_at: u64,
    depletion_at: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            staking_token,
            reward_token,
            starts_at,
            depletion_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(env: &Env, staker: Address, taxed: i128, taxes: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardsClaimedEvent {
            staker,
            taxed,
            taxes,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_lost(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_LOST"),),
        RewardsLostEvent {
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staking_condition_changed(
    env: &Env,
    reward_remaining: i128,
    last_accrued_at: u64,
    depletion_at: u64,
) {
    env.events().publish(
        (symbol_short!("COND_CHG"),),
        StakingConditionChangedEvent {
            reward_remaining,
            last_accrued_at,
            depletion_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staking_restriction_changed(
    env: &Env,
    min_staking_amount: i128,
    min_reward_amount: i128,
) {
    env.events().publish(
        (symbol_short!("RSTR_CHG"),),
        StakingRestrictionChangedEvent {
            min_staking_amount,
            min_reward_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_tax_condition_changed(env: &Env, tax_numerator: i128, tax_denominator: i128) {
    env.events().publish(
        (symbol_short!("TAX_CHG"),),
        TaxConditionChangedEvent {
            tax_numerator,
            tax_denominator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_token_recovered(env: &Env, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TOK_RCVR"),),
        TokenRecoveredEvent {
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PausedEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        UnpausedEvent {
            caller,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, role: common::roles::Role, account: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRNT"), account.clone()),
        RoleGrantedEvent {
            role,
            account,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: common::roles::Role, account: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVKD"), account.clone()),
        RoleRevokedEvent {
            role,
            account,
            timestamp: env.ledger().timestamp(),
        },
    );
}
