#![no_std]

pub mod events;
pub mod rewards;

use common::roles::{self, Role};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const PROGRAM: Symbol = symbol_short!("PROGRAM");

// Per-user persistent storage uses tuple keys:  (prefix, user_address)
const USER: Symbol = symbol_short!("USER");

// ── Contract errors ──────────────────────────────────────────────────────────

/// Every failure is a pre-condition violation detected before any state
/// mutation; an operation either fully applies or applies nothing. The doc
/// comment on each variant is the stable human-readable reason surfaced to
/// integrators.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    /// "Program is not initialized"
    NotInitialized = 1,
    /// "Program is already initialized"
    AlreadyInitialized = 2,
    /// "Caller is missing the required role"
    MissingRole = 3,
    /// "Staking program is paused"
    Paused = 4,
    /// "Staking program is not paused"
    NotPaused = 5,
    /// "Invalid program timeline"
    InvalidProgramTimeline = 6,
    /// "Invalid reward token"
    InvalidRewardToken = 7,
    /// "Invalid tax ratio"
    InvalidTaxRatio = 8,
    /// "Tax ratio exceeds 10% cap"
    TaxRatioExceedsCap = 9,
    /// "Amounts must not be negative"
    NegativeAmount = 10,
    /// "Staking program not open yet"
    ProgramNotOpen = 11,
    /// "Staking program has closed"
    ProgramClosed = 12,
    /// "There are no rewards deposited yet"
    NoRewardsDeposited = 13,
    /// "Unable to stake 0 tokens"
    ZeroStakeAmount = 14,
    /// "Staking less than required by the specified program"
    StakeBelowProgramMinimum = 15,
    /// "Unable to withdraw 0 tokens"
    ZeroWithdrawAmount = 16,
    /// "No amount to withdraw"
    NothingToWithdraw = 17,
    /// "Amount to withdraw is greater than staked"
    WithdrawExceedsStaked = 18,
    /// "The final staked amount would be less than required by the specified program"
    FinalStakeBelowProgramMinimum = 19,
    /// "Not enough rewards to claim"
    NotEnoughRewardsToClaim = 20,
    /// "Unable to deposit 0 reward tokens"
    ZeroRewardDeposit = 21,
    /// "Unable to withdraw 0 reward tokens"
    ZeroRewardWithdraw = 22,
    /// "Unable to withdraw more than the program reward remaining"
    WithdrawExceedsRewardRemaining = 23,
    /// "Unable to withdraw 0 lost rewards tokens"
    ZeroLostRewardWithdraw = 24,
    /// "Amount is greater than available lost rewards"
    WithdrawExceedsLostRewards = 25,
    /// "Unable to withdraw 0 tax tokens"
    ZeroTaxWithdraw = 26,
    /// "Amount is greater than available taxes"
    WithdrawExceedsTaxes = 27,
    /// "New program depletion date must be greater than current time"
    BadDepletionDate = 28,
    /// "Unable to recover the program staking token"
    CannotRecoverStakingToken = 29,
    /// "Unable to recover the program reward token"
    CannotRecoverRewardToken = 30,
    /// "Unable to recover 0 tokens"
    ZeroRecoverAmount = 31,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// The program singleton. One instance lives under the `PROGRAM` instance
/// key; every operation loads it, mutates the copy, and writes it back only
/// on success.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgramState {
    /// Deploying identity; root of role grants.
    pub owner: Address,
    pub staking_token: Address,
    pub reward_token: Address,
    /// Floor enforced on a user's first stake only.
    pub min_staking_amount: i128,
    /// Floor enforced on explicit reward claims only.
    pub min_reward_amount: i128,
    pub starts_at: u64,
    /// End of the emission window; only ever moved to a future instant.
    pub depletion_at: u64,
    /// Instant up to which the accumulator has been settled. Starts at
    /// `starts_at`, never decreases, never exceeds `depletion_at`.
    pub last_accrued_at: u64,
    /// Cumulative reward per unit of stake, scaled by [`rewards::PRECISION`].
    pub reward_per_liquidity: i128,
    /// Undistributed pool balance held for future emission.
    pub reward_remaining: i128,
    /// Reward emitted with no stakers to receive it, or explicitly waived.
    pub reward_lost: i128,
    pub reward_lost_withdrawn: i128,
    /// Sum of all users' staked principal.
    pub staked_liquidity: i128,
    pub tax_numerator: i128,
    pub tax_denominator: i128,
    pub tax_accumulated: i128,
    pub tax_withdrawn: i128,
    /// Gates `stake` and `withdraw` only.
    pub paused: bool,
}

/// A user's staking position. Created lazily on first stake; an all-zero
/// entry is equivalent to absence.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    pub amount_staked: i128,
    /// Snapshot of `reward_per_liquidity` taken at the last settlement.
    pub reward_per_liquidity_paid: i128,
    /// Reward settled at an earlier snapshot but neither paid nor waived.
    pub rewards_saved: i128,
}

/// Tax-split view of a user's pending reward, returned by
/// `available_rewards`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AvailableRewards {
    pub taxed: i128,
    pub taxes: i128,
}

impl UserPosition {
    fn empty() -> Self {
        UserPosition {
            amount_staked: 0,
            reward_per_liquidity_paid: 0,
            rewards_saved: 0,
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn load_program(env: &Env) -> Result<ProgramState, ContractError> {
    env.storage()
        .instance()
        .get(&PROGRAM)
        .ok_or(ContractError::NotInitialized)
}

fn save_program(env: &Env, state: &ProgramState) {
    env.storage().instance().set(&PROGRAM, state);
}

fn user_key(staker: &Address) -> (Symbol, Address) {
    (USER, staker.clone())
}

fn load_user(env: &Env, staker: &Address) -> UserPosition {
    env.storage()
        .persistent()
        .get(&user_key(staker))
        .unwrap_or_else(UserPosition::empty)
}

fn save_user(env: &Env, staker: &Address, user: &UserPosition) {
    env.storage().persistent().set(&user_key(staker), user);
}

/// Guard: revert if `caller` is not a member of `role`. Fails closed and
/// runs before any state mutation in every gated entry point.
fn require_role(env: &Env, caller: &Address, role: &Role) -> Result<(), ContractError> {
    if !roles::has_role(env, role, caller) {
        return Err(ContractError::MissingRole);
    }
    Ok(())
}

fn transfer_in(env: &Env, token_id: &Address, from: &Address, amount: i128) {
    token::Client::new(env, token_id).transfer(from, &env.current_contract_address(), &amount);
}

fn transfer_out(env: &Env, token_id: &Address, to: &Address, amount: i128) {
    token::Client::new(env, token_id).transfer(&env.current_contract_address(), to, &amount);
}

/// Settle the program accumulator up to `now`.
///
/// The emission rate is re-derived on every settlement as "whatever remains,
/// spread evenly over whatever time remains until depletion", so pool and
/// depletion-date changes re-slope future emission with no separate rate
/// field. Idempotent: a second call at the same instant (or any call after
/// depletion) changes nothing.
///
/// Returns the reward diverted to the lost ledger because the period had no
/// stakers; callers on the mutating path publish `RewardsLost` for it.
#[allow(clippy::arithmetic_side_effects)]
fn accrue_program(state: &mut ProgramState, now: u64) -> i128 {
    let effective_now = now.min(state.depletion_at);
    if effective_now <= state.last_accrued_at {
        return 0;
    }

    if state.reward_remaining <= 0 {
        state.last_accrued_at = effective_now;
        return 0;
    }

    // effective_now > last_accrued_at and effective_now ≤ depletion_at, so
    // the remaining duration is strictly positive here.
    let remaining_duration = state.depletion_at - state.last_accrued_at;
    let elapsed = effective_now - state.last_accrued_at;

    let period_reward =
        rewards::period_reward(state.reward_remaining, elapsed, remaining_duration);

    let mut lost = 0i128;
    if state.staked_liquidity <= 0 {
        // Nobody was eligible; the period's emission is tracked as lost
        // rather than silently re-entering the pool.
        state.reward_lost = state.reward_lost.saturating_add(period_reward);
        lost = period_reward;
    } else {
        state.reward_per_liquidity = state.reward_per_liquidity.saturating_add(
            rewards::reward_per_liquidity_delta(period_reward, state.staked_liquidity),
        );
    }

    state.reward_remaining -= period_reward;
    state.last_accrued_at = effective_now;

    lost
}

/// Accrue on the mutating path: settles the accumulator and publishes the
/// `RewardsLost` notification for any no-staker emission.
fn accrue_and_publish(env: &Env, state: &mut ProgramState) {
    let lost = accrue_program(state, env.ledger().timestamp());
    if lost > 0 {
        events::publish_rewards_lost(env, lost);
    }
}

/// Settle a user's position against the current accumulator, before any
/// principal change.
///
/// Precedence: waive > claim > save. The snapshot is taken here in every
/// case, so no reward interval is double-counted or skipped by the
/// principal change that follows.
fn settle_position(
    env: &Env,
    state: &mut ProgramState,
    staker: &Address,
    user: &mut UserPosition,
    claim_rewards: bool,
    waive_rewards: bool,
) {
    let pending = rewards::pending_reward(
        user.amount_staked,
        state.reward_per_liquidity,
        user.reward_per_liquidity_paid,
        user.rewards_saved,
    );

    if waive_rewards {
        if pending > 0 {
            state.reward_lost = state.reward_lost.saturating_add(pending);
            events::publish_rewards_lost(env, pending);
        }
        user.rewards_saved = 0;
    } else if claim_rewards {
        if pending > 0 {
            let (taxed, taxes) =
                rewards::tax_split(pending, state.tax_numerator, state.tax_denominator);
            transfer_out(env, &state.reward_token, staker, taxed);
            state.tax_accumulated = state.tax_accumulated.saturating_add(taxes);
            events::publish_rewards_claimed(env, staker.clone(), taxed, taxes);
        }
        user.rewards_saved = 0;
    } else {
        // Neither paid nor waived: preserved for a later explicit claim.
        user.rewards_saved = pending;
    }

    user.reward_per_liquidity_paid = state.reward_per_liquidity;
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the program.
    ///
    /// * `owner`              – identity granted both capability roles.
    /// * `staking_token`      – SAC address of the token users stake.
    /// * `min_staking_amount` – floor enforced on a user's first stake.
    /// * `reward_token`       – SAC address of the token emitted as rewards.
    /// * `min_reward_amount`  – floor enforced on explicit claims.
    /// * `starts_at`          – opening instant of the emission window.
    /// * `depletion_at`       – instant at which the pool depletes.
    /// * `tax_numerator` / `tax_denominator` – claim tax ratio, capped at 10%.
    /// * `managers`           – identities granted the steward role.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        staking_token: Address,
        min_staking_amount: i128,
        reward_token: Address,
        min_reward_amount: i128,
        starts_at: u64,
        depletion_at: u64,
        tax_numerator: i128,
        tax_denominator: i128,
        managers: Vec<Address>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&PROGRAM) {
            return Err(ContractError::AlreadyInitialized);
        }
        if staking_token == reward_token {
            return Err(ContractError::InvalidRewardToken);
        }
        if starts_at >= depletion_at {
            return Err(ContractError::InvalidProgramTimeline);
        }
        if tax_denominator <= 0 || tax_numerator < 0 {
            return Err(ContractError::InvalidTaxRatio);
        }
        if !rewards::is_tax_ratio_valid(tax_numerator, tax_denominator) {
            return Err(ContractError::TaxRatioExceedsCap);
        }
        if min_staking_amount < 0 || min_reward_amount < 0 {
            return Err(ContractError::NegativeAmount);
        }

        let state = ProgramState {
            owner: owner.clone(),
            staking_token: staking_token.clone(),
            reward_token: reward_token.clone(),
            min_staking_amount,
            min_reward_amount,
            starts_at,
            depletion_at,
            last_accrued_at: starts_at,
            reward_per_liquidity: 0,
            reward_remaining: 0,
            reward_lost: 0,
            reward_lost_withdrawn: 0,
            staked_liquidity: 0,
            tax_numerator,
            tax_denominator,
            tax_accumulated: 0,
            tax_withdrawn: 0,
            paused: false,
        };
        save_program(&env, &state);

        // The owner holds both capability sets; listed managers are
        // operational only.
        roles::grant_role(&env, &Role::Steward, &owner);
        roles::grant_role(&env, &Role::Configuration, &owner);
        for manager in managers.iter() {
            roles::grant_role(&env, &Role::Steward, &manager);
        }

        events::publish_initialized(
            &env,
            owner,
            staking_token,
            reward_token,
            starts_at,
            depletion_at,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` staking tokens into the program.
    ///
    /// The global accumulator is settled first so the staker does not
    /// retroactively earn rewards on the newly deposited tokens. Any reward
    /// already pending on the position is paid out when `claim_rewards` is
    /// set, and saved for a later explicit claim otherwise.
    pub fn stake(
        env: Env,
        staker: Address,
        amount: i128,
        claim_rewards: bool,
    ) -> Result<(), ContractError> {
        staker.require_auth();

        let mut state = load_program(&env)?;
        if state.paused {
            return Err(ContractError::Paused);
        }

        accrue_and_publish(&env, &mut state);

        let now = env.ledger().timestamp();
        if now < state.starts_at {
            return Err(ContractError::ProgramNotOpen);
        }
        if now >= state.depletion_at {
            return Err(ContractError::ProgramClosed);
        }
        if state.reward_remaining <= 0 {
            return Err(ContractError::NoRewardsDeposited);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroStakeAmount);
        }

        let mut user = load_user(&env, &staker);
        if user.amount_staked == 0 && amount < state.min_staking_amount {
            return Err(ContractError::StakeBelowProgramMinimum);
        }

        // Settle at the pre-update stake, then snapshot, then grow.
        settle_position(&env, &mut state, &staker, &mut user, claim_rewards, false);

        transfer_in(&env, &state.staking_token, &staker, amount);

        user.amount_staked = user.amount_staked.saturating_add(amount);
        state.staked_liquidity = state.staked_liquidity.saturating_add(amount);

        save_user(&env, &staker, &user);
        save_program(&env, &state);

        events::publish_staked(&env, staker, amount);

        Ok(())
    }

    /// Withdraw `amount` staked tokens.
    ///
    /// Pending reward is settled before the principal changes:
    /// `waive_rewards` forfeits it to the lost ledger (and takes precedence),
    /// `claim_rewards` pays it out through the tax split, and with neither
    /// flag it is saved for a later explicit claim.
    pub fn withdraw(
        env: Env,
        staker: Address,
        amount: i128,
        claim_rewards: bool,
        waive_rewards: bool,
    ) -> Result<(), ContractError> {
        staker.require_auth();

        let mut state = load_program(&env)?;
        if state.paused {
            return Err(ContractError::Paused);
        }

        accrue_and_publish(&env, &mut state);

        if amount <= 0 {
            return Err(ContractError::ZeroWithdrawAmount);
        }

        let mut user = load_user(&env, &staker);
        if user.amount_staked == 0 {
            return Err(ContractError::NothingToWithdraw);
        }
        if amount > user.amount_staked {
            return Err(ContractError::WithdrawExceedsStaked);
        }

        let remainder = user.amount_staked - amount;
        if remainder > 0 && remainder < state.min_staking_amount {
            return Err(ContractError::FinalStakeBelowProgramMinimum);
        }

        settle_position(
            &env,
            &mut state,
            &staker,
            &mut user,
            claim_rewards,
            waive_rewards,
        );

        transfer_out(&env, &state.staking_token, &staker, amount);

        user.amount_staked = remainder;
        state.staked_liquidity = state.staked_liquidity.saturating_sub(amount);

        save_user(&env, &staker, &user);
        save_program(&env, &state);

        events::publish_withdrawn(&env, staker, amount);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Claim all pending rewards for `staker`.
    ///
    /// Fails when the gross pending amount is below the program's claim
    /// minimum, leaving the position untouched. Returns the net amount
    /// transferred after tax.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        staker.require_auth();

        let mut state = load_program(&env)?;
        accrue_and_publish(&env, &mut state);

        let mut user = load_user(&env, &staker);
        let pending = rewards::pending_reward(
            user.amount_staked,
            state.reward_per_liquidity,
            user.reward_per_liquidity_paid,
            user.rewards_saved,
        );

        if pending < state.min_reward_amount {
            return Err(ContractError::NotEnoughRewardsToClaim);
        }

        let (taxed, taxes) =
            rewards::tax_split(pending, state.tax_numerator, state.tax_denominator);

        transfer_out(&env, &state.reward_token, &staker, taxed);

        state.tax_accumulated = state.tax_accumulated.saturating_add(taxes);
        user.rewards_saved = 0;
        user.reward_per_liquidity_paid = state.reward_per_liquidity;

        save_user(&env, &staker, &user);
        save_program(&env, &state);

        events::publish_rewards_claimed(&env, staker, taxed, taxes);

        Ok(taxed)
    }

    /// Settle the accumulator up to the current ledger time.
    ///
    /// Normally runs implicitly at the start of every mutating operation;
    /// exposed so a steward can flush a long no-staker period into the lost
    /// ledger without waiting for user traffic.
    pub fn accrue_rewards_period(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        accrue_and_publish(&env, &mut state);
        save_program(&env, &state);

        Ok(())
    }

    // ── Program reward pool ─────────────────────────────────────────────────

    /// Fund the reward pool. Future emission immediately re-slopes to
    /// deplete the enlarged pool by the unchanged depletion date.
    pub fn deposit_program_rewards(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        accrue_and_publish(&env, &mut state);

        if amount <= 0 {
            return Err(ContractError::ZeroRewardDeposit);
        }

        transfer_in(&env, &state.reward_token, &caller, amount);
        state.reward_remaining = state.reward_remaining.saturating_add(amount);

        save_program(&env, &state);

        events::publish_staking_condition_changed(
            &env,
            state.reward_remaining,
            state.last_accrued_at,
            state.depletion_at,
        );

        Ok(())
    }

    /// Drain undistributed reward back out of the pool.
    pub fn withdraw_program_rewards(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        accrue_and_publish(&env, &mut state);

        if amount <= 0 {
            return Err(ContractError::ZeroRewardWithdraw);
        }
        if amount > state.reward_remaining {
            return Err(ContractError::WithdrawExceedsRewardRemaining);
        }

        transfer_out(&env, &state.reward_token, &caller, amount);
        state.reward_remaining -= amount;

        save_program(&env, &state);

        events::publish_staking_condition_changed(
            &env,
            state.reward_remaining,
            state.last_accrued_at,
            state.depletion_at,
        );

        Ok(())
    }

    /// Recover reward that was emitted with no stakers to receive it, or
    /// that withdrawing users waived.
    pub fn withdraw_program_lost_rewards(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        accrue_and_publish(&env, &mut state);

        if amount <= 0 {
            return Err(ContractError::ZeroLostRewardWithdraw);
        }
        if amount > state.reward_lost - state.reward_lost_withdrawn {
            return Err(ContractError::WithdrawExceedsLostRewards);
        }

        transfer_out(&env, &state.reward_token, &caller, amount);
        state.reward_lost_withdrawn = state.reward_lost_withdrawn.saturating_add(amount);

        save_program(&env, &state);

        Ok(())
    }

    // ── Program configuration ───────────────────────────────────────────────

    /// Move the depletion date. The accumulator is settled at the old slope
    /// first, so emission already earned is untouched and only future
    /// emission re-slopes.
    pub fn update_program_depletion_date(
        env: Env,
        caller: Address,
        new_date: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        accrue_and_publish(&env, &mut state);

        if new_date <= env.ledger().timestamp() {
            return Err(ContractError::BadDepletionDate);
        }

        state.depletion_at = new_date;
        save_program(&env, &state);

        events::publish_staking_condition_changed(
            &env,
            state.reward_remaining,
            state.last_accrued_at,
            state.depletion_at,
        );

        Ok(())
    }

    /// Update the first-stake and claim minimums.
    pub fn update_program_restriction(
        env: Env,
        caller: Address,
        min_staking_amount: i128,
        min_reward_amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        if min_staking_amount < 0 || min_reward_amount < 0 {
            return Err(ContractError::NegativeAmount);
        }

        state.min_staking_amount = min_staking_amount;
        state.min_reward_amount = min_reward_amount;
        save_program(&env, &state);

        events::publish_staking_restriction_changed(&env, min_staking_amount, min_reward_amount);

        Ok(())
    }

    // ── Taxes ───────────────────────────────────────────────────────────────

    /// Update the claim tax ratio. Applies to all claims settled afterwards.
    pub fn update_program_tax(
        env: Env,
        caller: Address,
        tax_numerator: i128,
        tax_denominator: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Configuration)?;

        if tax_denominator <= 0 || tax_numerator < 0 {
            return Err(ContractError::InvalidTaxRatio);
        }
        if !rewards::is_tax_ratio_valid(tax_numerator, tax_denominator) {
            return Err(ContractError::TaxRatioExceedsCap);
        }

        state.tax_numerator = tax_numerator;
        state.tax_denominator = tax_denominator;
        save_program(&env, &state);

        events::publish_tax_condition_changed(&env, tax_numerator, tax_denominator);

        Ok(())
    }

    /// Withdraw accumulated, not-yet-withdrawn taxes.
    pub fn withdraw_program_taxes(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Configuration)?;

        if amount <= 0 {
            return Err(ContractError::ZeroTaxWithdraw);
        }
        if amount > state.tax_accumulated - state.tax_withdrawn {
            return Err(ContractError::WithdrawExceedsTaxes);
        }

        transfer_out(&env, &state.reward_token, &caller, amount);
        state.tax_withdrawn = state.tax_withdrawn.saturating_add(amount);

        save_program(&env, &state);

        Ok(())
    }

    // ── Utilities ───────────────────────────────────────────────────────────

    /// Recover a stray token balance sent to the contract by mistake.
    ///
    /// The program's own staking and reward tokens are protected; their
    /// balances back user principal and the reward ledgers and must leave
    /// through the dedicated paths above.
    pub fn recover_token(
        env: Env,
        caller: Address,
        token_id: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        if token_id == state.staking_token {
            return Err(ContractError::CannotRecoverStakingToken);
        }
        if token_id == state.reward_token {
            return Err(ContractError::CannotRecoverRewardToken);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroRecoverAmount);
        }

        transfer_out(&env, &token_id, &caller, amount);

        events::publish_token_recovered(&env, token_id, amount);

        Ok(())
    }

    /// Halt `stake` and `withdraw`. Claims and admin operations stay open.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        if state.paused {
            return Err(ContractError::Paused);
        }

        state.paused = true;
        save_program(&env, &state);

        events::publish_paused(&env, caller);

        Ok(())
    }

    /// Resume `stake` and `withdraw`.
    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();

        let mut state = load_program(&env)?;
        require_role(&env, &caller, &Role::Steward)?;

        if !state.paused {
            return Err(ContractError::NotPaused);
        }

        state.paused = false;
        save_program(&env, &state);

        events::publish_unpaused(&env, caller);

        Ok(())
    }

    // ── Role management ─────────────────────────────────────────────────────

    /// Grant a capability role. Only the owner may call this.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let state = load_program(&env)?;
        if caller != state.owner {
            return Err(ContractError::MissingRole);
        }

        roles::grant_role(&env, &role, &account);

        events::publish_role_granted(&env, role, account);

        Ok(())
    }

    /// Revoke a capability role. Only the owner may call this.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();

        let state = load_program(&env)?;
        if caller != state.owner {
            return Err(ContractError::MissingRole);
        }

        roles::revoke_role(&env, &role, &account);

        events::publish_role_revoked(&env, role, account);

        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        roles::has_role(&env, &role, &account)
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Return the full program record.
    pub fn get_program(env: Env) -> Result<ProgramState, ContractError> {
        load_program(&env)
    }

    /// Return a user's stored position. Absent users read as all-zero.
    pub fn get_user(env: Env, staker: Address) -> UserPosition {
        load_user(&env, &staker)
    }

    /// Return the user's current staked balance.
    pub fn get_staked(env: Env, staker: Address) -> i128 {
        load_user(&env, &staker).amount_staked
    }

    /// Return the sum of all currently staked tokens.
    pub fn get_staked_liquidity(env: Env) -> i128 {
        load_program(&env).map(|s| s.staked_liquidity).unwrap_or(0)
    }

    /// Return real-time pending rewards for a staker, split by the tax
    /// ratio, without mutating state.
    pub fn available_rewards(
        env: Env,
        staker: Address,
    ) -> Result<AvailableRewards, ContractError> {
        let mut state = load_program(&env)?;

        // Project the accumulator forward on a scratch copy; nothing is
        // written back and no events fire.
        accrue_program(&mut state, env.ledger().timestamp());

        let user = load_user(&env, &staker);
        let pending = rewards::pending_reward(
            user.amount_staked,
            state.reward_per_liquidity,
            user.reward_per_liquidity_paid,
            user.rewards_saved,
        );

        let (taxed, taxes) =
            rewards::tax_split(pending, state.tax_numerator, state.tax_denominator);

        Ok(AvailableRewards { taxed, taxes })
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&PROGRAM)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
