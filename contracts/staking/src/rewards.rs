/// Fixed-point scaling factor.
///
/// All reward-per-liquidity values are multiplied by this constant before
/// storage to preserve sub-unit precision without floating-point arithmetic.
/// Using 10^12 gives 12 decimal places of precision, which is more than
/// sufficient for token amounts up to 10^18: the per-settlement rounding
/// loss recovered through `/ PRECISION` stays within one token unit.
pub const PRECISION: i128 = 1_000_000_000_000;

/// Upper bound on the reward tax: `numerator / denominator` may not
/// exceed 10%.
pub const TAX_CAP_NUMERATOR: i128 = 1;
pub const TAX_CAP_DENOMINATOR: i128 = 10;

// ── Core accrual arithmetic ─────────────────────────────────────────────────

/// Reward emitted over `elapsed` seconds out of a pool that must deplete
/// linearly over `remaining_duration` seconds.
///
/// ```text
/// period_reward = reward_remaining × elapsed / remaining_duration
/// ```
///
/// Floored integer division. Because the emission rate is re-derived from
/// whatever remains over whatever time remains, any change to the pool size
/// or the depletion date immediately re-slopes future emission without a
/// separate rate field.
///
/// Returns 0 when `remaining_duration` is zero or the pool is empty.
#[allow(clippy::arithmetic_side_effects)]
pub fn period_reward(reward_remaining: i128, elapsed: u64, remaining_duration: u64) -> i128 {
    if remaining_duration == 0 || reward_remaining <= 0 {
        return 0;
    }

    // elapsed and remaining_duration are u64; casts to i128 are lossless.
    reward_remaining.saturating_mul(elapsed as i128) / (remaining_duration as i128)
}

/// Increment to the global reward-per-liquidity accumulator for a period
/// reward distributed across `staked_liquidity` units of stake.
///
/// ```text
/// Δrpl = period_reward × PRECISION / staked_liquidity
/// ```
///
/// When `staked_liquidity` is zero the caller must divert the period reward
/// to the lost-rewards ledger instead; this function returns 0 so the
/// accumulator is left untouched.
#[allow(clippy::arithmetic_side_effects)]
pub fn reward_per_liquidity_delta(period_reward: i128, staked_liquidity: i128) -> i128 {
    if staked_liquidity <= 0 {
        return 0;
    }

    period_reward.saturating_mul(PRECISION) / staked_liquidity
}

/// Total reward currently attributable to a single staker.
///
/// ```text
/// pending = rewards_saved + amount_staked × (current_rpl − rpl_paid) / PRECISION
/// ```
///
/// The subtraction `current_rpl − rpl_paid` isolates only the accumulation
/// that happened *since the user's last snapshot*, so prior claims and
/// snapshots are never double-counted. `rewards_saved` carries reward that
/// was settled at an earlier snapshot but neither paid nor forfeited.
#[allow(clippy::arithmetic_side_effects)]
pub fn pending_reward(
    amount_staked: i128,
    current_rpl: i128,
    rpl_paid: i128,
    rewards_saved: i128,
) -> i128 {
    let new_rewards =
        amount_staked.saturating_mul(current_rpl.saturating_sub(rpl_paid)) / PRECISION;

    rewards_saved.saturating_add(new_rewards)
}

// ── Taxation arithmetic ─────────────────────────────────────────────────────

/// Splits a gross pending reward into the net amount paid to the user and
/// the portion retained as tax.
///
/// ```text
/// taxed = pending × (denominator − numerator) / denominator
/// taxes = pending − taxed
/// ```
///
/// The tax is the exact complement of the floored net amount, so
/// `taxed + taxes == pending` always holds and no unit of reward escapes
/// both ledgers.
#[allow(clippy::arithmetic_side_effects)]
pub fn tax_split(pending: i128, numerator: i128, denominator: i128) -> (i128, i128) {
    if pending <= 0 || denominator <= 0 {
        return (pending.max(0), 0);
    }

    let taxed = pending.saturating_mul(denominator.saturating_sub(numerator)) / denominator;

    (taxed, pending - taxed)
}

/// Validates a tax ratio against the 10% cap.
///
/// Requires a positive denominator, a non-negative numerator, and
/// `numerator / denominator ≤ TAX_CAP_NUMERATOR / TAX_CAP_DENOMINATOR`,
/// checked by cross-multiplication to avoid division.
pub fn is_tax_ratio_valid(numerator: i128, denominator: i128) -> bool {
    denominator > 0
        && numerator >= 0
        && numerator.saturating_mul(TAX_CAP_DENOMINATOR)
            <= denominator.saturating_mul(TAX_CAP_NUMERATOR)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// These are pure-math tests with no Soroban environment dependency.
