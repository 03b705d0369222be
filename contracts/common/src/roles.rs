use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Two disjoint capability sets gating administrative entry points.
///
/// - `Steward`       – Operational duties: fund or drain the reward pool,
///                     recover forfeited rewards, move the depletion date,
///                     adjust staking restrictions, recover stray tokens,
///                     and pause/unpause user operations.
/// - `Configuration` – Fiscal duties: change the reward tax ratio and
///                     withdraw accumulated taxes.
///
/// Membership in one set grants nothing in the other. An address may hold
/// both roles; the contract deployer is granted both at initialisation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Steward = 1,
    Configuration = 2,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: &Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role.clone(), account.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Role, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Adds `account` to the membership set of `role`.
/// Only callable internally — callers must verify authorization beforehand.
pub fn grant_role(env: &Env, role: &Role, account: &Address) {
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);
}

/// Removes `account` from the membership set of `role`.
pub fn revoke_role(env: &Env, role: &Role, account: &Address) {
    let key = role_key(role, account);
    env.storage().persistent().remove(&key);
}

/// Returns `true` when `account` belongs to the membership set of `role`.
///
/// Absent entries fail closed: an address that was never granted the role
/// (or whose grant was revoked) is not a member.
pub fn has_role(env: &Env, role: &Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let member: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if member {
        extend_ttl(env, &key);
    }
    member
}
