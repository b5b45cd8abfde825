//! Storage keys, TTL policy, and contract-wide configuration accessors.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::ContractError;

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Instance: administrator allowed to mark defaults.
    Admin,
    /// Instance: escrow token contract.
    Token,
    /// Instance: last assigned loan id.
    NextLoanId,
    /// Instance: collateral currently held for active loans.
    TotalEscrowed,
    /// Instance: set while an escrow-touching operation is running.
    Reentrancy,
    /// Persistent: `CreditProfile` per user.
    Profile(Address),
    /// Persistent: `Loan` per id.
    Loan(u64),
    /// Persistent: append-only `Vec<u64>` of loan ids per borrower.
    ActiveLoans(Address),
}

pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub(crate) fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub(crate) fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Admin)
}

pub(crate) fn write_config(env: &Env, admin: &Address, token: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Admin, admin);
    instance.set(&DataKey::Token, token);
    instance.set(&DataKey::NextLoanId, &0_u64);
    instance.set(&DataKey::TotalEscrowed, &0_i128);
    bump_instance(env);
}

pub(crate) fn read_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Admin)
}

pub(crate) fn read_token(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Token)
}

pub(crate) fn require_admin(env: &Env) -> Result<Address, ContractError> {
    read_admin(env).ok_or(ContractError::NotInitialized)
}

pub(crate) fn require_token(env: &Env) -> Result<Address, ContractError> {
    read_token(env).ok_or(ContractError::NotInitialized)
}

pub(crate) fn read_next_loan_id(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::NextLoanId)
        .unwrap_or(0)
}

pub(crate) fn write_next_loan_id(env: &Env, id: u64) {
    env.storage().instance().set(&DataKey::NextLoanId, &id);
}

pub(crate) fn read_total_escrowed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalEscrowed)
        .unwrap_or(0)
}

pub(crate) fn write_total_escrowed(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalEscrowed, &total);
}

pub(crate) fn set_reentrancy_guard(env: &Env) -> Result<(), ContractError> {
    let current: bool = env
        .storage()
        .instance()
        .get(&DataKey::Reentrancy)
        .unwrap_or(false);
    if current {
        return Err(ContractError::Reentrancy);
    }
    env.storage().instance().set(&DataKey::Reentrancy, &true);
    Ok(())
}

pub(crate) fn clear_reentrancy_guard(env: &Env) {
    env.storage().instance().set(&DataKey::Reentrancy, &false);
}
