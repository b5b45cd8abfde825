//! Score ledger: owns credit profiles and the only score-mutation path.

use soroban_sdk::{Address, Env};

use crate::events::{publish_profile_initialized, publish_score_updated};
use crate::storage::{bump_persistent, DataKey};
use crate::types::{
    ContractError, CreditProfile, DEFAULT_PENALTY, INITIAL_SCORE, MAX_SCORE, MIN_SCORE,
    SETTLEMENT_BONUS,
};

pub(crate) fn read(env: &Env, user: &Address) -> Option<CreditProfile> {
    env.storage()
        .persistent()
        .get(&DataKey::Profile(user.clone()))
}

pub(crate) fn get(env: &Env, user: &Address) -> Result<CreditProfile, ContractError> {
    read(env, user).ok_or(ContractError::ProfileNotFound)
}

pub(crate) fn write(env: &Env, user: &Address, profile: &CreditProfile) {
    let key = DataKey::Profile(user.clone());
    env.storage().persistent().set(&key, profile);
    bump_persistent(env, &key);
}

/// Create a profile at the initial score. Fails if one already exists.
pub(crate) fn initialize(env: &Env, user: &Address) -> Result<CreditProfile, ContractError> {
    if read(env, user).is_some() {
        return Err(ContractError::AlreadyExists);
    }

    let profile = CreditProfile {
        score: INITIAL_SCORE,
        total_borrowed: 0,
        total_repaid: 0,
        loans_taken: 0,
        loans_repaid: 0,
        last_update: env.ledger().sequence(),
    };
    write(env, user, &profile);
    publish_profile_initialized(env, user, profile.score);
    Ok(profile)
}

/// Score after a settlement (`success`) or a default, saturating at the bounds.
pub(crate) fn next_score(score: u32, success: bool) -> u32 {
    if success {
        score.saturating_add(SETTLEMENT_BONUS).min(MAX_SCORE)
    } else {
        score.saturating_sub(DEFAULT_PENALTY).max(MIN_SCORE)
    }
}

/// Apply a loan outcome to `user`'s profile.
pub(crate) fn apply_outcome(
    env: &Env,
    user: &Address,
    success: bool,
    loan_amount: i128,
) -> Result<CreditProfile, ContractError> {
    let mut profile = get(env, user)?;
    let old_score = profile.score;

    profile.score = next_score(old_score, success);
    if success {
        profile.total_repaid = profile
            .total_repaid
            .checked_add(loan_amount)
            .ok_or(ContractError::Overflow)?;
        profile.loans_repaid = profile
            .loans_repaid
            .checked_add(1)
            .ok_or(ContractError::Overflow)?;
    }
    profile.last_update = env.ledger().sequence();

    write(env, user, &profile);
    publish_score_updated(env, user, old_score, profile.score, success);
    Ok(profile)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_next_score_success_caps_at_max() {
        assert_eq!(next_score(70, true), 72);
        assert_eq!(next_score(99, true), MAX_SCORE);
        assert_eq!(next_score(MAX_SCORE, true), MAX_SCORE);
    }

    #[test]
    fn test_next_score_default_floors_at_min() {
        assert_eq!(next_score(80, false), 70);
        assert_eq!(next_score(55, false), MIN_SCORE);
        assert_eq!(next_score(MIN_SCORE, false), MIN_SCORE);
    }

    #[test]
    fn test_next_score_stays_in_range_over_any_sequence() {
        let mut score = INITIAL_SCORE;
        for step in 0..500_u32 {
            // deterministic mix of outcomes
            let success = (step * 7 + step / 3) % 5 != 0;
            score = next_score(score, success);
            assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
        }
    }
}
