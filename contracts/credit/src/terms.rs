//! Score-to-terms formulas.
//!
//! All arithmetic is integer with truncating division, multiplying before
//! dividing. Scores are expected in `[MIN_SCORE, MAX_SCORE]`.

use crate::types::{ContractError, LoanTerms};

/// Interest charged at a score of zero, in whole percent.
const BASE_INTEREST_RATE: u32 = 10;
/// Percent of the score subtracted from the base rate.
const SCORE_RATE_FACTOR: u32 = 5;
/// Percent of the score subtracted from a 100% collateral ratio.
const SCORE_COLLATERAL_FACTOR: u32 = 50;

/// Collateral ratio in whole percent: 75 at score 50, 50 at score 100.
pub fn collateral_ratio(score: u32) -> u32 {
    100 - score * SCORE_COLLATERAL_FACTOR / 100
}

/// `floor(amount * (100 - floor(score * 50 / 100)) / 100)`
pub fn required_collateral(amount: i128, score: u32) -> Result<i128, ContractError> {
    amount
        .checked_mul(collateral_ratio(score) as i128)
        .map(|scaled| scaled / 100)
        .ok_or(ContractError::Overflow)
}

/// `10 - floor(score * 5 / 100)`: 8 at score 50, 7 at score 70, 5 at score 100.
pub fn interest_rate(score: u32) -> u32 {
    BASE_INTEREST_RATE - score * SCORE_RATE_FACTOR / 100
}

/// Principal plus simple interest at `rate` percent.
pub fn total_due(amount: i128, rate: u32) -> Result<i128, ContractError> {
    let interest = amount
        .checked_mul(rate as i128)
        .ok_or(ContractError::Overflow)?
        / 100;
    amount.checked_add(interest).ok_or(ContractError::Overflow)
}

pub fn quote(amount: i128, score: u32) -> Result<LoanTerms, ContractError> {
    let rate = interest_rate(score);
    Ok(LoanTerms {
        score,
        required_collateral: required_collateral(amount, score)?,
        interest_rate: rate,
        total_due: total_due(amount, rate)?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::{MAX_SCORE, MIN_SCORE};

    #[test]
    fn test_collateral_ratio_bounds() {
        assert_eq!(collateral_ratio(MIN_SCORE), 75);
        assert_eq!(collateral_ratio(MAX_SCORE), 50);
        assert_eq!(collateral_ratio(70), 65);
    }

    #[test]
    fn test_required_collateral_non_increasing_in_score() {
        let amount = 12_345_i128;
        let mut previous = required_collateral(amount, MIN_SCORE).unwrap();
        for score in MIN_SCORE + 1..=MAX_SCORE {
            let current = required_collateral(amount, score).unwrap();
            assert!(current <= previous, "collateral rose at score {}", score);
            previous = current;
        }
    }

    #[test]
    fn test_required_collateral_truncates() {
        assert_eq!(required_collateral(1_000, 70).unwrap(), 650);
        // 999 * 65 / 100 = 649.35
        assert_eq!(required_collateral(999, 70).unwrap(), 649);
        // 1 * 75 / 100 = 0.75
        assert_eq!(required_collateral(1, 50).unwrap(), 0);
        // score 51 -> floor(25.5) = 25 -> ratio 75
        assert_eq!(required_collateral(1_000, 51).unwrap(), 750);
    }

    #[test]
    fn test_interest_rate_bounds_and_monotonic() {
        // floor(2.5) = 2
        assert_eq!(interest_rate(MIN_SCORE), 8);
        assert_eq!(interest_rate(69), 7);
        assert_eq!(interest_rate(70), 7);
        assert_eq!(interest_rate(80), 6);
        assert_eq!(interest_rate(MAX_SCORE), 5);
        for score in MIN_SCORE + 1..=MAX_SCORE {
            assert!(interest_rate(score) <= interest_rate(score - 1));
        }
    }

    #[test]
    fn test_total_due() {
        assert_eq!(total_due(1_000, 7).unwrap(), 1_070);
        // 15 * 7 / 100 = 1.05
        assert_eq!(total_due(15, 7).unwrap(), 16);
        assert_eq!(total_due(10, 5).unwrap(), 10);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(
            required_collateral(i128::MAX, 70),
            Err(ContractError::Overflow)
        );
        assert_eq!(total_due(i128::MAX, 7), Err(ContractError::Overflow));
    }

    #[test]
    fn test_quote() {
        let terms = quote(1_000, 70).unwrap();
        assert_eq!(
            terms,
            LoanTerms {
                score: 70,
                required_collateral: 650,
                interest_rate: 7,
                total_due: 1_070,
            }
        );
    }
}
