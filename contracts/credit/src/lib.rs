#![no_std]

//! Credit-loans contract: per-user credit scores, score-priced collateralized
//! loans, repayment and default.
//!
//! # Terms
//! A borrower's score in `[50, 100]` sets both the collateral ratio
//! (75% down to 50%) and the interest rate (8% down to 5%). The rate is frozen
//! on the loan at origination.
//!
//! # Reentrancy
//! Soroban token transfers (e.g. Stellar Asset Contract) do not invoke callbacks back into
//! the caller, and the host rejects contract re-entry on its own. `originate_loan` and
//! `repay_loan` still hold a reentrancy guard for the duration of the call.

mod escrow;
mod events;
mod loans;
mod score;
mod storage;
mod terms;
mod types;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub use events::{
    LoanDefaultedEvent, LoanOriginatedEvent, LoanRepaymentEvent, ProfileInitializedEvent,
    ScoreUpdatedEvent,
};
pub use types::{ContractError, CreditProfile, Loan, LoanStatus, LoanTerms};

use storage::{
    clear_reentrancy_guard, is_initialized, read_admin, read_next_loan_id, read_token,
    read_total_escrowed, require_admin, require_token, set_reentrancy_guard, write_config,
};

/// Run `f` with the reentrancy guard held, clearing it on every exit path.
fn guarded<T>(
    env: &Env,
    f: impl FnOnce() -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    set_reentrancy_guard(env)?;
    let result = f();
    clear_reentrancy_guard(env);
    result
}

#[contract]
pub struct CreditLoans;

#[contractimpl]
impl CreditLoans {
    /// Initialize the contract with the admin and the escrow token address.
    ///
    /// The admin is fixed for the lifetime of the contract.
    pub fn init(env: Env, admin: Address, token: Address) -> Result<(), ContractError> {
        if is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        write_config(&env, &admin, &token);
        Ok(())
    }

    /// Create the caller's credit profile at the initial score.
    ///
    /// # Errors
    /// * `AlreadyExists` - the user already has a profile
    pub fn initialize_profile(env: Env, user: Address) -> Result<(), ContractError> {
        user.require_auth();
        score::initialize(&env, &user)?;
        Ok(())
    }

    /// Originate a loan: escrows `collateral` from the borrower and disburses
    /// `amount` from the contract reserve. Returns the new loan id.
    ///
    /// # Errors
    /// * `ProfileNotFound` - borrower has no profile
    /// * `InsufficientScore` - score below 70
    /// * `TooManyActiveLoans` - more than 5 ids already in the borrower's index
    /// * `InvalidAmount` - `amount` <= 0
    /// * `InvalidDuration` - `duration` is 0 or above 52 560 ledgers
    /// * `InsufficientCollateral` - below the score-derived requirement
    /// * `IndexFull` - borrower's index already holds 20 ids
    /// * `EscrowTransferFailed` - borrower or reserve cannot cover the transfers
    pub fn originate_loan(
        env: Env,
        borrower: Address,
        amount: i128,
        collateral: i128,
        duration: u32,
    ) -> Result<u64, ContractError> {
        borrower.require_auth();
        require_token(&env)?;
        guarded(&env, || {
            loans::originate(&env, &borrower, amount, collateral, duration)
        })
    }

    /// Repay `amount` towards a loan. Once the cumulative repayment covers the
    /// total due the loan settles, the collateral is returned and the
    /// borrower's score rises.
    ///
    /// # Errors
    /// * `InvalidAmount` - `amount` <= 0
    /// * `InvalidLoanId` - id beyond the last assigned id
    /// * `LoanNotFound` - loan missing or already settled
    /// * `Unauthorized` - caller is not the borrower
    /// * `Defaulted` - loan was marked defaulted
    /// * `EscrowTransferFailed` - caller cannot cover `amount`
    pub fn repay_loan(
        env: Env,
        caller: Address,
        loan_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        require_token(&env)?;
        guarded(&env, || loans::repay(&env, &caller, loan_id, amount).map(|_| ()))
    }

    /// Mark an overdue loan as defaulted (admin only). Lowers the borrower's
    /// score; the collateral remains in custody.
    ///
    /// # Errors
    /// * `Unauthorized` - caller is not the admin
    /// * `InvalidLoanId` - id beyond the last assigned id
    /// * `LoanNotFound` - loan missing or no longer active
    /// * `NotDue` - current ledger is before the loan's due ledger
    pub fn mark_defaulted(env: Env, caller: Address, loan_id: u64) -> Result<(), ContractError> {
        let admin = require_admin(&env)?;
        caller.require_auth();
        if caller != admin {
            return Err(ContractError::Unauthorized);
        }
        loans::mark_defaulted(&env, loan_id)?;
        Ok(())
    }

    /// Get a user's credit profile (view function).
    pub fn get_profile(env: Env, user: Address) -> Option<CreditProfile> {
        score::read(&env, &user)
    }

    /// Get a loan record (view function).
    pub fn get_loan(env: Env, loan_id: u64) -> Option<Loan> {
        loans::read(&env, loan_id)
    }

    /// Get every loan id ever originated by `user`, oldest first (view function).
    pub fn get_active_loans(env: Env, user: Address) -> Option<Vec<u64>> {
        loans::read_index(&env, &user)
    }

    /// Get the lifecycle state of a loan (view function).
    pub fn get_loan_status(env: Env, loan_id: u64) -> Option<LoanStatus> {
        loans::read(&env, loan_id).map(|loan| loan.status())
    }

    /// Terms `user` would get for `amount` at their current score.
    pub fn quote_terms(env: Env, user: Address, amount: i128) -> Result<LoanTerms, ContractError> {
        let profile = score::get(&env, &user)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        terms::quote(amount, profile.score)
    }

    /// Remaining amount needed to settle a loan, zero once covered.
    pub fn amount_outstanding(env: Env, loan_id: u64) -> Result<i128, ContractError> {
        let loan = loans::read(&env, loan_id).ok_or(ContractError::LoanNotFound)?;
        loans::outstanding(&loan)
    }

    /// Collateral currently held for active loans (view function).
    pub fn total_escrowed(env: Env) -> i128 {
        read_total_escrowed(&env)
    }

    /// Last assigned loan id, zero before the first origination (view function).
    pub fn last_loan_id(env: Env) -> u64 {
        read_next_loan_id(&env)
    }

    /// Admin address set at initialization (view function).
    pub fn admin(env: Env) -> Option<Address> {
        read_admin(&env)
    }

    /// Escrow token address set at initialization (view function).
    pub fn token(env: Env) -> Option<Address> {
        read_token(&env)
    }
}
