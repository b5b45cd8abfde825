//! Loan ledger: loan records, the per-borrower loan index, and the
//! Active -> Settled / Active -> Defaulted state machine.
//!
//! Every operation validates fully before its first write, then performs
//! writes and escrow transfers. An escrow failure returns an error, which
//! rolls back the enclosing invocation.

use soroban_sdk::{Address, Env, Vec};

use crate::escrow::Escrow;
use crate::events::{publish_loan_defaulted, publish_loan_originated, publish_loan_repayment};
use crate::score;
use crate::storage::{
    bump_instance, bump_persistent, read_next_loan_id, read_total_escrowed, write_next_loan_id,
    write_total_escrowed, DataKey,
};
use crate::terms;
use crate::types::{
    ContractError, Loan, LOAN_INDEX_CAPACITY, MAX_ACTIVE_LOANS, MAX_DURATION_LEDGERS,
    MIN_BORROW_SCORE,
};

pub(crate) fn read(env: &Env, loan_id: u64) -> Option<Loan> {
    env.storage().persistent().get(&DataKey::Loan(loan_id))
}

fn write(env: &Env, loan: &Loan) {
    let key = DataKey::Loan(loan.id);
    env.storage().persistent().set(&key, loan);
    bump_persistent(env, &key);
}

pub(crate) fn read_index(env: &Env, borrower: &Address) -> Option<Vec<u64>> {
    env.storage()
        .persistent()
        .get(&DataKey::ActiveLoans(borrower.clone()))
}

fn write_index(env: &Env, borrower: &Address, index: &Vec<u64>) {
    let key = DataKey::ActiveLoans(borrower.clone());
    env.storage().persistent().set(&key, index);
    bump_persistent(env, &key);
}

/// Load a loan for settlement or default, enforcing the id bound first.
fn load(env: &Env, loan_id: u64) -> Result<Loan, ContractError> {
    if loan_id > read_next_loan_id(env) {
        return Err(ContractError::InvalidLoanId);
    }
    read(env, loan_id).ok_or(ContractError::LoanNotFound)
}

pub(crate) fn total_due(loan: &Loan) -> Result<i128, ContractError> {
    terms::total_due(loan.amount, loan.interest_rate)
}

pub(crate) fn outstanding(loan: &Loan) -> Result<i128, ContractError> {
    let due = total_due(loan)?;
    Ok(due
        .checked_sub(loan.repaid_amount)
        .ok_or(ContractError::Overflow)?
        .max(0))
}

/// Open a loan for `borrower` and return its id.
///
/// The index is append-only, so its length counts every loan the borrower
/// ever took. Admission compares that length inclusively against
/// `MAX_ACTIVE_LOANS`, which lets a sixth loan through.
pub(crate) fn originate(
    env: &Env,
    borrower: &Address,
    amount: i128,
    collateral: i128,
    duration: u32,
) -> Result<u64, ContractError> {
    let profile = score::get(env, borrower)?;
    if profile.score < MIN_BORROW_SCORE {
        return Err(ContractError::InsufficientScore);
    }

    let mut index = read_index(env, borrower).unwrap_or_else(|| Vec::new(env));
    if index.len() > MAX_ACTIVE_LOANS {
        return Err(ContractError::TooManyActiveLoans);
    }
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    if duration == 0 || duration > MAX_DURATION_LEDGERS {
        return Err(ContractError::InvalidDuration);
    }
    if collateral < terms::required_collateral(amount, profile.score)? {
        return Err(ContractError::InsufficientCollateral);
    }
    if index.len() >= LOAN_INDEX_CAPACITY {
        return Err(ContractError::IndexFull);
    }

    let now = env.ledger().sequence();
    let due_at = now.checked_add(duration).ok_or(ContractError::Overflow)?;
    let loan_id = read_next_loan_id(env)
        .checked_add(1)
        .ok_or(ContractError::Overflow)?;
    let total_escrowed = read_total_escrowed(env)
        .checked_add(collateral)
        .ok_or(ContractError::Overflow)?;

    let escrow = Escrow::load(env)?;
    let reserve = escrow
        .balance(&escrow.custody())
        .checked_add(collateral)
        .ok_or(ContractError::Overflow)?;
    if escrow.balance(borrower) < collateral || reserve < amount {
        return Err(ContractError::EscrowTransferFailed);
    }

    let loan = Loan {
        id: loan_id,
        borrower: borrower.clone(),
        amount,
        collateral,
        originated_at: now,
        due_at,
        interest_rate: terms::interest_rate(profile.score),
        is_active: true,
        is_defaulted: false,
        repaid_amount: 0,
    };

    write_next_loan_id(env, loan_id);
    write(env, &loan);
    index.push_back(loan_id);
    write_index(env, borrower, &index);
    write_total_escrowed(env, total_escrowed);
    bump_instance(env);

    escrow.deposit(borrower, collateral)?;
    escrow.release(borrower, amount)?;

    publish_loan_originated(env, &loan);
    Ok(loan_id)
}

/// Apply a repayment from `caller`. Overpayment is accepted and kept.
pub(crate) fn repay(
    env: &Env,
    caller: &Address,
    loan_id: u64,
    amount: i128,
) -> Result<Loan, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }

    let mut loan = load(env, loan_id)?;
    if loan.borrower != *caller {
        return Err(ContractError::Unauthorized);
    }
    if loan.is_defaulted {
        return Err(ContractError::Defaulted);
    }
    if !loan.is_active {
        return Err(ContractError::LoanNotFound);
    }

    let due = total_due(&loan)?;
    loan.repaid_amount = loan
        .repaid_amount
        .checked_add(amount)
        .ok_or(ContractError::Overflow)?;
    loan.is_active = loan.repaid_amount < due;

    let escrow = Escrow::load(env)?;
    if escrow.balance(caller) < amount {
        return Err(ContractError::EscrowTransferFailed);
    }

    write(env, &loan);
    escrow.deposit(caller, amount)?;

    if !loan.is_active {
        score::apply_outcome(env, &loan.borrower, true, loan.amount)?;
        let total_escrowed = read_total_escrowed(env)
            .checked_sub(loan.collateral)
            .ok_or(ContractError::Overflow)?;
        write_total_escrowed(env, total_escrowed);
        bump_instance(env);
        escrow.release(&loan.borrower, loan.collateral)?;
    }

    publish_loan_repayment(env, &loan, amount, due);
    Ok(loan)
}

/// Mark an overdue active loan as defaulted. The collateral stays in custody
/// and `total_escrowed` still counts it.
pub(crate) fn mark_defaulted(env: &Env, loan_id: u64) -> Result<Loan, ContractError> {
    let mut loan = load(env, loan_id)?;
    if env.ledger().sequence() < loan.due_at {
        return Err(ContractError::NotDue);
    }
    if !loan.is_active {
        return Err(ContractError::LoanNotFound);
    }

    loan.is_active = false;
    loan.is_defaulted = true;
    write(env, &loan);
    score::apply_outcome(env, &loan.borrower, false, loan.amount)?;

    publish_loan_defaulted(env, &loan);
    Ok(loan)
}
