//! Event types and topic constants for the credit-loans contract.
//! Stable event schemas for indexing and analytics.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::Loan;

pub const TOPIC_CREDIT: Symbol = symbol_short!("credit");
pub const TOPIC_PROFILE: Symbol = symbol_short!("profile");
pub const TOPIC_ORIGINATE: Symbol = symbol_short!("originate");
pub const TOPIC_REPAY: Symbol = symbol_short!("repay");
pub const TOPIC_DEFAULT: Symbol = symbol_short!("default");
pub const TOPIC_SCORE: Symbol = symbol_short!("score");

/// Event emitted when a user's credit profile is created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileInitializedEvent {
    pub user: Address,
    pub score: u32,
    pub ledger: u32,
}

/// Event emitted when a loan is originated and funds are disbursed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanOriginatedEvent {
    pub loan_id: u64,
    pub borrower: Address,
    pub amount: i128,
    pub collateral: i128,
    pub interest_rate: u32,
    pub due_at: u32,
}

/// Event emitted on every repayment. `settled` is true once the total due is covered.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanRepaymentEvent {
    pub loan_id: u64,
    pub borrower: Address,
    pub amount: i128,
    pub repaid_amount: i128,
    pub total_due: i128,
    pub settled: bool,
}

/// Event emitted when the admin marks an overdue loan as defaulted.
/// The collateral stays in custody.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LoanDefaultedEvent {
    pub loan_id: u64,
    pub borrower: Address,
    pub amount: i128,
    pub collateral: i128,
    pub ledger: u32,
}

/// Event emitted whenever a loan outcome moves a score.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoreUpdatedEvent {
    pub user: Address,
    pub old_score: u32,
    pub new_score: u32,
    pub success: bool,
}

pub fn publish_profile_initialized(env: &Env, user: &Address, score: u32) {
    env.events().publish(
        (TOPIC_CREDIT, TOPIC_PROFILE),
        ProfileInitializedEvent {
            user: user.clone(),
            score,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_loan_originated(env: &Env, loan: &Loan) {
    env.events().publish(
        (TOPIC_CREDIT, TOPIC_ORIGINATE),
        LoanOriginatedEvent {
            loan_id: loan.id,
            borrower: loan.borrower.clone(),
            amount: loan.amount,
            collateral: loan.collateral,
            interest_rate: loan.interest_rate,
            due_at: loan.due_at,
        },
    );
}

pub fn publish_loan_repayment(env: &Env, loan: &Loan, amount: i128, total_due: i128) {
    env.events().publish(
        (TOPIC_CREDIT, TOPIC_REPAY),
        LoanRepaymentEvent {
            loan_id: loan.id,
            borrower: loan.borrower.clone(),
            amount,
            repaid_amount: loan.repaid_amount,
            total_due,
            settled: !loan.is_active,
        },
    );
}

pub fn publish_loan_defaulted(env: &Env, loan: &Loan) {
    env.events().publish(
        (TOPIC_CREDIT, TOPIC_DEFAULT),
        LoanDefaultedEvent {
            loan_id: loan.id,
            borrower: loan.borrower.clone(),
            amount: loan.amount,
            collateral: loan.collateral,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_score_updated(
    env: &Env,
    user: &Address,
    old_score: u32,
    new_score: u32,
    success: bool,
) {
    env.events().publish(
        (TOPIC_CREDIT, TOPIC_SCORE),
        ScoreUpdatedEvent {
            user: user.clone(),
            old_score,
            new_score,
            success,
        },
    );
}
