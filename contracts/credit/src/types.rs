//! Core data types for the credit-loans contract.

use soroban_sdk::{contracttype, Address};

/// Score assigned to every freshly initialized profile.
pub const INITIAL_SCORE: u32 = 50;
/// Lowest score a profile can fall to.
pub const MIN_SCORE: u32 = 50;
/// Highest score a profile can reach.
pub const MAX_SCORE: u32 = 100;
/// Score gained when a loan is settled in full.
pub const SETTLEMENT_BONUS: u32 = 2;
/// Score lost when a loan is marked defaulted.
pub const DEFAULT_PENALTY: u32 = 10;
/// Minimum score required to originate a loan.
pub const MIN_BORROW_SCORE: u32 = 70;

/// Admission ceiling compared (inclusively) against the borrower's index length.
pub const MAX_ACTIVE_LOANS: u32 = 5;
/// Hard capacity of the per-borrower loan index.
pub const LOAN_INDEX_CAPACITY: u32 = 20;
/// Longest loan duration, in ledgers (~1 year at 5s per ledger).
pub const MAX_DURATION_LEDGERS: u32 = 52_560;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoanStatus {
    Active = 0,
    Settled = 1,
    Defaulted = 2,
}

#[soroban_sdk::contracterror]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    AlreadyExists = 3,
    ProfileNotFound = 4,
    Unauthorized = 5,
    InsufficientScore = 6,
    TooManyActiveLoans = 7,
    InvalidAmount = 8,
    InvalidDuration = 9,
    InsufficientCollateral = 10,
    IndexFull = 11,
    EscrowTransferFailed = 12,
    LoanNotFound = 13,
    Defaulted = 14,
    NotDue = 15,
    InvalidLoanId = 16,
    Overflow = 17,
    Reentrancy = 18,
}

/// Per-user reputation record.
///
/// Only the score ledger mutates a profile, and only in response to a loan
/// outcome. `total_borrowed` and `loans_taken` are carried for indexers but
/// are not advanced by any current operation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditProfile {
    pub score: u32,
    pub total_borrowed: i128,
    pub total_repaid: i128,
    pub loans_taken: u32,
    pub loans_repaid: u32,
    /// Ledger sequence of the last mutation.
    pub last_update: u32,
}

/// Stored loan record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    pub id: u64,
    pub borrower: Address,
    pub amount: i128,
    pub collateral: i128,
    pub originated_at: u32,
    pub due_at: u32,
    /// Whole percent, frozen at origination.
    pub interest_rate: u32,
    pub is_active: bool,
    pub is_defaulted: bool,
    pub repaid_amount: i128,
}

impl Loan {
    pub fn status(&self) -> LoanStatus {
        match (self.is_active, self.is_defaulted) {
            (_, true) => LoanStatus::Defaulted,
            (true, false) => LoanStatus::Active,
            (false, false) => LoanStatus::Settled,
        }
    }
}

/// Terms a borrower would receive for a given principal at their current score.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LoanTerms {
    pub score: u32,
    pub required_collateral: i128,
    pub interest_rate: u32,
    pub total_due: i128,
}
