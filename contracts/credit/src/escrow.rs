//! Escrow transfers through the configured token contract.

use soroban_sdk::{token, Address, Env};

use crate::storage::require_token;
use crate::types::ContractError;

pub(crate) struct Escrow<'a> {
    env: &'a Env,
    client: token::Client<'a>,
}

impl<'a> Escrow<'a> {
    pub(crate) fn load(env: &'a Env) -> Result<Self, ContractError> {
        let token_address = require_token(env)?;
        Ok(Self {
            env,
            client: token::Client::new(env, &token_address),
        })
    }

    /// The contract's own address, which holds collateral and the lending reserve.
    pub(crate) fn custody(&self) -> Address {
        self.env.current_contract_address()
    }

    pub(crate) fn balance(&self, holder: &Address) -> i128 {
        self.client.balance(holder)
    }

    /// Move `amount` from `from` to `to`, failing with `EscrowTransferFailed`
    /// when `from` cannot cover it or the token rejects the transfer.
    pub(crate) fn transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if amount == 0 {
            return Ok(());
        }
        if self.balance(from) < amount {
            return Err(ContractError::EscrowTransferFailed);
        }
        match self.client.try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::EscrowTransferFailed),
        }
    }

    pub(crate) fn deposit(&self, from: &Address, amount: i128) -> Result<(), ContractError> {
        self.transfer(from, &self.custody(), amount)
    }

    pub(crate) fn release(&self, to: &Address, amount: i128) -> Result<(), ContractError> {
        self.transfer(&self.custody(), to, amount)
    }
}
