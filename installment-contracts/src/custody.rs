//! Custody of purchased units and collection of buyer payments.
//!
//! Units live in an external asset registry. The admin account holds unsold
//! units and the registry must accept this contract as spender for both the
//! admin and buyers, the same way token allowances work. Payments are pulled
//! from the buyer into this contract in the configured payment token.

use crate::errors::InstallmentError;
use soroban_sdk::{contractclient, token, Address, Env};

/// Interface of the external registry that tracks unit ownership per item.
#[allow(dead_code)]
#[contractclient(name = "AssetRegistryClient")]
pub trait AssetRegistry {
    /// Move `amount` units of `item_id` from `from` to `to`. Fails if `from`
    /// holds fewer than `amount` units.
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, item_id: u64, amount: i128);

    /// Units of `item_id` held by `account`.
    fn balance(env: Env, account: Address, item_id: u64) -> i128;
}

pub struct Custody;

impl Custody {
    /// Move units in the registry on behalf of this contract.
    pub fn transfer_units(
        env: &Env,
        registry: &Address,
        from: &Address,
        to: &Address,
        item_id: u64,
        amount: i128,
    ) -> Result<(), InstallmentError> {
        let client = AssetRegistryClient::new(env, registry);
        match client.try_transfer_from(
            &env.current_contract_address(),
            from,
            to,
            &item_id,
            &amount,
        ) {
            Ok(Ok(())) => Ok(()),
            _ => Err(InstallmentError::CustodyTransferFailed),
        }
    }

    /// Units of `item_id` held by `account`. A failing registry read is
    /// `CustodyUnavailable`.
    pub fn balance_of(
        env: &Env,
        registry: &Address,
        account: &Address,
        item_id: u64,
    ) -> Result<i128, InstallmentError> {
        let client = AssetRegistryClient::new(env, registry);
        match client.try_balance(account, &item_id) {
            Ok(Ok(balance)) => Ok(balance),
            _ => Err(InstallmentError::CustodyUnavailable),
        }
    }

    /// Pull a buyer payment into the contract. Zero amounts are a no-op.
    pub fn collect_payment(
        env: &Env,
        payment_token: &Address,
        payer: &Address,
        amount: i128,
    ) -> Result<(), InstallmentError> {
        if amount == 0 {
            return Ok(());
        }
        Self::transfer_funds(env, payment_token, payer, &env.current_contract_address(), amount)
    }

    /// Transfer payment tokens between addresses.
    pub fn transfer_funds(
        env: &Env,
        payment_token: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), InstallmentError> {
        if amount < 0 {
            return Err(InstallmentError::InvalidAmount);
        }
        let client = token::Client::new(env, payment_token);
        match client.try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(InstallmentError::PaymentTransferFailed),
        }
    }
}
