//! Reentrancy guard for plan payment and custody flows.
//!
//! Every mutating plan operation moves value through an external contract
//! (payment token, asset registry). The lock lives in instance storage and is
//! held for the whole operation, so a nested call into any guarded entrypoint
//! while a transfer is in flight is rejected.

use crate::errors::InstallmentError;
use soroban_sdk::{symbol_short, Env, Symbol};

pub(crate) const PAYMENT_LOCK_KEY: Symbol = symbol_short!("pay_lock");

/// Runs a closure with the payment reentrancy guard held.
///
/// At entry, if the lock is already set, returns `Err(OperationInProgress)`.
/// Otherwise sets the lock, runs `f`, then clears the lock on success or failure.
///
/// # Errors
/// * `InstallmentError::OperationInProgress` if called while another guarded
///   operation is in progress (re-entrant call).
pub fn with_payment_guard<F, R>(env: &Env, f: F) -> Result<R, InstallmentError>
where
    F: FnOnce() -> Result<R, InstallmentError>,
{
    if is_locked(env) {
        return Err(InstallmentError::OperationInProgress);
    }
    env.storage().instance().set(&PAYMENT_LOCK_KEY, &true);
    let result = f();
    env.storage().instance().set(&PAYMENT_LOCK_KEY, &false);
    result
}

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&PAYMENT_LOCK_KEY)
        .unwrap_or(false)
}
