//! Emergency pause control for buyer-facing plan operations.
//!
//! When paused, plan entrypoints reject execution. Read-only queries and
//! admin recovery operations stay available.

use crate::admin::AdminStorage;
use crate::errors::InstallmentError;
use crate::events::{emit_paused, emit_unpaused};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

const PAUSED_KEY: Symbol = symbol_short!("paused");

pub struct PauseControl;

impl PauseControl {
    /// Returns true when the protocol is paused.
    pub fn is_paused(env: &Env) -> bool {
        env.storage().instance().get(&PAUSED_KEY).unwrap_or(false)
    }

    /// Pause the protocol (admin only).
    pub fn pause(env: &Env, admin: &Address) -> Result<(), InstallmentError> {
        AdminStorage::require_admin_auth(env, admin)?;
        env.storage().instance().set(&PAUSED_KEY, &true);
        emit_paused(env, admin);
        Ok(())
    }

    /// Unpause the protocol (admin only).
    pub fn unpause(env: &Env, admin: &Address) -> Result<(), InstallmentError> {
        AdminStorage::require_admin_auth(env, admin)?;
        env.storage().instance().set(&PAUSED_KEY, &false);
        emit_unpaused(env, admin);
        Ok(())
    }

    /// Reject state-changing operations when the protocol is paused.
    pub fn require_not_paused(env: &Env) -> Result<(), InstallmentError> {
        if Self::is_paused(env) {
            return Err(InstallmentError::ProtocolPaused);
        }
        Ok(())
    }
}
