//! Admin role management for the installment contract.
//!
//! A single administrator owns the catalog, the protocol configuration and the
//! privileged plan transitions (default marking and asset reclamation). The
//! administrator address is also the custody account that holds unsold units.
//!
//! # Security Model
//!
//! - Admin is written once during initialization
//! - Admin can transfer the role to another address
//! - Every privileged operation requires both `require_auth` and an address match

use crate::errors::InstallmentError;
use crate::events::{emit_admin_set, emit_admin_transferred};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

/// Storage keys for admin management
pub const ADMIN_KEY: Symbol = symbol_short!("admin");
pub const ADMIN_INITIALIZED_KEY: Symbol = symbol_short!("adm_init");

/// Admin storage and management operations
pub struct AdminStorage;

impl AdminStorage {
    /// Store the admin address (can only be called once)
    ///
    /// # Returns
    /// * `Ok(())` if initialization succeeds
    /// * `Err(InstallmentError::AlreadyInitialized)` if admin was already set
    pub fn initialize(env: &Env, admin: &Address) -> Result<(), InstallmentError> {
        let is_initialized: bool = env
            .storage()
            .instance()
            .get(&ADMIN_INITIALIZED_KEY)
            .unwrap_or(false);

        if is_initialized {
            return Err(InstallmentError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN_KEY, admin);
        env.storage().instance().set(&ADMIN_INITIALIZED_KEY, &true);

        emit_admin_set(env, admin);

        Ok(())
    }

    /// Transfer admin role to a new address
    ///
    /// # Returns
    /// * `Ok(())` if transfer succeeds
    /// * `Err(InstallmentError::NotAdmin)` if caller is not current admin
    ///
    /// # Security
    /// - Requires authorization from current admin
    /// - Emits `adm_trf` for the audit trail
    pub fn set_admin(
        env: &Env,
        current_admin: &Address,
        new_admin: &Address,
    ) -> Result<(), InstallmentError> {
        current_admin.require_auth();
        Self::require_admin(env, current_admin)?;

        env.storage().instance().set(&ADMIN_KEY, new_admin);

        emit_admin_transferred(env, current_admin, new_admin);

        Ok(())
    }

    /// Get the current admin address, `None` before initialization
    pub fn get_admin(env: &Env) -> Option<Address> {
        env.storage().instance().get(&ADMIN_KEY)
    }

    /// Get the admin address or fail with `NotInitialized`
    pub fn admin(env: &Env) -> Result<Address, InstallmentError> {
        Self::get_admin(env).ok_or(InstallmentError::NotInitialized)
    }

    pub fn is_admin(env: &Env, address: &Address) -> bool {
        if let Some(admin) = Self::get_admin(env) {
            admin == *address
        } else {
            false
        }
    }

    /// Require that an address is the admin (authorization helper)
    ///
    /// # Returns
    /// * `Ok(())` if the address is the admin
    /// * `Err(InstallmentError::NotAdmin)` if not admin or admin not set
    pub fn require_admin(env: &Env, address: &Address) -> Result<(), InstallmentError> {
        if !Self::is_admin(env, address) {
            return Err(InstallmentError::NotAdmin);
        }
        Ok(())
    }

    /// Authorize `caller` and check it is the admin in one step.
    ///
    /// Fails with `NotInitialized` before initialization and `NotAdmin` after.
    pub fn require_admin_auth(env: &Env, caller: &Address) -> Result<(), InstallmentError> {
        let admin = Self::admin(env)?;
        caller.require_auth();
        if admin != *caller {
            return Err(InstallmentError::NotAdmin);
        }
        Ok(())
    }
}
