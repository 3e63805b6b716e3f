//! Contract initialization and protocol configuration.
//!
//! The contract is initialized exactly once with the administrator and every
//! external dependency it talks to. After that, configuration changes go
//! through admin-only setters that validate their input and emit `cfg_upd`.
//!
//! # Stored configuration
//!
//! - Price feed address (native/USD price, queried on every conversion)
//! - Asset registry address (custody of the digital goods)
//! - Payment token address (what buyers pay with)
//! - Fallback price used when the feed reports a non-positive price
//! - Late fee percentage applied to installments paid after the grace period

use crate::admin::AdminStorage;
use crate::errors::InstallmentError;
use crate::events::emit_config_updated;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

/// Storage key for protocol configuration
const PROTOCOL_CONFIG_KEY: Symbol = symbol_short!("proto_cf");

/// Upper bound for the late fee percentage
pub const MAX_LATE_FEE_PERCENT: u32 = 100;

/// Protocol configuration owned by the contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    /// External native/USD price feed
    pub price_feed: Address,
    /// Registry holding the purchasable units
    pub asset_registry: Address,
    /// Token buyers pay in (native units)
    pub payment_token: Address,
    /// Price used when the feed reports zero or a negative value
    pub fallback_price: i128,
    /// Late fee charged per late installment, in percent of the installment
    pub late_fee_percent: u32,
    /// Timestamp when configuration was last updated
    pub updated_at: u64,
    /// Address that made the last update
    pub updated_by: Address,
}

/// Initialization parameters for the contract
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializationParams {
    pub admin: Address,
    pub price_feed: Address,
    pub asset_registry: Address,
    pub payment_token: Address,
    pub fallback_price: i128,
    pub late_fee_percent: u32,
}

pub struct ProtocolInitializer;

impl ProtocolInitializer {
    /// Initialize the contract with all required configuration.
    ///
    /// # Returns
    /// * `Ok(())` if initialization succeeds
    /// * `Err(InstallmentError::AlreadyInitialized)` on a second call
    /// * `Err(InstallmentError::InvalidPrice)` if `fallback_price <= 0`
    /// * `Err(InstallmentError::InvalidPercentage)` if `late_fee_percent > 100`
    ///
    /// # Security
    /// - Requires authorization from the admin address
    /// - Validates all parameters before any state changes
    pub fn initialize(env: &Env, params: &InitializationParams) -> Result<(), InstallmentError> {
        params.admin.require_auth();

        if Self::is_initialized(env) {
            return Err(InstallmentError::AlreadyInitialized);
        }

        validate_fallback_price(params.fallback_price)?;
        validate_late_fee_percent(params.late_fee_percent)?;

        AdminStorage::initialize(env, &params.admin)?;

        let config = ProtocolConfig {
            price_feed: params.price_feed.clone(),
            asset_registry: params.asset_registry.clone(),
            payment_token: params.payment_token.clone(),
            fallback_price: params.fallback_price,
            late_fee_percent: params.late_fee_percent,
            updated_at: env.ledger().timestamp(),
            updated_by: params.admin.clone(),
        };
        env.storage().instance().set(&PROTOCOL_CONFIG_KEY, &config);

        emit_config_updated(env, &params.admin, symbol_short!("init"));

        Ok(())
    }

    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&PROTOCOL_CONFIG_KEY)
    }

    /// Get the protocol configuration or fail with `NotInitialized`
    pub fn get_config(env: &Env) -> Result<ProtocolConfig, InstallmentError> {
        env.storage()
            .instance()
            .get(&PROTOCOL_CONFIG_KEY)
            .ok_or(InstallmentError::NotInitialized)
    }

    /// Admin-only: set the price used when the feed reports an invalid value.
    pub fn set_fallback_price(
        env: &Env,
        admin: &Address,
        fallback_price: i128,
    ) -> Result<(), InstallmentError> {
        validate_fallback_price(fallback_price)?;
        Self::update(env, admin, symbol_short!("fallback"), |config| {
            config.fallback_price = fallback_price;
        })
    }

    /// Admin-only: set the late fee percentage (0..=100).
    pub fn set_late_fee_percent(
        env: &Env,
        admin: &Address,
        late_fee_percent: u32,
    ) -> Result<(), InstallmentError> {
        validate_late_fee_percent(late_fee_percent)?;
        Self::update(env, admin, symbol_short!("late_fee"), |config| {
            config.late_fee_percent = late_fee_percent;
        })
    }

    /// Admin-only: point the contract at a different price feed.
    pub fn set_price_feed(
        env: &Env,
        admin: &Address,
        price_feed: &Address,
    ) -> Result<(), InstallmentError> {
        Self::update(env, admin, symbol_short!("feed"), |config| {
            config.price_feed = price_feed.clone();
        })
    }

    /// Admin-only: point the contract at a different asset registry.
    pub fn set_asset_registry(
        env: &Env,
        admin: &Address,
        asset_registry: &Address,
    ) -> Result<(), InstallmentError> {
        Self::update(env, admin, symbol_short!("registry"), |config| {
            config.asset_registry = asset_registry.clone();
        })
    }

    fn update<F>(env: &Env, admin: &Address, field: Symbol, apply: F) -> Result<(), InstallmentError>
    where
        F: FnOnce(&mut ProtocolConfig),
    {
        AdminStorage::require_admin_auth(env, admin)?;
        let mut config = Self::get_config(env)?;
        apply(&mut config);
        config.updated_at = env.ledger().timestamp();
        config.updated_by = admin.clone();
        env.storage().instance().set(&PROTOCOL_CONFIG_KEY, &config);
        emit_config_updated(env, admin, field);
        Ok(())
    }
}

fn validate_fallback_price(fallback_price: i128) -> Result<(), InstallmentError> {
    if fallback_price <= 0 {
        return Err(InstallmentError::InvalidPrice);
    }
    Ok(())
}

fn validate_late_fee_percent(late_fee_percent: u32) -> Result<(), InstallmentError> {
    if late_fee_percent > MAX_LATE_FEE_PERCENT {
        return Err(InstallmentError::InvalidPercentage);
    }
    Ok(())
}
