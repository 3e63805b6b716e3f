#![no_std]
#[cfg(test)]
extern crate std;

use soroban_sdk::{contract, contractimpl, Address, Env};

mod admin;
mod catalog;
mod custody;
mod defaults;
mod errors;
mod events;
mod fees;
mod init;
mod installments;
mod oracle;
mod pause;
mod plans;
mod reentrancy;
mod storage;

pub use catalog::{ItemTerms, NewItem};
pub use custody::{AssetRegistry, AssetRegistryClient};
pub use errors::InstallmentError;
pub use init::{InitializationParams, ProtocolConfig};
pub use installments::InstallmentQuote;
pub use oracle::{
    Conversion, PriceData, PriceFeed, PriceFeedClient, PriceSource, NATIVE_UNIT_SCALE,
    USD_PRICE_SCALE,
};
pub use plans::{PaymentPlan, PlanStatus};

use admin::AdminStorage;
use catalog::Catalog;
use custody::Custody;
use events::emit_proceeds_withdrawn;
use init::ProtocolInitializer;
use oracle::OracleService;
use pause::PauseControl;
use plans::PlanStorage;

#[contract]
pub struct InstallmentContract;

#[contractimpl]
impl InstallmentContract {
    // ============================================================================
    // Admin Management Functions
    // ============================================================================

    /// Initialize the contract with the admin and its external dependencies (one-time setup)
    pub fn initialize(env: Env, params: InitializationParams) -> Result<(), InstallmentError> {
        ProtocolInitializer::initialize(&env, &params)
    }

    /// Check if the contract has been initialized
    pub fn is_initialized(env: Env) -> bool {
        ProtocolInitializer::is_initialized(&env)
    }

    /// Current protocol configuration
    pub fn get_config(env: Env) -> Result<ProtocolConfig, InstallmentError> {
        ProtocolInitializer::get_config(&env)
    }

    /// Transfer admin role to a new address.
    ///
    /// The admin is also the custody account for unsold units, so the new admin
    /// must hold the inventory and approve this contract in the asset registry.
    pub fn transfer_admin(
        env: Env,
        admin: Address,
        new_admin: Address,
    ) -> Result<(), InstallmentError> {
        AdminStorage::set_admin(&env, &admin, &new_admin)
    }

    /// Get the current admin address
    pub fn get_admin(env: Env) -> Option<Address> {
        AdminStorage::get_admin(&env)
    }

    /// Admin-only: price used when the feed reports zero or a negative price.
    pub fn set_fallback_price(
        env: Env,
        admin: Address,
        fallback_price: i128,
    ) -> Result<(), InstallmentError> {
        ProtocolInitializer::set_fallback_price(&env, &admin, fallback_price)
    }

    /// Admin-only: late fee percentage (0..=100) applied to late installments.
    pub fn set_late_fee_percent(
        env: Env,
        admin: Address,
        late_fee_percent: u32,
    ) -> Result<(), InstallmentError> {
        ProtocolInitializer::set_late_fee_percent(&env, &admin, late_fee_percent)
    }

    /// Admin-only: replace the native/USD price feed.
    pub fn set_price_feed(
        env: Env,
        admin: Address,
        price_feed: Address,
    ) -> Result<(), InstallmentError> {
        ProtocolInitializer::set_price_feed(&env, &admin, &price_feed)
    }

    /// Admin-only: replace the asset registry.
    pub fn set_asset_registry(
        env: Env,
        admin: Address,
        asset_registry: Address,
    ) -> Result<(), InstallmentError> {
        ProtocolInitializer::set_asset_registry(&env, &admin, &asset_registry)
    }

    /// Pause plan operations (admin only). Getters keep working.
    pub fn pause(env: Env, admin: Address) -> Result<(), InstallmentError> {
        PauseControl::pause(&env, &admin)
    }

    /// Unpause plan operations (admin only).
    pub fn unpause(env: Env, admin: Address) -> Result<(), InstallmentError> {
        PauseControl::unpause(&env, &admin)
    }

    /// Return whether plan operations are currently paused.
    pub fn is_paused(env: Env) -> bool {
        PauseControl::is_paused(&env)
    }

    /// Admin-only: send collected payments out of the contract.
    pub fn withdraw_proceeds(
        env: Env,
        admin: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), InstallmentError> {
        reentrancy::with_payment_guard(&env, || {
            AdminStorage::require_admin_auth(&env, &admin)?;
            if amount <= 0 {
                return Err(InstallmentError::InvalidAmount);
            }
            let config = ProtocolInitializer::get_config(&env)?;
            Custody::transfer_funds(
                &env,
                &config.payment_token,
                &env.current_contract_address(),
                &to,
                amount,
            )?;
            emit_proceeds_withdrawn(&env, &admin, &to, amount);
            Ok(())
        })
    }

    // ============================================================================
    // Catalog Functions
    // ============================================================================

    /// Add a purchasable item (admin only). Returns the new item id.
    ///
    /// # Errors
    /// * `InvalidUri`, `InvalidPrice`, `InvalidPercentage`, `InvalidInstallmentCount`,
    ///   `InvalidInterval` for malformed terms
    pub fn add_item(env: Env, admin: Address, item: NewItem) -> Result<u64, InstallmentError> {
        Catalog::add_item(&env, &admin, item)
    }

    pub fn get_item(env: Env, item_id: u64) -> Result<ItemTerms, InstallmentError> {
        Catalog::require_item(&env, item_id)
    }

    pub fn item_count(env: Env) -> u64 {
        Catalog::item_count(&env)
    }

    /// Convert a USD amount (8 decimals) to native units at the current feed price.
    ///
    /// Falls back to the configured price when the feed answer is not positive.
    pub fn convert_usd_to_native(env: Env, price_usd: i128) -> Result<Conversion, InstallmentError> {
        OracleService::convert_usd_to_native(&env, price_usd)
    }

    /// Current price of an item in native units.
    pub fn get_native_price(env: Env, item_id: u64) -> Result<i128, InstallmentError> {
        installments::native_price_of(&env, item_id)
    }

    // ============================================================================
    // Payment Plan Functions
    // ============================================================================

    /// Start an installment plan with a down payment of `paid_amount` native units.
    ///
    /// # Errors
    /// * `ItemNotFound` if the item does not exist
    /// * `PlanAlreadyActive` if the buyer already has an open plan for the item
    /// * `InsufficientPayment` if `paid_amount` is below the required down payment
    pub fn start_plan(
        env: Env,
        buyer: Address,
        item_id: u64,
        paid_amount: i128,
    ) -> Result<PaymentPlan, InstallmentError> {
        PauseControl::require_not_paused(&env)?;
        reentrancy::with_payment_guard(&env, || {
            installments::start_plan(&env, &buyer, item_id, paid_amount)
        })
    }

    /// Pay the next installment. The last one delivers the unit to the buyer.
    ///
    /// # Errors
    /// * `PlanNotActive`, `PlanDefaulted`, `NoInstallmentsRemaining`
    /// * `InsufficientPayment` if `paid_amount` is below the installment plus any late fee
    pub fn pay_installment(
        env: Env,
        buyer: Address,
        item_id: u64,
        paid_amount: i128,
    ) -> Result<PaymentPlan, InstallmentError> {
        PauseControl::require_not_paused(&env)?;
        reentrancy::with_payment_guard(&env, || {
            installments::pay_installment(&env, &buyer, item_id, paid_amount)
        })
    }

    /// Settle the plan at the early settlement discount and receive the unit.
    pub fn settle_early(
        env: Env,
        buyer: Address,
        item_id: u64,
        paid_amount: i128,
    ) -> Result<PaymentPlan, InstallmentError> {
        PauseControl::require_not_paused(&env)?;
        reentrancy::with_payment_guard(&env, || {
            installments::settle_early(&env, &buyer, item_id, paid_amount)
        })
    }

    /// Mark an overdue plan as defaulted (admin only).
    pub fn mark_default(
        env: Env,
        admin: Address,
        buyer: Address,
        item_id: u64,
    ) -> Result<PaymentPlan, InstallmentError> {
        reentrancy::with_payment_guard(&env, || {
            defaults::mark_default(&env, &admin, &buyer, item_id)
        })
    }

    /// Take back every unit a defaulted buyer holds (admin only). Returns the quantity.
    pub fn reclaim_asset(
        env: Env,
        admin: Address,
        buyer: Address,
        item_id: u64,
    ) -> Result<i128, InstallmentError> {
        reentrancy::with_payment_guard(&env, || {
            defaults::reclaim_asset(&env, &admin, &buyer, item_id)
        })
    }

    pub fn get_plan(env: Env, buyer: Address, item_id: u64) -> Result<PaymentPlan, InstallmentError> {
        PlanStorage::require_plan(&env, &buyer, item_id)
    }

    /// Status of the latest plan for the pair, `None` if there never was one.
    pub fn get_plan_status(env: Env, buyer: Address, item_id: u64) -> Option<PlanStatus> {
        PlanStorage::get_plan(&env, &buyer, item_id).map(|plan| plan.status)
    }

    /// Down payment required to start a plan on the item right now.
    pub fn quote_down_payment(env: Env, item_id: u64) -> Result<i128, InstallmentError> {
        installments::quote_down_payment(&env, item_id)
    }

    /// Installment, late fee and total due if paid right now.
    pub fn quote_installment(
        env: Env,
        buyer: Address,
        item_id: u64,
    ) -> Result<InstallmentQuote, InstallmentError> {
        installments::quote_installment(&env, &buyer, item_id)
    }

    /// Additional amount needed to settle early right now.
    pub fn quote_early_settlement(
        env: Env,
        buyer: Address,
        item_id: u64,
    ) -> Result<i128, InstallmentError> {
        installments::quote_early_settlement(&env, &buyer, item_id)
    }
}

#[cfg(test)]
mod test_default;
#[cfg(test)]
mod test_pause;
