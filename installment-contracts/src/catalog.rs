//! Item catalog: immutable purchase terms per item id.

use crate::admin::AdminStorage;
use crate::errors::InstallmentError;
use crate::events::emit_item_added;
use crate::storage::{extend_persistent, Keys};
use soroban_sdk::{contracttype, Address, Env, String};

/// Static terms of a purchasable item. Written once by the admin.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemTerms {
    pub id: u64,
    pub display_uri: String,
    /// USD price with 8 decimals
    pub price_usd: i128,
    pub down_payment_percent: u32,
    /// Number of payments including the down payment
    pub installment_count: u32,
    /// Seconds between due dates
    pub installment_interval: u64,
    pub early_discount_percent: u32,
    /// Seconds after a due date before late fees and defaults apply
    pub grace_period: u64,
    pub created_at: u64,
}

/// Admin input for a new catalog item.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewItem {
    pub display_uri: String,
    pub price_usd: i128,
    pub down_payment_percent: u32,
    pub installment_count: u32,
    pub installment_interval: u64,
    pub early_discount_percent: u32,
    pub grace_period: u64,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), InstallmentError> {
        if self.display_uri.len() == 0 {
            return Err(InstallmentError::InvalidUri);
        }
        if self.price_usd <= 0 {
            return Err(InstallmentError::InvalidPrice);
        }
        if self.down_payment_percent > 100 || self.early_discount_percent > 100 {
            return Err(InstallmentError::InvalidPercentage);
        }
        if self.installment_count == 0 {
            return Err(InstallmentError::InvalidInstallmentCount);
        }
        if self.installment_interval == 0 {
            return Err(InstallmentError::InvalidInterval);
        }
        Ok(())
    }
}

pub struct Catalog;

impl Catalog {
    /// Add an item (admin only). Ids start at 1.
    pub fn add_item(env: &Env, admin: &Address, item: NewItem) -> Result<u64, InstallmentError> {
        AdminStorage::require_admin_auth(env, admin)?;
        item.validate()?;

        let id = Self::item_count(env)
            .checked_add(1)
            .ok_or(InstallmentError::ArithmeticOverflow)?;

        let terms = ItemTerms {
            id,
            display_uri: item.display_uri,
            price_usd: item.price_usd,
            down_payment_percent: item.down_payment_percent,
            installment_count: item.installment_count,
            installment_interval: item.installment_interval,
            early_discount_percent: item.early_discount_percent,
            grace_period: item.grace_period,
            created_at: env.ledger().timestamp(),
        };

        let key = Keys::item(id);
        env.storage().persistent().set(&key, &terms);
        extend_persistent(env, &key);
        env.storage().instance().set(&Keys::item_count(), &id);

        emit_item_added(env, id, terms.price_usd);
        Ok(id)
    }

    pub fn get_item(env: &Env, item_id: u64) -> Option<ItemTerms> {
        env.storage().persistent().get(&Keys::item(item_id))
    }

    pub fn require_item(env: &Env, item_id: u64) -> Result<ItemTerms, InstallmentError> {
        Self::get_item(env, item_id).ok_or(InstallmentError::ItemNotFound)
    }

    pub fn item_count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&Keys::item_count())
            .unwrap_or(0)
    }
}
