//! Storage keys and TTL management.
//!
//! - Instance storage: admin, configuration, pause flag, reentrancy lock, item counter
//! - Persistent storage: catalog items and payment plans
//!
//! Keys are short symbols, tupled with the entity identifiers for persistent
//! entries so item and plan records never collide.

use soroban_sdk::{symbol_short, Address, Env, IntoVal, Symbol, Val};

pub const DAY_IN_LEDGERS: u32 = 17_280;
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Storage keys for the contract
pub struct Keys;

impl Keys {
    /// Key for catalog terms by item id
    pub fn item(item_id: u64) -> (Symbol, u64) {
        (symbol_short!("item"), item_id)
    }

    /// Key for the last assigned item id
    pub fn item_count() -> Symbol {
        symbol_short!("item_cnt")
    }

    /// Key for a buyer's plan on an item
    pub fn plan(buyer: &Address, item_id: u64) -> (Symbol, Address, u64) {
        (symbol_short!("plan"), buyer.clone(), item_id)
    }
}

/// Keep a persistent entry alive for another TTL window.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}
