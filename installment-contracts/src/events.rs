//! Contract events for plan lifecycle, catalog and configuration changes.
//!
//! Each event uses a short symbol topic and carries the ledger timestamp as the
//! last payload element so off-chain consumers can order them.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

pub fn emit_plan_started(env: &Env, buyer: &Address, item_id: u64, down_payment: i128) {
    env.events().publish(
        (symbol_short!("plan_strt"),),
        (
            buyer.clone(),
            item_id,
            down_payment,
            env.ledger().timestamp(),
        ),
    );
}

pub fn emit_installment_paid(
    env: &Env,
    buyer: &Address,
    item_id: u64,
    amount: i128,
    remaining_installments: u32,
) {
    env.events().publish(
        (symbol_short!("inst_paid"),),
        (
            buyer.clone(),
            item_id,
            amount,
            remaining_installments,
            env.ledger().timestamp(),
        ),
    );
}

pub fn emit_plan_completed(env: &Env, buyer: &Address, item_id: u64) {
    env.events().publish(
        (symbol_short!("plan_done"),),
        (buyer.clone(), item_id, env.ledger().timestamp()),
    );
}

pub fn emit_early_settlement(env: &Env, buyer: &Address, item_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("early_set"),),
        (buyer.clone(), item_id, amount, env.ledger().timestamp()),
    );
}

pub fn emit_plan_defaulted(env: &Env, buyer: &Address, item_id: u64) {
    env.events().publish(
        (symbol_short!("defaulted"),),
        (buyer.clone(), item_id, env.ledger().timestamp()),
    );
}

pub fn emit_asset_reclaimed(env: &Env, buyer: &Address, item_id: u64, quantity: i128) {
    env.events().publish(
        (symbol_short!("reclaimed"),),
        (buyer.clone(), item_id, quantity, env.ledger().timestamp()),
    );
}

/// Emitted whenever a conversion falls back to the configured price.
pub fn emit_fallback_price_used(env: &Env, fallback_price: i128) {
    env.events().publish(
        (symbol_short!("fallback"),),
        (fallback_price, env.ledger().timestamp()),
    );
}

pub fn emit_item_added(env: &Env, item_id: u64, price_usd: i128) {
    env.events().publish(
        (symbol_short!("item_add"),),
        (item_id, price_usd, env.ledger().timestamp()),
    );
}

/// `field` names the configuration entry that changed.
pub fn emit_config_updated(env: &Env, admin: &Address, field: Symbol) {
    env.events().publish(
        (symbol_short!("cfg_upd"), field),
        (admin.clone(), env.ledger().timestamp()),
    );
}

pub fn emit_proceeds_withdrawn(env: &Env, admin: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"),),
        (
            admin.clone(),
            to.clone(),
            amount,
            env.ledger().timestamp(),
        ),
    );
}

pub fn emit_admin_set(env: &Env, admin: &Address) {
    env.events().publish(
        (symbol_short!("adm_set"),),
        (admin.clone(), env.ledger().timestamp()),
    );
}

pub fn emit_admin_transferred(env: &Env, old_admin: &Address, new_admin: &Address) {
    env.events().publish(
        (symbol_short!("adm_trf"),),
        (
            old_admin.clone(),
            new_admin.clone(),
            env.ledger().timestamp(),
        ),
    );
}

pub fn emit_paused(env: &Env, admin: &Address) {
    env.events().publish(
        (symbol_short!("paused"),),
        (admin.clone(), env.ledger().timestamp()),
    );
}

pub fn emit_unpaused(env: &Env, admin: &Address) {
    env.events().publish(
        (symbol_short!("unpaused"),),
        (admin.clone(), env.ledger().timestamp()),
    );
}
