//! Admin-side plan transitions: default marking and asset reclamation.

use crate::admin::AdminStorage;
use crate::catalog::Catalog;
use crate::custody::Custody;
use crate::errors::InstallmentError;
use crate::events::{emit_asset_reclaimed, emit_plan_defaulted};
use crate::fees::is_past_grace;
use crate::init::ProtocolInitializer;
use crate::plans::{PaymentPlan, PlanStorage};
use soroban_sdk::{Address, Env};

/// Mark an overdue plan as defaulted.
///
/// The plan stays `active` until the asset is reclaimed, but no longer accepts
/// installments or early settlement.
///
/// # Errors
/// * `NotAdmin`, `ItemNotFound`, `PlanNotFound`, `PlanNotActive`, `PlanDefaulted`,
///   `GracePeriodNotElapsed`, `NoInstallmentsRemaining`
pub fn mark_default(
    env: &Env,
    admin: &Address,
    buyer: &Address,
    item_id: u64,
) -> Result<PaymentPlan, InstallmentError> {
    AdminStorage::require_admin_auth(env, admin)?;

    let item = Catalog::require_item(env, item_id)?;
    let mut plan = PlanStorage::require_plan(env, buyer, item_id)?;
    if !plan.active {
        return Err(InstallmentError::PlanNotActive);
    }
    if plan.defaulted {
        return Err(InstallmentError::PlanDefaulted);
    }
    if !is_past_grace(env.ledger().timestamp(), plan.next_due_date, item.grace_period) {
        return Err(InstallmentError::GracePeriodNotElapsed);
    }
    if plan.remaining_installments == 0 {
        return Err(InstallmentError::NoInstallmentsRemaining);
    }

    plan.mark_as_defaulted();
    PlanStorage::store_plan(env, &plan);
    emit_plan_defaulted(env, buyer, item_id);
    Ok(plan)
}

/// Move every unit of `item_id` the defaulted buyer holds back to the admin.
///
/// Returns the quantity reclaimed.
///
/// # Errors
/// * `NotAdmin`, `PlanNotFound`, `PlanNotDefaulted`, `NothingToReclaim`,
///   `CustodyUnavailable`, `CustodyTransferFailed`
pub fn reclaim_asset(
    env: &Env,
    admin: &Address,
    buyer: &Address,
    item_id: u64,
) -> Result<i128, InstallmentError> {
    AdminStorage::require_admin_auth(env, admin)?;

    let mut plan = PlanStorage::require_plan(env, buyer, item_id)?;
    if !(plan.active && plan.defaulted) {
        return Err(InstallmentError::PlanNotDefaulted);
    }

    let config = ProtocolInitializer::get_config(env)?;
    let held = Custody::balance_of(env, &config.asset_registry, buyer, item_id)?;
    if held <= 0 {
        return Err(InstallmentError::NothingToReclaim);
    }

    plan.mark_as_reclaimed();
    PlanStorage::store_plan(env, &plan);
    emit_asset_reclaimed(env, buyer, item_id, held);

    Custody::transfer_units(env, &config.asset_registry, buyer, admin, item_id, held)?;
    Ok(held)
}
