//! Buyer-side plan transitions: start, pay an installment, settle early.
//!
//! Entry points in `lib.rs` wrap these in the pause check and the payment
//! reentrancy guard. Each function validates everything before the first
//! external call; plan state is written before payments are pulled or units
//! move.

use crate::admin::AdminStorage;
use crate::catalog::{Catalog, ItemTerms};
use crate::custody::Custody;
use crate::errors::InstallmentError;
use crate::events::{
    emit_early_settlement, emit_installment_paid, emit_plan_completed, emit_plan_started,
};
use crate::fees;
use crate::init::ProtocolInitializer;
use crate::oracle::OracleService;
use crate::plans::{PaymentPlan, PlanStorage};
use soroban_sdk::{contracttype, log, Address, Env};

/// Amount due for the next installment if paid now.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstallmentQuote {
    pub installment: i128,
    pub late_fee: i128,
    pub total_due: i128,
    pub remaining_installments: u32,
}

fn require_non_negative(amount: i128) -> Result<(), InstallmentError> {
    if amount < 0 {
        return Err(InstallmentError::InvalidAmount);
    }
    Ok(())
}

fn require_covers(env: &Env, paid: i128, required: i128) -> Result<(), InstallmentError> {
    if paid < required {
        log!(env, "payment {} below required {}", paid, required);
        return Err(InstallmentError::InsufficientPayment);
    }
    Ok(())
}

fn next_due(now: u64, item: &ItemTerms) -> Result<u64, InstallmentError> {
    now.checked_add(item.installment_interval)
        .ok_or(InstallmentError::ArithmeticOverflow)
}

fn native_price(env: &Env, item: &ItemTerms) -> Result<i128, InstallmentError> {
    Ok(OracleService::convert_usd_to_native(env, item.price_usd)?.native_amount)
}

/// Installment and late fee owed for `plan` at time `now`.
fn installment_due(
    env: &Env,
    item: &ItemTerms,
    plan: &PaymentPlan,
    now: u64,
) -> Result<InstallmentQuote, InstallmentError> {
    let config = ProtocolInitializer::get_config(env)?;
    let installment = fees::installment_amount(native_price(env, item)?, item.installment_count)?;
    let late_fee = if fees::is_past_grace(now, plan.next_due_date, item.grace_period) {
        fees::late_fee(installment, config.late_fee_percent)?
    } else {
        0
    };
    let total_due = installment
        .checked_add(late_fee)
        .ok_or(InstallmentError::ArithmeticOverflow)?;
    Ok(InstallmentQuote {
        installment,
        late_fee,
        total_due,
        remaining_installments: plan.remaining_installments,
    })
}

/// Start a plan with a down payment.
///
/// # Errors
/// * `InvalidAmount`, `ItemNotFound`, `PlanAlreadyActive`, `InsufficientPayment`,
///   `OracleUnavailable`, `PaymentTransferFailed`
pub fn start_plan(
    env: &Env,
    buyer: &Address,
    item_id: u64,
    paid_amount: i128,
) -> Result<PaymentPlan, InstallmentError> {
    buyer.require_auth();
    require_non_negative(paid_amount)?;

    let item = Catalog::require_item(env, item_id)?;
    if PlanStorage::has_active_plan(env, buyer, item_id) {
        return Err(InstallmentError::PlanAlreadyActive);
    }

    let config = ProtocolInitializer::get_config(env)?;
    let required = fees::down_payment_required(native_price(env, &item)?, item.down_payment_percent)?;
    require_covers(env, paid_amount, required)?;

    let now = env.ledger().timestamp();
    // installment_count >= 1 is enforced by the catalog
    let plan = PaymentPlan::new(
        buyer,
        item_id,
        paid_amount,
        now,
        next_due(now, &item)?,
        item.installment_count - 1,
    );
    PlanStorage::store_plan(env, &plan);
    emit_plan_started(env, buyer, item_id, paid_amount);

    Custody::collect_payment(env, &config.payment_token, buyer, paid_amount)?;
    Ok(plan)
}

/// Pay the next installment, plus the late fee once the grace period has passed.
/// The final installment closes the plan and delivers one unit to the buyer.
///
/// # Errors
/// * `InvalidAmount`, `ItemNotFound`, `PlanNotFound`, `PlanNotActive`, `PlanDefaulted`,
///   `NoInstallmentsRemaining`, `InsufficientPayment`, external dependency errors
pub fn pay_installment(
    env: &Env,
    buyer: &Address,
    item_id: u64,
    paid_amount: i128,
) -> Result<PaymentPlan, InstallmentError> {
    buyer.require_auth();
    require_non_negative(paid_amount)?;

    let item = Catalog::require_item(env, item_id)?;
    let mut plan = PlanStorage::require_plan(env, buyer, item_id)?;
    plan.require_payable()?;
    if plan.remaining_installments == 0 {
        return Err(InstallmentError::NoInstallmentsRemaining);
    }

    let config = ProtocolInitializer::get_config(env)?;
    let now = env.ledger().timestamp();
    let due = installment_due(env, &item, &plan, now)?;
    require_covers(env, paid_amount, due.total_due)?;

    if due.late_fee > 0 {
        plan.record_late_fee(due.late_fee)?;
    }
    plan.record_payment(paid_amount)?;
    plan.advance(next_due(now, &item)?)?;

    let completed = plan.remaining_installments == 0;
    if completed {
        plan.mark_as_completed();
    }
    PlanStorage::store_plan(env, &plan);
    emit_installment_paid(env, buyer, item_id, paid_amount, plan.remaining_installments);

    Custody::collect_payment(env, &config.payment_token, buyer, paid_amount)?;

    if completed {
        emit_plan_completed(env, buyer, item_id);
        let admin = AdminStorage::admin(env)?;
        Custody::transfer_units(env, &config.asset_registry, &admin, buyer, item_id, 1)?;
    }
    Ok(plan)
}

/// Pay off the plan at the early settlement discount and receive the unit.
///
/// Required total is the discounted price plus late fees already paid; what the
/// buyer paid so far counts toward it.
pub fn settle_early(
    env: &Env,
    buyer: &Address,
    item_id: u64,
    paid_amount: i128,
) -> Result<PaymentPlan, InstallmentError> {
    buyer.require_auth();
    require_non_negative(paid_amount)?;

    let item = Catalog::require_item(env, item_id)?;
    let mut plan = PlanStorage::require_plan(env, buyer, item_id)?;
    plan.require_payable()?;

    let config = ProtocolInitializer::get_config(env)?;
    let required = fees::early_settlement_required(
        native_price(env, &item)?,
        item.early_discount_percent,
        plan.late_fee_paid,
    )?;
    let paid_total = plan
        .total_paid
        .checked_add(paid_amount)
        .ok_or(InstallmentError::ArithmeticOverflow)?;
    require_covers(env, paid_total, required)?;

    plan.record_payment(paid_amount)?;
    plan.mark_as_early_settled();
    PlanStorage::store_plan(env, &plan);
    emit_early_settlement(env, buyer, item_id, paid_amount);

    Custody::collect_payment(env, &config.payment_token, buyer, paid_amount)?;

    let admin = AdminStorage::admin(env)?;
    Custody::transfer_units(env, &config.asset_registry, &admin, buyer, item_id, 1)?;
    Ok(plan)
}

/// Down payment currently required to start a plan on `item_id`.
pub fn quote_down_payment(env: &Env, item_id: u64) -> Result<i128, InstallmentError> {
    let item = Catalog::require_item(env, item_id)?;
    fees::down_payment_required(native_price(env, &item)?, item.down_payment_percent)
}

/// What `pay_installment` would require right now.
///
/// Fails the same way `pay_installment` does for a plan it would reject.
pub fn quote_installment(
    env: &Env,
    buyer: &Address,
    item_id: u64,
) -> Result<InstallmentQuote, InstallmentError> {
    let item = Catalog::require_item(env, item_id)?;
    let plan = PlanStorage::require_plan(env, buyer, item_id)?;
    plan.require_payable()?;
    if plan.remaining_installments == 0 {
        return Err(InstallmentError::NoInstallmentsRemaining);
    }
    installment_due(env, &item, &plan, env.ledger().timestamp())
}

/// Additional amount `settle_early` would require right now (never negative).
pub fn quote_early_settlement(
    env: &Env,
    buyer: &Address,
    item_id: u64,
) -> Result<i128, InstallmentError> {
    let item = Catalog::require_item(env, item_id)?;
    let plan = PlanStorage::require_plan(env, buyer, item_id)?;
    plan.require_payable()?;
    let required = fees::early_settlement_required(
        native_price(env, &item)?,
        item.early_discount_percent,
        plan.late_fee_paid,
    )?;
    Ok(required.saturating_sub(plan.total_paid).max(0))
}

/// Native price of an item at the current feed price.
pub fn native_price_of(env: &Env, item_id: u64) -> Result<i128, InstallmentError> {
    let item = Catalog::require_item(env, item_id)?;
    native_price(env, &item)
}
