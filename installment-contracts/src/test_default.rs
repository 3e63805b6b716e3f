use super::*;
use crate::test_helpers::*;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address,
};

const INSTALLMENT: i128 = UNIT / 4;

/// Standard plan pushed just past its grace period.
fn overdue_plan(ctx: &TestContext) -> (Address, u64) {
    let (buyer, item_id) = ctx.started_plan();
    let due = ctx.client.get_plan(&buyer, &item_id).next_due_date;
    ctx.env.ledger().set_timestamp(due + GRACE + 1);
    (buyer, item_id)
}

#[test]
fn test_mark_default_within_grace_fails() {
    let ctx = setup();
    let (buyer, item_id) = ctx.started_plan();
    let due = ctx.client.get_plan(&buyer, &item_id).next_due_date;

    ctx.env.ledger().set_timestamp(due + GRACE);
    let err = contract_error(ctx.client.try_mark_default(&ctx.admin, &buyer, &item_id));
    assert_eq!(err, InstallmentError::GracePeriodNotElapsed);

    ctx.env.ledger().set_timestamp(due + GRACE + 1);
    let plan = ctx.client.mark_default(&ctx.admin, &buyer, &item_id);
    assert!(plan.defaulted);
    assert!(plan.active);
    assert_eq!(plan.status, PlanStatus::Defaulted);
}

#[test]
fn test_mark_default_requires_admin() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    let stranger = Address::generate(&ctx.env);

    let err = contract_error(ctx.client.try_mark_default(&stranger, &buyer, &item_id));
    assert_eq!(err, InstallmentError::NotAdmin);
    assert!(!ctx.client.get_plan(&buyer, &item_id).defaulted);
}

#[test]
fn test_mark_default_errors() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    let stranger = Address::generate(&ctx.env);

    assert_eq!(
        contract_error(ctx.client.try_mark_default(&ctx.admin, &buyer, &99)),
        InstallmentError::ItemNotFound
    );
    assert_eq!(
        contract_error(ctx.client.try_mark_default(&ctx.admin, &stranger, &item_id)),
        InstallmentError::PlanNotFound
    );

    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);
    assert_eq!(
        contract_error(ctx.client.try_mark_default(&ctx.admin, &buyer, &item_id)),
        InstallmentError::PlanDefaulted
    );
}

#[test]
fn test_mark_default_on_closed_plan() {
    let ctx = setup();
    let (buyer, item_id) = ctx.started_plan();
    for _ in 0..3 {
        ctx.client.pay_installment(&buyer, &item_id, &INSTALLMENT);
    }
    ctx.advance_time(INTERVAL + GRACE + 1);

    let err = contract_error(ctx.client.try_mark_default(&ctx.admin, &buyer, &item_id));
    assert_eq!(err, InstallmentError::PlanNotActive);
}

#[test]
fn test_mark_default_single_installment_plan() {
    let ctx = setup();
    let mut item = standard_item(&ctx.env);
    item.installment_count = 1;
    let item_id = ctx.add_item(&item);
    let buyer = ctx.funded_buyer(UNIT);
    ctx.client.start_plan(&buyer, &item_id, &(UNIT / 5));
    ctx.advance_time(INTERVAL + GRACE + 1);

    let err = contract_error(ctx.client.try_mark_default(&ctx.admin, &buyer, &item_id));
    assert_eq!(err, InstallmentError::NoInstallmentsRemaining);
}

#[test]
fn test_defaulted_plan_rejects_buyer_operations() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);

    assert_eq!(
        contract_error(ctx.client.try_pay_installment(&buyer, &item_id, &UNIT)),
        InstallmentError::PlanDefaulted
    );
    assert_eq!(
        contract_error(ctx.client.try_settle_early(&buyer, &item_id, &UNIT)),
        InstallmentError::PlanDefaulted
    );
    assert_eq!(
        contract_error(ctx.client.try_start_plan(&buyer, &item_id, &UNIT)),
        InstallmentError::PlanAlreadyActive
    );
}

#[test]
fn test_reclaim_requires_default() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    ctx.registry.mint(&buyer, &item_id, &1);

    let err = contract_error(ctx.client.try_reclaim_asset(&ctx.admin, &buyer, &item_id));
    assert_eq!(err, InstallmentError::PlanNotDefaulted);

    let stranger = Address::generate(&ctx.env);
    assert_eq!(
        contract_error(ctx.client.try_reclaim_asset(&ctx.admin, &stranger, &item_id)),
        InstallmentError::PlanNotFound
    );
}

#[test]
fn test_reclaim_with_nothing_held() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);

    let err = contract_error(ctx.client.try_reclaim_asset(&ctx.admin, &buyer, &item_id));
    assert_eq!(err, InstallmentError::NothingToReclaim);
    assert_eq!(
        ctx.client.get_plan_status(&buyer, &item_id),
        Some(PlanStatus::Defaulted)
    );
}

#[test]
fn test_reclaim_requires_admin() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);
    ctx.registry.mint(&buyer, &item_id, &1);

    let err = contract_error(ctx.client.try_reclaim_asset(&buyer, &buyer, &item_id));
    assert_eq!(err, InstallmentError::NotAdmin);
    assert_eq!(ctx.units_of(&buyer, item_id), 1);
}

#[test]
fn test_reclaim_takes_every_unit_held() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);
    ctx.registry.mint(&buyer, &item_id, &3);

    let reclaimed = ctx.client.reclaim_asset(&ctx.admin, &buyer, &item_id);
    assert_eq!(reclaimed, 3);
    assert_eq!(ctx.units_of(&buyer, item_id), 0);
    assert_eq!(ctx.units_of(&ctx.admin, item_id), ADMIN_STOCK + 3);

    let plan = ctx.client.get_plan(&buyer, &item_id);
    assert!(!plan.active);
    assert!(plan.defaulted);
    assert_eq!(plan.status, PlanStatus::Reclaimed);

    // Payments already made stay with the contract.
    assert_eq!(ctx.token_client.balance(&ctx.contract_id), UNIT / 5);
}

#[test]
fn test_second_reclaim_fails() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);
    ctx.registry.mint(&buyer, &item_id, &1);
    ctx.client.reclaim_asset(&ctx.admin, &buyer, &item_id);

    ctx.registry.mint(&buyer, &item_id, &1);
    let err = contract_error(ctx.client.try_reclaim_asset(&ctx.admin, &buyer, &item_id));
    assert_eq!(err, InstallmentError::PlanNotDefaulted);
    assert_eq!(ctx.units_of(&buyer, item_id), 1);
}

#[test]
fn test_reclaim_units_from_completed_purchase() {
    let ctx = setup();
    let (buyer, item_id) = ctx.started_plan();
    for _ in 0..3 {
        ctx.client.pay_installment(&buyer, &item_id, &INSTALLMENT);
    }
    assert_eq!(ctx.units_of(&buyer, item_id), 1);

    // Second purchase of the same item goes bad.
    ctx.client.start_plan(&buyer, &item_id, &(UNIT / 5));
    ctx.advance_time(INTERVAL + GRACE + 1);
    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);

    assert_eq!(ctx.client.reclaim_asset(&ctx.admin, &buyer, &item_id), 1);
    assert_eq!(ctx.units_of(&buyer, item_id), 0);
}

#[test]
fn test_new_plan_after_reclaim() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);
    ctx.registry.mint(&buyer, &item_id, &1);
    ctx.client.reclaim_asset(&ctx.admin, &buyer, &item_id);

    let plan = ctx.client.start_plan(&buyer, &item_id, &(UNIT / 5));
    assert_eq!(plan.status, PlanStatus::Active);
    assert!(!plan.defaulted);
    assert_eq!(plan.total_paid, UNIT / 5);
}

#[test]
fn test_reclaim_with_unreachable_registry() {
    let ctx = setup();
    let (buyer, item_id) = overdue_plan(&ctx);
    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);

    // No contract lives at the new registry address, so the balance read fails.
    let missing_registry = Address::generate(&ctx.env);
    ctx.client.set_asset_registry(&ctx.admin, &missing_registry);

    let err = contract_error(ctx.client.try_reclaim_asset(&ctx.admin, &buyer, &item_id));
    assert_eq!(err, InstallmentError::CustodyUnavailable);
    assert_eq!(
        ctx.client.get_plan_status(&buyer, &item_id),
        Some(PlanStatus::Defaulted)
    );
}
