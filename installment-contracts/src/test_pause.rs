use super::*;
use crate::test_helpers::*;
use soroban_sdk::{testutils::Address as _, Address};

#[test]
fn test_pause_toggle_and_queries() {
    let ctx = setup();
    let (buyer, item_id) = ctx.started_plan();
    assert!(!ctx.client.is_paused());

    ctx.client.pause(&ctx.admin);
    assert!(ctx.client.is_paused());

    // Read-only queries stay available while paused.
    assert_eq!(ctx.client.get_plan(&buyer, &item_id).remaining_installments, 3);
    assert_eq!(ctx.client.quote_down_payment(&item_id), UNIT / 5);
    assert_eq!(ctx.client.get_admin(), Some(ctx.admin.clone()));

    ctx.client.unpause(&ctx.admin);
    assert!(!ctx.client.is_paused());
}

#[test]
fn test_pause_blocks_buyer_operations() {
    let ctx = setup();
    let (buyer, item_id) = ctx.started_plan();
    let other_item = ctx.add_standard_item();
    ctx.client.pause(&ctx.admin);

    assert_eq!(
        contract_error(ctx.client.try_start_plan(&buyer, &other_item, &UNIT)),
        InstallmentError::ProtocolPaused
    );
    assert_eq!(
        contract_error(ctx.client.try_pay_installment(&buyer, &item_id, &UNIT)),
        InstallmentError::ProtocolPaused
    );
    assert_eq!(
        contract_error(ctx.client.try_settle_early(&buyer, &item_id, &UNIT)),
        InstallmentError::ProtocolPaused
    );

    ctx.client.unpause(&ctx.admin);
    let plan = ctx.client.pay_installment(&buyer, &item_id, &(UNIT / 4));
    assert_eq!(plan.remaining_installments, 2);
}

#[test]
fn test_admin_recovery_works_while_paused() {
    let ctx = setup();
    let (buyer, item_id) = ctx.started_plan();
    ctx.advance_time(INTERVAL + GRACE + 1);
    ctx.client.pause(&ctx.admin);

    ctx.client.mark_default(&ctx.admin, &buyer, &item_id);
    ctx.registry.mint(&buyer, &item_id, &1);
    assert_eq!(ctx.client.reclaim_asset(&ctx.admin, &buyer, &item_id), 1);

    let treasury = Address::generate(&ctx.env);
    ctx.client.withdraw_proceeds(&ctx.admin, &treasury, &(UNIT / 5));
    assert_eq!(ctx.token_client.balance(&treasury), UNIT / 5);
}

#[test]
fn test_only_admin_can_pause() {
    let ctx = setup();
    let stranger = Address::generate(&ctx.env);

    assert_eq!(
        contract_error(ctx.client.try_pause(&stranger)),
        InstallmentError::NotAdmin
    );
    assert!(!ctx.client.is_paused());

    ctx.client.pause(&ctx.admin);
    assert_eq!(
        contract_error(ctx.client.try_unpause(&stranger)),
        InstallmentError::NotAdmin
    );
    assert!(ctx.client.is_paused());
}
