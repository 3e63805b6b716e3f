//! Payment plan records and their storage.

use crate::errors::InstallmentError;
use crate::storage::{extend_persistent, Keys};
use soroban_sdk::{contracttype, Address, Env};

/// Lifecycle of the latest plan instance for a (buyer, item) pair.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PlanStatus {
    Active = 0,
    Completed = 1,
    EarlySettled = 2,
    Defaulted = 3,
    Reclaimed = 4,
}

/// Per-(buyer, item) payment progress.
///
/// `active` and `defaulted` mirror `status`: a defaulted plan is still active
/// until its asset is reclaimed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentPlan {
    pub buyer: Address,
    pub item_id: u64,
    /// Native units paid so far, late fees included
    pub total_paid: i128,
    pub next_due_date: u64,
    pub remaining_installments: u32,
    /// Cumulative late fees paid
    pub late_fee_paid: i128,
    pub active: bool,
    pub defaulted: bool,
    pub status: PlanStatus,
    pub started_at: u64,
}

impl PaymentPlan {
    pub fn new(
        buyer: &Address,
        item_id: u64,
        down_payment: i128,
        started_at: u64,
        next_due_date: u64,
        remaining_installments: u32,
    ) -> Self {
        Self {
            buyer: buyer.clone(),
            item_id,
            total_paid: down_payment,
            next_due_date,
            remaining_installments,
            late_fee_paid: 0,
            active: true,
            defaulted: false,
            status: PlanStatus::Active,
            started_at,
        }
    }

    /// Plan accepts installments and early settlement.
    pub fn require_payable(&self) -> Result<(), InstallmentError> {
        if !self.active {
            return Err(InstallmentError::PlanNotActive);
        }
        if self.defaulted {
            return Err(InstallmentError::PlanDefaulted);
        }
        Ok(())
    }

    pub fn record_payment(&mut self, amount: i128) -> Result<(), InstallmentError> {
        self.total_paid = self
            .total_paid
            .checked_add(amount)
            .ok_or(InstallmentError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn record_late_fee(&mut self, fee: i128) -> Result<(), InstallmentError> {
        self.late_fee_paid = self
            .late_fee_paid
            .checked_add(fee)
            .ok_or(InstallmentError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Consume one installment and move the due date.
    pub fn advance(&mut self, next_due_date: u64) -> Result<(), InstallmentError> {
        self.remaining_installments = self
            .remaining_installments
            .checked_sub(1)
            .ok_or(InstallmentError::NoInstallmentsRemaining)?;
        self.next_due_date = next_due_date;
        Ok(())
    }

    pub fn mark_as_completed(&mut self) {
        self.active = false;
        self.status = PlanStatus::Completed;
    }

    pub fn mark_as_early_settled(&mut self) {
        self.active = false;
        self.status = PlanStatus::EarlySettled;
    }

    pub fn mark_as_defaulted(&mut self) {
        self.defaulted = true;
        self.status = PlanStatus::Defaulted;
    }

    pub fn mark_as_reclaimed(&mut self) {
        self.active = false;
        self.status = PlanStatus::Reclaimed;
    }
}

pub struct PlanStorage;

impl PlanStorage {
    pub fn get_plan(env: &Env, buyer: &Address, item_id: u64) -> Option<PaymentPlan> {
        env.storage().persistent().get(&Keys::plan(buyer, item_id))
    }

    pub fn require_plan(
        env: &Env,
        buyer: &Address,
        item_id: u64,
    ) -> Result<PaymentPlan, InstallmentError> {
        Self::get_plan(env, buyer, item_id).ok_or(InstallmentError::PlanNotFound)
    }

    /// Create or overwrite the plan record.
    pub fn store_plan(env: &Env, plan: &PaymentPlan) {
        let key = Keys::plan(&plan.buyer, plan.item_id);
        env.storage().persistent().set(&key, plan);
        extend_persistent(env, &key);
    }

    pub fn has_active_plan(env: &Env, buyer: &Address, item_id: u64) -> bool {
        Self::get_plan(env, buyer, item_id)
            .map(|plan| plan.active)
            .unwrap_or(false)
    }
}
