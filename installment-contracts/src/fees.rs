//! Fee, discount and installment arithmetic.
//!
//! All percentages are whole numbers applied as multiply-then-divide by 100
//! with floor division. Nothing rounds up, so a remainder smaller than the
//! divisor is never collected.

use crate::errors::InstallmentError;

pub const PERCENT_DENOMINATOR: i128 = 100;

/// `amount * percent / 100`, floored.
pub fn percent_of(amount: i128, percent: u32) -> Result<i128, InstallmentError> {
    amount
        .checked_mul(percent as i128)
        .and_then(|v| v.checked_div(PERCENT_DENOMINATOR))
        .ok_or(InstallmentError::ArithmeticOverflow)
}

/// Down payment due at plan start.
pub fn down_payment_required(
    native_price: i128,
    down_payment_percent: u32,
) -> Result<i128, InstallmentError> {
    percent_of(native_price, down_payment_percent)
}

/// Per-period installment; identical for every period.
pub fn installment_amount(
    native_price: i128,
    installment_count: u32,
) -> Result<i128, InstallmentError> {
    if installment_count == 0 {
        return Err(InstallmentError::InvalidInstallmentCount);
    }
    native_price
        .checked_div(installment_count as i128)
        .ok_or(InstallmentError::ArithmeticOverflow)
}

/// Flat late fee for one late installment.
pub fn late_fee(installment: i128, late_fee_percent: u32) -> Result<i128, InstallmentError> {
    percent_of(installment, late_fee_percent)
}

/// Price after the early settlement discount. Late fees are not part of it.
pub fn discounted_price(
    native_price: i128,
    early_discount_percent: u32,
) -> Result<i128, InstallmentError> {
    let keep = 100u32
        .checked_sub(early_discount_percent)
        .ok_or(InstallmentError::InvalidPercentage)?;
    percent_of(native_price, keep)
}

/// Total owed to settle early: discounted base price plus accrued late fees.
pub fn early_settlement_required(
    native_price: i128,
    early_discount_percent: u32,
    late_fee_paid: i128,
) -> Result<i128, InstallmentError> {
    discounted_price(native_price, early_discount_percent)?
        .checked_add(late_fee_paid)
        .ok_or(InstallmentError::ArithmeticOverflow)
}

/// True once `now` is strictly past `due_date + grace_period`.
pub fn is_past_grace(now: u64, due_date: u64, grace_period: u64) -> bool {
    match due_date.checked_add(grace_period) {
        Some(deadline) => now > deadline,
        None => false,
    }
}
