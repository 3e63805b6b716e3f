//! Price oracle adapter: USD to native token conversion.
//!
//! Catalog prices are USD with 8 decimals. The feed quotes the native token
//! in USD with the same precision, so converting to 18-decimal native units is
//! `price_usd * 10^18 / feed_price`. The feed is queried on every call.

use crate::errors::InstallmentError;
use crate::events::emit_fallback_price_used;
use crate::init::ProtocolInitializer;
use soroban_sdk::{contractclient, contracttype, log, Address, Env};

/// Fixed-point scale of native token amounts (18 decimals).
pub const NATIVE_UNIT_SCALE: i128 = 1_000_000_000_000_000_000;

/// Fixed-point scale of USD prices (8 decimals).
pub const USD_PRICE_SCALE: i128 = 100_000_000;

/// Latest answer reported by the price feed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    pub price: i128,
    pub timestamp: u64,
}

/// Interface of the external native/USD price feed.
#[allow(dead_code)]
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeed {
    /// Most recent native/USD price, 8 decimals. Zero or negative means invalid.
    fn latest_price(env: Env) -> PriceData;
}

/// Where a conversion took its price from.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum PriceSource {
    Feed = 0,
    Fallback = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conversion {
    pub native_amount: i128,
    pub price_used: i128,
    pub source: PriceSource,
}

pub struct OracleService;

impl OracleService {
    /// Queries the feed. A failing call (trap, missing contract, bad payload)
    /// is reported as `OracleUnavailable`.
    pub fn latest_price(env: &Env, feed: &Address) -> Result<PriceData, InstallmentError> {
        let client = PriceFeedClient::new(env, feed);
        match client.try_latest_price() {
            Ok(Ok(data)) => Ok(data),
            _ => Err(InstallmentError::OracleUnavailable),
        }
    }

    /// `price_usd * NATIVE_UNIT_SCALE / price`, floored.
    pub fn scale_to_native(price_usd: i128, price: i128) -> Result<i128, InstallmentError> {
        if price <= 0 {
            return Err(InstallmentError::InvalidPrice);
        }
        price_usd
            .checked_mul(NATIVE_UNIT_SCALE)
            .and_then(|v| v.checked_div(price))
            .ok_or(InstallmentError::ArithmeticOverflow)
    }

    /// Convert a USD price to native units using the configured feed, falling
    /// back to the configured price when the feed answer is not positive.
    pub fn convert_usd_to_native(
        env: &Env,
        price_usd: i128,
    ) -> Result<Conversion, InstallmentError> {
        let config = ProtocolInitializer::get_config(env)?;
        let answer = Self::latest_price(env, &config.price_feed)?;

        let (price_used, source) = if answer.price > 0 {
            (answer.price, PriceSource::Feed)
        } else {
            log!(
                env,
                "feed reported invalid price {}, using fallback {}",
                answer.price,
                config.fallback_price
            );
            emit_fallback_price_used(env, config.fallback_price);
            (config.fallback_price, PriceSource::Fallback)
        };

        Ok(Conversion {
            native_amount: Self::scale_to_native(price_usd, price_used)?,
            price_used,
            source,
        })
    }
}
