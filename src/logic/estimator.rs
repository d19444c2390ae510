//! Storage estimation
//!
//! Turns a funds budget and a sample of host price quotes into an
//! approximate purchasable storage size. All money arithmetic is exact up
//! to the 24 fractional digits kept by [`Money`].

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::{ContractRecord, HostQuote};

use super::errors::{EngineError, Result};
use super::formatting::readable_filesize;
use super::money::{self, Money};

pub const BLOCKS_PER_MONTH: u64 = 4320;
pub const ALLOWANCE_MONTHS: u64 = 3;

/// Economic model used by [`estimated_storage`]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EconomicConstants {
    /// Allowance period in blocks
    pub allowance_period: u64,
    pub contract_count: u64,
    pub base_redundancy: u64,
    /// Fixed fee, written in SC in config files
    #[serde(with = "money::siacoins")]
    pub base_fee: Money,
    pub siafund_rate: f64,
    /// Hosts beyond this many are ignored
    pub host_sample_size: usize,
}

impl Default for EconomicConstants {
    fn default() -> Self {
        Self {
            allowance_period: BLOCKS_PER_MONTH * ALLOWANCE_MONTHS,
            contract_count: 24,
            base_redundancy: 6,
            base_fee: Money::from_siacoins_int(240),
            siafund_rate: 0.12,
            host_sample_size: 28,
        }
    }
}

/// Averaged host quotes
#[derive(Debug, Clone, PartialEq)]
pub struct AverageQuote {
    pub storageprice: Money,
    pub uploadbandwidthprice: Money,
    pub downloadbandwidthprice: Money,
    pub contractprice: Money,
}

/// Every intermediate value of one estimate, in evaluation order
#[derive(Debug, Clone, PartialEq)]
pub struct FeeBreakdown {
    pub averages: AverageQuote,
    /// `((storage * period) + upload) * redundancy + download`
    pub avg_storage_cost: Money,
    /// `base_fee + contract price * contract_count`
    pub base_and_contract_fee: Money,
    /// `base_and_contract_fee + (funds - base_and_contract_fee) * siafund_rate`
    pub total_fee: Money,
    /// `max(0, funds - total_fee)`
    pub spendable: Money,
    pub bytes: BigDecimal,
}

/// Arithmetic mean of each quote field over `hosts`
///
/// Fails with [`EngineError::InsufficientData`] on an empty sample.
pub fn average_quote(hosts: &[HostQuote]) -> Result<AverageQuote> {
    Ok(AverageQuote {
        storageprice: mean(hosts, |h| &h.storageprice)?,
        uploadbandwidthprice: mean(hosts, |h| &h.uploadbandwidthprice)?,
        downloadbandwidthprice: mean(hosts, |h| &h.downloadbandwidthprice)?,
        contractprice: mean(hosts, |h| &h.contractprice)?,
    })
}

fn mean(hosts: &[HostQuote], field: impl Fn(&HostQuote) -> &Money) -> Result<Money> {
    hosts
        .iter()
        .fold(Money::zero(), |sum, host| sum.plus(field(host)))
        .div_int(hosts.len() as u64)
        .ok_or_else(|| EngineError::InsufficientData("no hosts to sample".into()))
}

/// Compute every step of the estimate for `funds` (hastings)
///
/// Only the first `host_sample_size` hosts are used, in input order.
/// The fee is applied in two sequential steps: the siafund tax is charged on
/// what remains after the base and contract fee, then added to that fee.
pub fn breakdown(
    funds: &Money,
    hosts: &[HostQuote],
    constants: &EconomicConstants,
) -> Result<FeeBreakdown> {
    let sample = &hosts[..hosts.len().min(constants.host_sample_size)];
    let averages = average_quote(sample)?;

    let avg_storage_cost = averages
        .storageprice
        .times_int(constants.allowance_period)
        .plus(&averages.uploadbandwidthprice)
        .times_int(constants.base_redundancy)
        .plus(&averages.downloadbandwidthprice);

    let base_and_contract_fee = constants
        .base_fee
        .plus(&averages.contractprice.times_int(constants.contract_count));
    let total_fee = base_and_contract_fee.plus(
        &funds
            .minus(&base_and_contract_fee)
            .times_rate(constants.siafund_rate)?,
    );

    let spendable = funds.minus(&total_fee).max_zero();
    let bytes = spendable.checked_div(&avg_storage_cost).ok_or_else(|| {
        EngineError::InsufficientData("average storage cost of sampled hosts is zero".into())
    })?;

    debug!(
        "estimate over {} of {} hosts: cost {} fee {} spendable {}",
        sample.len(),
        hosts.len(),
        avg_storage_cost,
        total_fee,
        spendable
    );

    Ok(FeeBreakdown {
        averages,
        avg_storage_cost,
        base_and_contract_fee,
        total_fee,
        spendable,
        bytes,
    })
}

/// Approximate storage purchasable with `funds`, e.g. `"~20 GB"`
pub fn estimated_storage(
    funds: &Money,
    hosts: &[HostQuote],
    constants: &EconomicConstants,
) -> Result<String> {
    let estimate = breakdown(funds, hosts, constants)?;
    let bytes = round_to_one_significant_digit(&estimate.bytes)
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_u64()
        .unwrap_or(u64::MAX);
    Ok(format!("~{}", readable_filesize(bytes)))
}

/// Amount spent out of `allowance`, fees included
///
/// Whatever the contracts still hold for the renter counts as unspent.
/// Never negative.
pub fn total_spending(allowance: &Money, contracts: &[ContractRecord]) -> Money {
    let remaining = contracts
        .iter()
        .fold(Money::zero(), |sum, contract| sum.plus(&contract.renterfunds));
    allowance.minus(&remaining).max_zero()
}

/// Round to a single significant digit, ties away from zero
///
/// `23_456 -> 20_000`, `25 -> 30`, `0.45 -> 0.5`. Non-positive values
/// become zero.
pub fn round_to_one_significant_digit(value: &BigDecimal) -> BigDecimal {
    if value <= &BigDecimal::from(0) {
        return BigDecimal::from(0);
    }
    let (digits, scale) = value.as_bigint_and_exponent();
    // exponent of the leading digit
    let exponent = digits.to_string().len() as i64 - 1 - scale;
    let shift = BigDecimal::new(1.into(), exponent);
    let unshift = BigDecimal::new(1.into(), -exponent);
    (value * &shift).with_scale_round(0, RoundingMode::HalfUp) * unshift
}
