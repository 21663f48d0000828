//! The cross-border algorithm shared by all EU member-state policies.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{ChargeDecision, ItemCategory, Party, VatError, is_eu_member};
use crate::rules::policy::{CountryPolicy, Resolution};
use crate::rules::registry::PolicyRegistry;

/// 2015-01-01 — from this date, consumer sales of digital services are
/// taxed at the buyer's location instead of the seller's.
pub const DESTINATION_REGIME_DATE: NaiveDate =
    NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid date");

/// Category-dependent rate table for one member state.
///
/// `standard` always applies unless a more specific entry matches.
/// `broadcasting` covers the whole broadcasting family;
/// `prepaid_broadcasting` only the prepaid variant (Austria reduces the
/// prepaid rate but not the generic one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRates {
    /// Standard rate, in percent.
    pub standard: Decimal,
    /// Reduced rate for the broadcasting family, if any.
    pub broadcasting: Option<Decimal>,
    /// Reduced rate for prepaid broadcasting only, if any.
    pub prepaid_broadcasting: Option<Decimal>,
    /// Reduced rate for e-books, if any.
    pub ebook: Option<Decimal>,
    /// Reduced rate for e-newspapers, if any.
    pub enewspaper: Option<Decimal>,
}

impl CategoryRates {
    /// A single rate for every category.
    pub const fn flat(standard: Decimal) -> Self {
        Self {
            standard,
            broadcasting: None,
            prepaid_broadcasting: None,
            ebook: None,
            enewspaper: None,
        }
    }

    /// Look up the rate for a category.
    pub fn rate(&self, category: ItemCategory) -> Decimal {
        if category.is_broadcasting() {
            if let Some(rate) = self.broadcasting {
                return rate;
            }
        }
        match category {
            ItemCategory::PrepaidBroadcastingService => {
                self.prepaid_broadcasting.unwrap_or(self.standard)
            }
            ItemCategory::Ebook => self.ebook.unwrap_or(self.standard),
            ItemCategory::Enewspaper => self.enewspaper.unwrap_or(self.standard),
            _ => self.standard,
        }
    }
}

/// Inbound decision for a member state (`this` = buyer's jurisdiction).
///
/// 1. Domestic sale → charge at this country's rate, business or not.
/// 2. Cross-border consumer on/after 2015-01-01 → charge at this
///    country's rate (destination taxation).
/// 3. Cross-border consumer before 2015-01-01 → defer; the seller's
///    jurisdiction taxes at origin.
/// 4. Cross-border business → reverse charge at 0 under the buyer's code.
pub fn standard_inbound(
    policy: &dyn CountryPolicy,
    date: NaiveDate,
    category: ItemCategory,
    buyer: &Party,
    seller: &Party,
    region: Option<&str>,
) -> Result<Resolution, VatError> {
    if !seller.is_business {
        return Err(VatError::NonBusinessSeller);
    }

    if seller.country_code.eq_ignore_ascii_case(&buyer.country_code) {
        return Ok(Resolution::Decided(ChargeDecision::charge(
            &buyer.country_code,
            policy.rate(category, region),
        )));
    }

    if !buyer.is_business {
        if date >= DESTINATION_REGIME_DATE {
            return Ok(Resolution::Decided(ChargeDecision::charge(
                &buyer.country_code,
                policy.rate(category, region),
            )));
        }
        // Taxed at origin before 2015 — only the seller's rules can say.
        return Ok(Resolution::Defer);
    }

    Ok(Resolution::Decided(ChargeDecision::reverse_charge(
        &buyer.country_code,
    )))
}

/// Outbound decision for a member state (`this` = seller's jurisdiction).
///
/// 1. Buyer outside the EU VAT area → no charge.
/// 2. Domestic sale → charge at this country's rate.
/// 3. Business buyer in another member state → reverse charge.
/// 4. Consumer in another member state on/after 2015-01-01 → charge at
///    the *buyer's* country rate (destination), looked up via the
///    registry.
/// 5. Consumer before 2015-01-01 → charge at this country's rate under
///    the seller's code (origin).
pub fn standard_outbound(
    policy: &dyn CountryPolicy,
    date: NaiveDate,
    category: ItemCategory,
    buyer: &Party,
    seller: &Party,
    region: Option<&str>,
    registry: &PolicyRegistry,
) -> Result<Resolution, VatError> {
    if !seller.is_business {
        return Err(VatError::NonBusinessSeller);
    }

    if !is_eu_member(&buyer.country_code) {
        return Ok(Resolution::Decided(ChargeDecision::no_charge(
            &buyer.country_code,
        )));
    }

    if buyer.country_code.eq_ignore_ascii_case(&seller.country_code) {
        return Ok(Resolution::Decided(ChargeDecision::charge(
            &seller.country_code,
            policy.rate(category, region),
        )));
    }

    if buyer.is_business {
        return Ok(Resolution::Decided(ChargeDecision::reverse_charge(
            &buyer.country_code,
        )));
    }

    if date >= DESTINATION_REGIME_DATE {
        let buyer_policy = registry
            .policy(&buyer.country_code)
            .ok_or_else(|| VatError::UnregisteredJurisdiction(buyer.country_code.clone()))?;
        return Ok(Resolution::Decided(ChargeDecision::charge(
            &buyer.country_code,
            buyer_policy.rate(category, region),
        )));
    }

    Ok(Resolution::Decided(ChargeDecision::charge(
        &seller.country_code,
        policy.rate(category, region),
    )))
}

/// A member state using the standard cross-border algorithm, parameterized
/// only by its rate table. Covers both flat-rate countries and those with
/// category-dependent reduced rates.
#[derive(Debug, Clone)]
pub struct MemberStatePolicy {
    rates: CategoryRates,
}

impl MemberStatePolicy {
    /// A member state with the given rate table.
    pub const fn new(rates: CategoryRates) -> Self {
        Self { rates }
    }

    /// A member state with one rate for all categories.
    pub const fn flat(standard: Decimal) -> Self {
        Self::new(CategoryRates::flat(standard))
    }
}

impl CountryPolicy for MemberStatePolicy {
    fn rate(&self, category: ItemCategory, _region: Option<&str>) -> Decimal {
        self.rates.rate(category)
    }

    fn resolve_inbound(
        &self,
        date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        region: Option<&str>,
        _registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError> {
        standard_inbound(self, date, category, buyer, seller, region)
    }

    fn resolve_outbound(
        &self,
        date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        region: Option<&str>,
        registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError> {
        standard_outbound(self, date, category, buyer, seller, region, registry)
    }
}
