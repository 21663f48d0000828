//! Jurisdictions that deviate from the standard member-state algorithm:
//! subnational carve-outs, the France/Monaco union, the overseas
//! departments, the post-Brexit UK regime, and non-member countries that
//! mandate VAT collection.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::{ChargeDecision, ItemCategory, Party, VatError, in_french_zone};
use crate::rules::policy::{CountryPolicy, Resolution};
use crate::rules::registry::PolicyRegistry;
use crate::rules::standard::{CategoryRates, standard_inbound, standard_outbound};

/// Spain. Standard algorithm, but certain territories are outside the
/// Spanish VAT system and rate at 0%:
///
/// - Ceuta (`CE`, postal codes 51xxx)
/// - Melilla (`ML`, postal codes 52xxx)
/// - Las Palmas (`GC`, postal codes 35xxx)
/// - Tenerife (`TF`, postal codes 38xxx)
///
/// The region hint may be either encoding; both select the same enclaves.
#[derive(Debug, Clone, Default)]
pub struct SpainPolicy;

const ES_ZERO_RATE_REGIONS: &[&str] = &["CE", "GC", "ML", "TF"];
const ES_ZERO_RATE_POSTAL_PREFIXES: &[&str] = &["35", "38", "51", "52"];

impl SpainPolicy {
    fn is_zero_rate_region(region: Option<&str>) -> bool {
        let Some(region) = region else {
            return false;
        };
        let region = region.trim();
        if region.chars().all(|c| c.is_ascii_digit()) {
            ES_ZERO_RATE_POSTAL_PREFIXES
                .iter()
                .any(|prefix| region.starts_with(prefix))
        } else {
            ES_ZERO_RATE_REGIONS
                .iter()
                .any(|code| region.eq_ignore_ascii_case(code))
        }
    }
}

impl CountryPolicy for SpainPolicy {
    fn rate(&self, category: ItemCategory, region: Option<&str>) -> Decimal {
        if Self::is_zero_rate_region(region) {
            return Decimal::ZERO;
        }
        match category {
            ItemCategory::Ebook => dec!(4),
            _ => dec!(21),
        }
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

/// France or Monaco — the same-VAT-territory union.
///
/// A sale into this country from anywhere in the French VAT zone (FR, MC,
/// or an overseas department) is always invoiced with VAT at this
/// country's rate: reverse charge never applies inside the zone, and the
/// 2015 regime change is irrelevant to it. Sales from outside the zone
/// follow the standard algorithm.
#[derive(Debug, Clone)]
pub struct FrenchUnionPolicy {
    rates: CategoryRates,
}

impl FrenchUnionPolicy {
    /// The French rate table — shared by FR and MC (Monaco invoices under
    /// French VAT rules).
    pub const fn new() -> Self {
        Self {
            rates: CategoryRates {
                standard: dec!(20),
                broadcasting: Some(dec!(10)),
                prepaid_broadcasting: None,
                ebook: Some(dec!(5.5)),
                enewspaper: Some(dec!(2.1)),
            },
        }
    }
}

impl Default for FrenchUnionPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryPolicy for FrenchUnionPolicy {
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
        if !seller.is_business {
            return Err(VatError::NonBusinessSeller);
        }
        if in_french_zone(&seller.country_code) {
            return Ok(Resolution::Decided(ChargeDecision::charge(
                &buyer.country_code,
                self.rate(category, region),
            )));
        }
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

/// A French overseas department (Réunion, Guadeloupe, Martinique).
///
/// Fiscally outside the EU VAT area but with always-charge semantics:
/// selling *into* the department charges the 8.5% zone rate at the
/// customer's location, and selling *out of* it charges the destination
/// country's own rate — in both directions regardless of buyer status or
/// date. Reverse charge does not exist here.
#[derive(Debug, Clone, Default)]
pub struct OverseasZonePolicy;

impl OverseasZonePolicy {
    /// Single VAT rate of the overseas departments.
    pub const ZONE_RATE: Decimal = dec!(8.5);
}

impl CountryPolicy for OverseasZonePolicy {
    fn rate(&self, _category: ItemCategory, _region: Option<&str>) -> Decimal {
        Self::ZONE_RATE
    }

    fn resolve_inbound(
        &self,
        _date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        region: Option<&str>,
        _registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError> {
        if !seller.is_business {
            return Err(VatError::NonBusinessSeller);
        }
        Ok(Resolution::Decided(ChargeDecision::charge(
            &buyer.country_code,
            self.rate(category, region),
        )))
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
        if !seller.is_business {
            return Err(VatError::NonBusinessSeller);
        }
        // Destination rate, whoever and whenever the buyer is. Countries
        // without a registered policy fall back to the standard rules
        // (no charge outside the common area).
        match registry.policy(&buyer.country_code) {
            Some(buyer_policy) => Ok(Resolution::Decided(ChargeDecision::charge(
                &buyer.country_code,
                buyer_policy.rate(category, region),
            ))),
            None => standard_outbound(self, date, category, buyer, seller, region, registry),
        }
    }
}

/// The United Kingdom after leaving the EU VAT area.
///
/// Inbound rules ignore the 2015 regime date entirely: domestic and
/// consumer sales charge the flat 20% rate, business buyers account for
/// VAT through the reverse-charge mechanism — on every date. Sales *from*
/// the UK are not modeled; outbound resolution defers, and with no other
/// rule applicable the dispatcher reports the gap.
#[derive(Debug, Clone, Default)]
pub struct UkPolicy;

impl UkPolicy {
    /// UK standard rate, unchanged across the exit.
    pub const STANDARD_RATE: Decimal = dec!(20);
}

impl CountryPolicy for UkPolicy {
    fn rate(&self, _category: ItemCategory, _region: Option<&str>) -> Decimal {
        Self::STANDARD_RATE
    }

    fn resolve_inbound(
        &self,
        _date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        region: Option<&str>,
        _registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError> {
        if !seller.is_business {
            return Err(VatError::NonBusinessSeller);
        }
        if seller.country_code.eq_ignore_ascii_case(&buyer.country_code) {
            return Ok(Resolution::Decided(ChargeDecision::charge(
                &buyer.country_code,
                self.rate(category, region),
            )));
        }
        if buyer.is_business {
            return Ok(Resolution::Decided(ChargeDecision::reverse_charge(
                &buyer.country_code,
            )));
        }
        Ok(Resolution::Decided(ChargeDecision::charge(
            &buyer.country_code,
            self.rate(category, region),
        )))
    }

    fn resolve_outbound(
        &self,
        _date: NaiveDate,
        _category: ItemCategory,
        _buyer: &Party,
        seller: &Party,
        _region: Option<&str>,
        _registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError> {
        if !seller.is_business {
            return Err(VatError::NonBusinessSeller);
        }
        Ok(Resolution::Defer)
    }
}

/// A non-member country whose government requires foreign sellers to
/// charge its VAT: Egypt, Switzerland, Canada, Norway.
///
/// The flat rate applies to both consumer and business buyers, inbound
/// and outbound, with no reverse-charge mechanism. Egypt alone exempts
/// business buyers — a documented government policy, encoded per country
/// rather than assumed.
#[derive(Debug, Clone)]
pub struct MandatePolicy {
    rate: Decimal,
    business_exempt: bool,
}

impl MandatePolicy {
    /// A mandate country charging `rate` to every buyer.
    pub const fn new(rate: Decimal) -> Self {
        Self {
            rate,
            business_exempt: false,
        }
    }

    /// A mandate country that exempts business buyers (no charge, not
    /// reverse charge).
    pub const fn with_business_exemption(rate: Decimal) -> Self {
        Self {
            rate,
            business_exempt: true,
        }
    }
}

impl CountryPolicy for MandatePolicy {
    fn rate(&self, _category: ItemCategory, _region: Option<&str>) -> Decimal {
        self.rate
    }

    fn resolve_inbound(
        &self,
        _date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        region: Option<&str>,
        _registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError> {
        if !seller.is_business {
            return Err(VatError::NonBusinessSeller);
        }
        if self.business_exempt && buyer.is_business {
            return Ok(Resolution::Decided(ChargeDecision::no_charge(
                &buyer.country_code,
            )));
        }
        Ok(Resolution::Decided(ChargeDecision::charge(
            &buyer.country_code,
            self.rate(category, region),
        )))
    }

    fn resolve_outbound(
        &self,
        _date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        region: Option<&str>,
        _registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError> {
        if !seller.is_business {
            return Err(VatError::NonBusinessSeller);
        }
        Ok(Resolution::Decided(ChargeDecision::charge(
            &buyer.country_code,
            self.rate(category, region),
        )))
    }
}
