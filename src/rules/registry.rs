//! The policy registry and the top-level sale-resolution dispatcher.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::{ChargeDecision, ItemCategory, Party, VatError};
use crate::rules::overrides::{
    FrenchUnionPolicy, MandatePolicy, OverseasZonePolicy, SpainPolicy, UkPolicy,
};
use crate::rules::policy::{CountryPolicy, Resolution};
use crate::rules::standard::{CategoryRates, MemberStatePolicy};

/// Immutable mapping from jurisdiction code to its VAT policy.
///
/// Built once (see [`default_registry`]) and never mutated afterwards, so
/// it is freely shared across threads. Synonym codes (`EL`/`GR` for
/// Greece) map to equivalent policies.
pub struct PolicyRegistry {
    policies: HashMap<&'static str, Box<dyn CountryPolicy>>,
}

impl PolicyRegistry {
    /// The standard rule table. Rates as of July 1st, 2025.
    pub fn standard() -> Self {
        let mut policies: HashMap<&'static str, Box<dyn CountryPolicy>> = HashMap::new();

        fn flat(rate: Decimal) -> Box<dyn CountryPolicy> {
            Box::new(MemberStatePolicy::flat(rate))
        }
        fn with_rates(rates: CategoryRates) -> Box<dyn CountryPolicy> {
            Box::new(MemberStatePolicy::new(rates))
        }
        fn ebook_reduced(standard: Decimal, ebook: Decimal) -> Box<dyn CountryPolicy> {
            with_rates(CategoryRates {
                ebook: Some(ebook),
                ..CategoryRates::flat(standard)
            })
        }

        // Member states
        policies.insert(
            "AT",
            with_rates(CategoryRates {
                prepaid_broadcasting: Some(dec!(10)),
                ebook: Some(dec!(10)),
                ..CategoryRates::flat(dec!(20))
            }),
        );
        policies.insert("BE", ebook_reduced(dec!(21), dec!(6)));
        policies.insert("BG", flat(dec!(20)));
        policies.insert("CY", flat(dec!(19)));
        policies.insert("CZ", ebook_reduced(dec!(21), dec!(10)));
        policies.insert("DE", ebook_reduced(dec!(19), dec!(7)));
        policies.insert("DK", flat(dec!(25)));
        policies.insert("EE", flat(dec!(24)));
        policies.insert("EL", flat(dec!(24)));
        policies.insert("GR", flat(dec!(24))); // Synonymous country code for Greece
        policies.insert("ES", Box::new(SpainPolicy));
        policies.insert("FI", ebook_reduced(dec!(25.5), dec!(10)));
        policies.insert("FR", Box::new(FrenchUnionPolicy::new()));
        policies.insert("HR", ebook_reduced(dec!(25), dec!(5)));
        policies.insert("HU", flat(dec!(27)));
        policies.insert("IE", ebook_reduced(dec!(23), dec!(9)));
        policies.insert("IT", flat(dec!(22)));
        policies.insert("LT", flat(dec!(21)));
        policies.insert(
            "LU",
            with_rates(CategoryRates {
                broadcasting: Some(dec!(3)),
                ebook: Some(dec!(3)),
                ..CategoryRates::flat(dec!(17))
            }),
        );
        policies.insert("LV", flat(dec!(21)));
        policies.insert("MC", Box::new(FrenchUnionPolicy::new())); // Monaco, French VAT zone
        policies.insert("MT", ebook_reduced(dec!(18), dec!(5)));
        policies.insert("NL", ebook_reduced(dec!(21), dec!(9)));
        policies.insert(
            "PL",
            with_rates(CategoryRates {
                broadcasting: Some(dec!(8)),
                ebook: Some(dec!(5)),
                ..CategoryRates::flat(dec!(23))
            }),
        );
        policies.insert("PT", ebook_reduced(dec!(23), dec!(6)));
        policies.insert("RO", flat(dec!(21)));
        policies.insert("SE", ebook_reduced(dec!(25), dec!(6)));
        policies.insert("SI", flat(dec!(22)));
        policies.insert("SK", flat(dec!(23)));

        // Post-exit United Kingdom
        policies.insert("GB", Box::new(UkPolicy));

        // French overseas departments
        policies.insert("RE", Box::new(OverseasZonePolicy));
        policies.insert("GP", Box::new(OverseasZonePolicy));
        policies.insert("MQ", Box::new(OverseasZonePolicy));

        // Non-member countries mandating VAT collection
        policies.insert("EG", Box::new(MandatePolicy::with_business_exemption(dec!(14))));
        policies.insert("CH", Box::new(MandatePolicy::new(dec!(8.1))));
        policies.insert("CA", Box::new(MandatePolicy::new(dec!(0))));
        policies.insert("NO", Box::new(MandatePolicy::new(dec!(25))));

        Self { policies }
    }

    /// The policy registered for a country, if any.
    pub fn policy(&self, country_code: &str) -> Option<&dyn CountryPolicy> {
        self.policies
            .get(country_code.to_uppercase().as_str())
            .map(Box::as_ref)
    }

    /// All registered jurisdiction codes.
    pub fn country_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.policies.keys().copied()
    }

    /// The VAT rate a country applies to a category, with an optional
    /// subnational region or postal-code hint.
    pub fn rate_for(
        &self,
        country_code: &str,
        category: ItemCategory,
        region: Option<&str>,
    ) -> Result<Decimal, VatError> {
        let policy = self
            .policy(country_code)
            .ok_or_else(|| VatError::UnregisteredJurisdiction(country_code.to_string()))?;
        Ok(policy.rate(category, region))
    }

    /// Resolve the VAT charge for a single sale.
    ///
    /// The buyer's jurisdiction is asked first; if it defers — or has no
    /// registered policy at all — the seller's jurisdiction decides. If
    /// neither side produces a decision, this is a gap in the rule table
    /// and resolution fails with [`VatError::NoApplicableRule`] rather
    /// than silently defaulting to no charge.
    ///
    /// `postal_code` is an optional subnational hint; if absent, the
    /// buyer's `region_code` is used instead. Both encodings select the
    /// same rate zones.
    pub fn resolve_sale(
        &self,
        date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        postal_code: Option<&str>,
    ) -> Result<ChargeDecision, VatError> {
        let region = postal_code.or(buyer.region_code.as_deref());

        if let Some(buyer_policy) = self.policy(&buyer.country_code) {
            match buyer_policy.resolve_inbound(date, category, buyer, seller, region, self)? {
                Resolution::Decided(decision) => return Ok(decision),
                Resolution::Defer => {}
            }
        }

        if let Some(seller_policy) = self.policy(&seller.country_code) {
            match seller_policy.resolve_outbound(date, category, buyer, seller, region, self)? {
                Resolution::Decided(decision) => return Ok(decision),
                Resolution::Defer => {}
            }
        }

        Err(VatError::NoApplicableRule {
            seller: seller.country_code.clone(),
            buyer: buyer.country_code.clone(),
            date,
        })
    }
}

/// The process-wide registry with the standard rule table, built on first
/// use and immutable afterwards.
pub fn default_registry() -> &'static PolicyRegistry {
    static REGISTRY: OnceLock<PolicyRegistry> = OnceLock::new();
    REGISTRY.get_or_init(PolicyRegistry::standard)
}

/// Resolve the VAT charge for a single sale against the standard rule
/// table. See [`PolicyRegistry::resolve_sale`].
pub fn resolve_sale(
    date: NaiveDate,
    category: ItemCategory,
    buyer: &Party,
    seller: &Party,
    postal_code: Option<&str>,
) -> Result<ChargeDecision, VatError> {
    default_registry().resolve_sale(date, category, buyer, seller, postal_code)
}

/// The VAT rate a country applies to a category, against the standard
/// rule table. See [`PolicyRegistry::rate_for`].
pub fn rate_for(
    country_code: &str,
    category: ItemCategory,
    region: Option<&str>,
) -> Result<Decimal, VatError> {
    default_registry().rate_for(country_code, category, region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChargeAction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_expected_country_is_registered() {
        let registry = default_registry();
        let expected = [
            "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "GR", "ES", "FI", "FR", "GB",
            "HR", "HU", "IE", "IT", "LT", "LU", "LV", "MC", "MT", "NL", "PL", "PT", "RO", "SE",
            "SI", "SK", "EG", "CH", "CA", "NO", "RE", "GP", "MQ",
        ];
        for code in expected {
            assert!(registry.policy(code).is_some(), "{code} missing");
        }
        assert_eq!(registry.country_codes().count(), expected.len());
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let registry = default_registry();
        assert!(registry.policy("de").is_some());
        assert!(registry.policy("Fr").is_some());
        assert!(registry.policy("XX").is_none());
    }

    #[test]
    fn greece_synonyms_resolve_identically() {
        for code in ["EL", "GR"] {
            assert_eq!(
                rate_for(code, ItemCategory::ElectronicService, None).unwrap(),
                dec!(24)
            );
        }

        let via_el = resolve_sale(
            date(2020, 6, 1),
            ItemCategory::Ebook,
            &Party::consumer("EL"),
            &Party::business("DE"),
            None,
        )
        .unwrap();
        let via_gr = resolve_sale(
            date(2020, 6, 1),
            ItemCategory::Ebook,
            &Party::consumer("GR"),
            &Party::business("DE"),
            None,
        )
        .unwrap();
        assert_eq!(via_el.action, via_gr.action);
        assert_eq!(via_el.rate, via_gr.rate);
    }

    #[test]
    fn rate_for_unknown_country_errors() {
        let err = rate_for("US", ItemCategory::Ebook, None).unwrap_err();
        assert_eq!(err, VatError::UnregisteredJurisdiction("US".into()));
    }

    #[test]
    fn unregistered_buyer_falls_back_to_seller() {
        // US buyer has no policy; German outbound rules apply: no charge.
        let decision = resolve_sale(
            date(2020, 6, 1),
            ItemCategory::ElectronicService,
            &Party::consumer("US"),
            &Party::business("DE"),
            None,
        )
        .unwrap();
        assert_eq!(decision, ChargeDecision::no_charge("US"));
    }

    #[test]
    fn both_sides_unable_to_decide_is_fatal() {
        // UK seller to an unregistered country: inbound has no policy,
        // UK outbound defers. Must fail loudly, never default.
        let err = resolve_sale(
            date(2022, 6, 1),
            ItemCategory::ElectronicService,
            &Party::consumer("US"),
            &Party::business("GB"),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, VatError::NoApplicableRule { .. }));
    }

    #[test]
    fn postal_code_overrides_buyer_region() {
        // Postal hint wins over the party's region code.
        let buyer = Party::consumer("ES").with_region("MD");
        let decision = resolve_sale(
            date(2024, 1, 1),
            ItemCategory::ElectronicService,
            &buyer,
            &Party::business("ES"),
            Some("51001"),
        )
        .unwrap();
        assert_eq!(decision.action, ChargeAction::Charge);
        assert_eq!(decision.rate, Decimal::ZERO);
        assert_eq!(decision.country_code, "ES");
    }
}
