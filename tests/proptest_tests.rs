//! Property-based tests for the resolution engine.
//!
//! Run with: `cargo test --test proptest_tests`

#![cfg(feature = "core")]

use chrono::NaiveDate;
use grenzvat::core::*;
use grenzvat::rules::{default_registry, resolve_sale};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Registered jurisdictions plus a few that are not.
const COUNTRIES: &[&str] = &[
    "AT", "BE", "BG", "CA", "CH", "CY", "CZ", "DE", "DK", "EE", "EG", "EL", "ES", "FI", "FR",
    "GB", "GP", "GR", "HR", "HU", "IE", "IT", "LT", "LU", "LV", "MC", "MQ", "MT", "NL", "NO",
    "PL", "PT", "RE", "RO", "SE", "SI", "SK", "US", "JP", "AU",
];

fn arb_country() -> impl Strategy<Value = &'static str> {
    prop::sample::select(COUNTRIES)
}

fn arb_category() -> impl Strategy<Value = ItemCategory> {
    prop::sample::select(ItemCategory::ALL.to_vec())
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 .. 2030-12-28, straddling the 2015 regime change.
    (2000i32..=2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

const REGION_HINTS: &[&str] = &["CE", "ML", "GC", "TF", "MD", "51001", "35999", "28001"];

fn arb_region() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        prop::sample::select(REGION_HINTS).prop_map(|s| Some(s.to_string())),
    ]
}

proptest! {
    /// Resolution always terminates in a decision or a typed error,
    /// never a panic.
    #[test]
    fn never_panics(
        d in arb_date(),
        category in arb_category(),
        buyer_cc in arb_country(),
        seller_cc in arb_country(),
        buyer_is_business in any::<bool>(),
        postal in arb_region(),
    ) {
        let buyer = Party {
            country_code: buyer_cc.into(),
            is_business: buyer_is_business,
            region_code: None,
        };
        let _ = resolve_sale(d, category, &buyer, &Party::business(seller_cc), postal.as_deref());
    }

    /// Only a `Charge` carries a rate; reverse charge and no charge pin
    /// it to zero. Rates are never negative.
    #[test]
    fn non_charge_actions_carry_zero_rate(
        d in arb_date(),
        category in arb_category(),
        buyer_cc in arb_country(),
        seller_cc in arb_country(),
        buyer_is_business in any::<bool>(),
    ) {
        let buyer = Party {
            country_code: buyer_cc.into(),
            is_business: buyer_is_business,
            region_code: None,
        };
        if let Ok(decision) =
            resolve_sale(d, category, &buyer, &Party::business(seller_cc), None)
        {
            prop_assert!(decision.rate >= Decimal::ZERO);
            if decision.action != ChargeAction::Charge {
                prop_assert_eq!(decision.rate, Decimal::ZERO);
            }
        }
    }

    /// The decision names the buyer's or the seller's country, nothing
    /// else.
    #[test]
    fn decision_country_is_a_party_country(
        d in arb_date(),
        category in arb_category(),
        buyer_cc in arb_country(),
        seller_cc in arb_country(),
        buyer_is_business in any::<bool>(),
    ) {
        let buyer = Party {
            country_code: buyer_cc.into(),
            is_business: buyer_is_business,
            region_code: None,
        };
        if let Ok(decision) =
            resolve_sale(d, category, &buyer, &Party::business(seller_cc), None)
        {
            prop_assert!(
                decision.country_code == buyer_cc || decision.country_code == seller_cc,
                "{} not {} or {}", decision.country_code, buyer_cc, seller_cc
            );
        }
    }

    /// Same inputs, same answer: the registry holds no mutable state.
    #[test]
    fn resolution_is_deterministic(
        d in arb_date(),
        category in arb_category(),
        buyer_cc in arb_country(),
        seller_cc in arb_country(),
        buyer_is_business in any::<bool>(),
        postal in arb_region(),
    ) {
        let buyer = Party {
            country_code: buyer_cc.into(),
            is_business: buyer_is_business,
            region_code: None,
        };
        let seller = Party::business(seller_cc);
        let first = resolve_sale(d, category, &buyer, &seller, postal.as_deref());
        let second = resolve_sale(d, category, &buyer, &seller, postal.as_deref());
        prop_assert_eq!(first, second);
    }

    /// A domestic sale to a consumer in any registered jurisdiction is
    /// charged under that jurisdiction's own code. (Business buyers are
    /// excluded: Egypt exempts them even domestically.)
    #[test]
    fn domestic_consumer_sales_charge_locally(
        d in arb_date(),
        category in arb_category(),
        cc in prop::sample::select(default_registry().country_codes().collect::<Vec<_>>()),
    ) {
        let decision =
            resolve_sale(d, category, &Party::consumer(cc), &Party::business(cc), None).unwrap();
        prop_assert_eq!(decision.action, ChargeAction::Charge);
        prop_assert_eq!(decision.country_code, cc);
    }

    /// Country codes are matched case-insensitively everywhere.
    #[test]
    fn lowercase_codes_resolve_identically(
        d in arb_date(),
        category in arb_category(),
        buyer_cc in arb_country(),
        seller_cc in arb_country(),
    ) {
        let upper = resolve_sale(
            d,
            category,
            &Party::consumer(buyer_cc),
            &Party::business(seller_cc),
            None,
        );
        let lower = resolve_sale(
            d,
            category,
            &Party::consumer(buyer_cc.to_lowercase()),
            &Party::business(seller_cc.to_lowercase()),
            None,
        );
        match (upper, lower) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.action, b.action);
                prop_assert_eq!(a.rate, b.rate);
                prop_assert_eq!(a.country_code.to_uppercase(), b.country_code.to_uppercase());
            }
            (Err(_), Err(_)) => {}
            (a, b) => prop_assert!(false, "diverged: {a:?} vs {b:?}"),
        }
    }
}

// A non-business seller fails identically for every input shape.
#[test]
fn consumer_seller_always_rejected() {
    for cc in ["DE", "FR", "GB", "US", "EG", "RE"] {
        let err = resolve_sale(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ItemCategory::ElectronicService,
            &Party::consumer("DE"),
            &Party::consumer(cc),
            None,
        )
        .unwrap_err();
        assert_eq!(err, VatError::NonBusinessSeller, "{cc}");
    }
}
