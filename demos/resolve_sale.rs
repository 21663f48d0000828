use chrono::NaiveDate;
use grenzvat::core::*;
use grenzvat::rules::{rate_for, resolve_sale};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn show(label: &str, result: Result<ChargeDecision, VatError>) {
    match result {
        Ok(d) => println!(
            "  {label}\n    => {:?} under {} at {}%",
            d.action, d.country_code, d.rate
        ),
        Err(e) => println!("  {label}\n    => ERROR: {e}"),
    }
}

fn main() {
    println!("=== Cross-border sale resolution ===\n");

    show(
        "FR seller -> DE consumer, e-service, 2015-06-01",
        resolve_sale(
            date(2015, 6, 1),
            ItemCategory::ElectronicService,
            &Party::consumer("DE"),
            &Party::business("FR"),
            None,
        ),
    );

    show(
        "FR seller -> DE business, e-service, 2015-06-01",
        resolve_sale(
            date(2015, 6, 1),
            ItemCategory::ElectronicService,
            &Party::business("DE"),
            &Party::business("FR"),
            None,
        ),
    );

    show(
        "DE seller -> FR consumer, e-service, 2014-06-01 (origin regime)",
        resolve_sale(
            date(2014, 6, 1),
            ItemCategory::ElectronicService,
            &Party::consumer("FR"),
            &Party::business("DE"),
            None,
        ),
    );

    show(
        "FR seller -> RE consumer, e-book, 2010-01-01 (overseas department)",
        resolve_sale(
            date(2010, 1, 1),
            ItemCategory::Ebook,
            &Party::consumer("RE"),
            &Party::business("FR"),
            None,
        ),
    );

    show(
        "DE seller -> GB consumer, e-service, 2022-03-01",
        resolve_sale(
            date(2022, 3, 1),
            ItemCategory::ElectronicService,
            &Party::consumer("GB"),
            &Party::business("DE"),
            None,
        ),
    );

    show(
        "DE seller -> US consumer, e-service, 2022-03-01 (export)",
        resolve_sale(
            date(2022, 3, 1),
            ItemCategory::ElectronicService,
            &Party::consumer("US"),
            &Party::business("DE"),
            None,
        ),
    );

    show(
        "ES seller -> ES consumer in Ceuta (postal 51001)",
        resolve_sale(
            date(2024, 1, 1),
            ItemCategory::ElectronicService,
            &Party::consumer("ES"),
            &Party::business("ES"),
            Some("51001"),
        ),
    );

    println!("\n=== Rate lookups ===\n");

    for (cc, category) in [
        ("DE", ItemCategory::Ebook),
        ("FR", ItemCategory::Enewspaper),
        ("HU", ItemCategory::ElectronicService),
        ("RE", ItemCategory::ElectronicService),
        ("CH", ItemCategory::ElectronicService),
    ] {
        match rate_for(cc, category, None) {
            Ok(rate) => println!("  {cc} {category:?}: {rate}%"),
            Err(e) => println!("  {cc} {category:?}: {e}"),
        }
    }
}
