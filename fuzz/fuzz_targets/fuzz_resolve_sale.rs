#![no_main]

use arbitrary::Arbitrary;
use chrono::NaiveDate;
use grenzvat::core::{ItemCategory, Party};
use grenzvat::rules::resolve_sale;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    days: u16,
    category: u8,
    buyer_country: String,
    buyer_is_business: bool,
    buyer_region: Option<String>,
    seller_country: String,
    seller_is_business: bool,
    postal_code: Option<String>,
}

fuzz_target!(|input: Input| {
    let Some(date) = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.checked_add_days(chrono::Days::new(u64::from(input.days))))
    else {
        return;
    };
    let category = ItemCategory::ALL[usize::from(input.category) % ItemCategory::ALL.len()];
    let buyer = Party {
        country_code: input.buyer_country,
        is_business: input.buyer_is_business,
        region_code: input.buyer_region,
    };
    let seller = Party {
        country_code: input.seller_country,
        is_business: input.seller_is_business,
        region_code: None,
    };
    // Must not panic — errors are fine, panics are bugs.
    let _ = resolve_sale(date, category, &buyer, &seller, input.postal_code.as_deref());
});
