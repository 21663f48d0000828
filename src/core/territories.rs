//! Territorial reference data: which countries belong to which VAT regime.
//!
//! Read-only code sets consumed by the rule policies. All lookups are
//! case-insensitive on ISO 3166-1 alpha-2 codes.

/// EU VAT area member-state codes.
///
/// Includes `EL`/`GR` (two codes for Greece) and `MC` (Monaco, which
/// invoices under French VAT rules). Excludes `GB` (left the area) and
/// the French overseas departments (own rate zone, see
/// [`FRENCH_OVERSEAS_CODES`]). Sorted for binary search.
pub static EU_MEMBER_CODES: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "EL", "ES", "FI", "FR", "GR", "HR", "HU", "IE",
    "IT", "LT", "LU", "LV", "MC", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
];

/// Non-member countries whose governments require EU sellers to charge
/// their VAT anyway, contrary to the default no-charge rule for exports.
pub static VAT_MANDATE_CODES: &[&str] = &["CA", "CH", "EG", "NO"];

/// Countries that invoice each other exactly as if domestic: France and
/// Monaco. Reverse charge never applies inside this union.
pub static FRENCH_VAT_UNION: &[&str] = &["FR", "MC"];

/// French overseas departments — Réunion, Guadeloupe, Martinique.
///
/// Outside the EU VAT area, but VAT at the 8.5% zone rate is always
/// charged at the customer's location; never reverse-charged.
pub static FRENCH_OVERSEAS_CODES: &[&str] = &["GP", "MQ", "RE"];

/// The whole French VAT zone: the FR/MC union plus the overseas
/// departments. Sales into FR/MC from anywhere in this zone are always
/// invoiced with VAT.
pub static FRENCH_VAT_ZONE: &[&str] = &["FR", "GP", "MC", "MQ", "RE"];

fn contains(set: &[&str], code: &str) -> bool {
    let code = code.to_uppercase();
    set.binary_search(&code.as_str()).is_ok()
}

/// Whether `code` is an EU VAT area member state.
pub fn is_eu_member(code: &str) -> bool {
    contains(EU_MEMBER_CODES, code)
}

/// Whether `code` is a non-member country that mandates VAT collection
/// by foreign sellers.
pub fn is_vat_mandated(code: &str) -> bool {
    contains(VAT_MANDATE_CODES, code)
}

/// Whether `code` is part of the France/Monaco same-VAT-territory union.
pub fn in_french_union(code: &str) -> bool {
    contains(FRENCH_VAT_UNION, code)
}

/// Whether `code` is a French overseas department.
pub fn is_french_overseas(code: &str) -> bool {
    contains(FRENCH_OVERSEAS_CODES, code)
}

/// Whether `code` lies anywhere in the French VAT zone (union or
/// overseas departments).
pub fn in_french_zone(code: &str) -> bool {
    contains(FRENCH_VAT_ZONE, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_states() {
        assert!(is_eu_member("DE"));
        assert!(is_eu_member("FR"));
        assert!(is_eu_member("MC"));
        assert!(is_eu_member("EL"));
        assert!(is_eu_member("GR"));
        assert!(is_eu_member("de"));
    }

    #[test]
    fn non_members() {
        assert!(!is_eu_member("GB"));
        assert!(!is_eu_member("US"));
        assert!(!is_eu_member("CH"));
        assert!(!is_eu_member("RE"));
        assert!(!is_eu_member(""));
    }

    #[test]
    fn mandated_countries() {
        for code in ["EG", "CH", "CA", "NO"] {
            assert!(is_vat_mandated(code), "{code} should be mandated");
            assert!(!is_eu_member(code), "{code} must not be a member");
        }
        assert!(!is_vat_mandated("US"));
        assert!(!is_vat_mandated("DE"));
    }

    #[test]
    fn french_zone_composition() {
        assert!(in_french_union("FR"));
        assert!(in_french_union("MC"));
        assert!(!in_french_union("RE"));

        for code in ["RE", "GP", "MQ"] {
            assert!(is_french_overseas(code));
            assert!(in_french_zone(code));
        }
        assert!(in_french_zone("FR"));
        assert!(in_french_zone("MC"));
        assert!(!in_french_zone("DE"));
    }

    #[test]
    fn sets_are_sorted() {
        for set in [
            EU_MEMBER_CODES,
            VAT_MANDATE_CODES,
            FRENCH_VAT_UNION,
            FRENCH_OVERSEAS_CODES,
            FRENCH_VAT_ZONE,
        ] {
            for window in set.windows(2) {
                assert!(
                    window[0] < window[1],
                    "codes not sorted: {} >= {}",
                    window[0],
                    window[1]
                );
            }
        }
    }
}
