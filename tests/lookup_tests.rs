#![cfg(feature = "lookup")]

//! Offline tests for the identifier-validation surface. Nothing here
//! touches the network; registry clients are covered by their own unit
//! tests against canned payloads.

use grenzvat::lookup::{CheckResult, RegistryKind, registry_for, validate_vat_format};

#[test]
fn accepts_well_formed_identifiers() {
    let cases = [
        "ATU12345678",
        "BE0123456789",
        "BG123456789",
        "BG1234567890",
        "CY12345678A",
        "CZ12345678",
        "DE123456789",
        "DK12345678",
        "EE123456789",
        "EL123456789",
        "GR123456789",
        "ESX1234567X",
        "FI12345678",
        "FR12345678901",
        "FRXX123456789",
        "MC12345678901",
        "GB123456789",
        "GB123456789012",
        "XI123456789",
        "HR12345678901",
        "HU12345678",
        "IE1234567X",
        "IE1234567XX",
        "IT12345678901",
        "LT123456789",
        "LT123456789012",
        "LU12345678",
        "LV12345678901",
        "MT12345678",
        "NL123456789B01",
        "PL1234567890",
        "PT123456789",
        "RO12",
        "RO1234567890",
        "SE123456789012",
        "SI12345678",
        "SK1234567890",
    ];
    for vat_id in cases {
        assert!(validate_vat_format(vat_id).is_ok(), "{vat_id}");
    }
}

#[test]
fn rejects_malformed_identifiers() {
    let cases = [
        "",
        "DE",
        "DE12345678",     // too short
        "DE1234567890",   // too long
        "DE012345678",    // leading zero
        "AT123456789",    // missing U
        "ATU1234567",     // too short after U
        "NL123456789A01", // B marker missing
        "GB12345678",
        "FR1234567890",
        "RO12345678901",
        "US123456789", // no such scheme
        "XX123456789",
    ];
    for vat_id in cases {
        assert!(validate_vat_format(vat_id).is_err(), "{vat_id}");
    }
}

#[test]
fn split_returns_country_and_number() {
    let (country, number) = validate_vat_format("FR12345678901").unwrap();
    assert_eq!(country, "FR");
    assert_eq!(number, "12345678901");
}

#[test]
fn format_error_mentions_the_input() {
    let err = validate_vat_format("DE12").unwrap_err();
    assert!(err.to_string().contains("DE12"));
}

#[test]
fn registries_cover_the_rate_jurisdictions() {
    // Every EU member, the French zone, the UK and Egypt must have a
    // registry; the other mandate countries have none to consult.
    for cc in ["DE", "FR", "MC", "EL", "GR", "RE", "GP", "MQ"] {
        assert_eq!(registry_for(cc), Some(RegistryKind::Vies), "{cc}");
    }
    assert_eq!(registry_for("GB"), Some(RegistryKind::Hmrc));
    assert_eq!(registry_for("EG"), Some(RegistryKind::Refusing));
    for cc in ["CH", "CA", "NO", "US"] {
        assert_eq!(registry_for(cc), None, "{cc}");
    }
}

#[test]
fn check_result_serde_round_trip() {
    let result = CheckResult {
        is_valid: Some(true),
        business_name: Some("ACME GMBH".into()),
        business_address: Some("MUSTERSTR 1, 10115 BERLIN".into()),
        log_lines: vec!["> POST ...".into(), "< 200 OK".into()],
    };
    let json = serde_json::to_string(&result).unwrap();
    let back: CheckResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.is_valid, Some(true));
    assert_eq!(back.business_name.as_deref(), Some("ACME GMBH"));
    assert_eq!(back.log_lines.len(), 2);
}

#[test]
fn nondeterministic_default() {
    let result = CheckResult::default();
    assert_eq!(result.is_valid, None);
    assert!(result.log_lines.is_empty());
}
