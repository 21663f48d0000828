//! VAT-identifier validation against government registries.
//!
//! Independent of the rate engine — billing systems compose the two, the
//! engine never calls into here. Format checks are offline; VIES and HMRC
//! checks are async network calls.
//!
//! # Example
//!
//! ```ignore
//! use grenzvat::lookup::*;
//!
//! // Format-only validation (no network)
//! assert!(validate_vat_format("DE123456789").is_ok());
//!
//! // Registry check (async, requires network)
//! let result = check_identifier("123456789", "DE", false).await;
//! assert_eq!(result.is_valid, Some(true));
//! ```

mod format;
mod hmrc;
mod vies;

use crate::core::{in_french_zone, is_eu_member};
use serde::{Deserialize, Serialize};

pub use format::{VatFormatError, validate_vat_format};
pub use hmrc::check_hmrc;
pub use vies::check_vies;

/// Result of checking a VAT identifier against a registry.
///
/// `is_valid` is tri-state: `None` means the registry could not give a
/// deterministic answer (timeout, malformed response) — distinct from a
/// definite `Some(false)`. `log_lines` is a request/response transcript
/// for audit trails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the identifier is valid, if the registry answered.
    pub is_valid: Option<bool>,
    /// Registered business name, if reported.
    pub business_name: Option<String>,
    /// Registered business address, if reported.
    pub business_address: Option<String>,
    /// Transcript of the exchange with the registry.
    pub log_lines: Vec<String>,
}

impl CheckResult {
    fn refused() -> Self {
        Self {
            is_valid: Some(false),
            ..Self::default()
        }
    }
}

/// Which registry answers for a jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// The EU VIES service (member states, Monaco, overseas departments).
    Vies,
    /// The UK HMRC service.
    Hmrc,
    /// A registry that refuses every number (Egypt publishes none).
    Refusing,
}

/// The registry responsible for a country's VAT identifiers, if any.
pub fn registry_for(country_code: &str) -> Option<RegistryKind> {
    let code = country_code.to_uppercase();
    if code == "GB" {
        return Some(RegistryKind::Hmrc);
    }
    if code == "EG" {
        return Some(RegistryKind::Refusing);
    }
    if is_eu_member(&code) || in_french_zone(&code) {
        return Some(RegistryKind::Vies);
    }
    None
}

/// Check a VAT identifier against the registry responsible for
/// `country_code`.
///
/// `number` is the identifier without the country prefix. `test_mode`
/// routes HMRC calls to the sandbox API; VIES has no test environment.
/// Countries without a registry produce a nondeterministic result
/// (`is_valid: None`) with an explanatory log line.
pub async fn check_identifier(number: &str, country_code: &str, test_mode: bool) -> CheckResult {
    match registry_for(country_code) {
        Some(RegistryKind::Vies) => check_vies(country_code, number).await,
        Some(RegistryKind::Hmrc) => check_hmrc(number, test_mode).await,
        Some(RegistryKind::Refusing) => CheckResult::refused(),
        None => CheckResult {
            log_lines: vec![format!("no VAT registry known for country '{country_code}'")],
            ..CheckResult::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_dispatch() {
        assert_eq!(registry_for("DE"), Some(RegistryKind::Vies));
        assert_eq!(registry_for("EL"), Some(RegistryKind::Vies));
        assert_eq!(registry_for("GR"), Some(RegistryKind::Vies));
        assert_eq!(registry_for("MC"), Some(RegistryKind::Vies));
        assert_eq!(registry_for("RE"), Some(RegistryKind::Vies));
        assert_eq!(registry_for("GB"), Some(RegistryKind::Hmrc));
        assert_eq!(registry_for("EG"), Some(RegistryKind::Refusing));
        assert_eq!(registry_for("US"), None);
        assert_eq!(registry_for("CH"), None);
    }

    #[test]
    fn refusing_registry_rejects() {
        let result = CheckResult::refused();
        assert_eq!(result.is_valid, Some(false));
        assert!(result.business_name.is_none());
    }
}
