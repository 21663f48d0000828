use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A party to a transaction — either a consumer or a business in a given
/// country.
///
/// Parties carry no identity beyond their fields; they are created fresh
/// per query and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Legal or effective country of registration or residence
    /// (ISO 3166-1 alpha-2).
    pub country_code: String,
    /// Whether the party is a legal business entity.
    pub is_business: bool,
    /// Region code within the country, for countries with region-specific
    /// VAT rates (e.g. "CE" for Ceuta). Alternative to a postal code.
    pub region_code: Option<String>,
}

impl Party {
    /// A business party in the given country.
    pub fn business(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            is_business: true,
            region_code: None,
        }
    }

    /// A consumer (non-business) party in the given country.
    pub fn consumer(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            is_business: false,
            region_code: None,
        }
    }

    /// Attach a subnational region code.
    pub fn with_region(mut self, region_code: impl Into<String>) -> Self {
        self.region_code = Some(region_code.into());
        self
    }
}

/// Category of the good or service being sold.
///
/// Closed enumeration — rate functions match on these, so no dynamic
/// categories exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Generic physical good.
    PhysicalGood,
    /// Generic electronically supplied service.
    ElectronicService,
    /// Generic telecommunications service.
    TelecommunicationsService,
    /// Generic radio/TV broadcasting service.
    BroadcastingService,
    /// Prepaid radio/TV broadcasting service.
    PrepaidBroadcastingService,
    /// Electronic book.
    Ebook,
    /// Electronic newspaper.
    Enewspaper,
}

impl ItemCategory {
    /// Whether the category belongs to the broadcasting family
    /// (generic or prepaid). Several countries apply a reduced rate to
    /// the whole family.
    pub fn is_broadcasting(&self) -> bool {
        matches!(
            self,
            Self::BroadcastingService | Self::PrepaidBroadcastingService
        )
    }

    /// All categories, for exhaustive table-driven tests.
    pub const ALL: [ItemCategory; 7] = [
        Self::PhysicalGood,
        Self::ElectronicService,
        Self::TelecommunicationsService,
        Self::BroadcastingService,
        Self::PrepaidBroadcastingService,
        Self::Ebook,
        Self::Enewspaper,
    ];
}

/// What the seller must do about VAT on the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeAction {
    /// VAT is collected from the buyer at the given jurisdiction's rate.
    Charge,
    /// Buyer self-assesses VAT in their own jurisdiction; the seller
    /// records a zero-rate line.
    ReverseCharge,
    /// Transaction is outside the common VAT area and untaxed by this
    /// seller.
    NoCharge,
}

/// The outcome of resolving a sale: an action, the jurisdiction under
/// whose name the charge is recorded, and the rate in percent.
///
/// Invariant: `rate` is zero whenever `action` is [`ChargeAction::ReverseCharge`]
/// or [`ChargeAction::NoCharge`]. Use the constructors to uphold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeDecision {
    /// The action the seller must take.
    pub action: ChargeAction,
    /// Jurisdiction whose rate applies (ISO 3166-1 alpha-2).
    pub country_code: String,
    /// VAT rate in percent (e.g. `20` means 20%). Exact decimal, never
    /// a float.
    pub rate: Decimal,
}

impl ChargeDecision {
    /// Charge VAT at `rate` under `country_code`.
    pub fn charge(country_code: impl Into<String>, rate: Decimal) -> Self {
        Self {
            action: ChargeAction::Charge,
            country_code: country_code.into(),
            rate,
        }
    }

    /// Reverse charge — the buyer accounts for VAT, rate is zero.
    pub fn reverse_charge(country_code: impl Into<String>) -> Self {
        Self {
            action: ChargeAction::ReverseCharge,
            country_code: country_code.into(),
            rate: Decimal::ZERO,
        }
    }

    /// No VAT charged, rate is zero.
    pub fn no_charge(country_code: impl Into<String>) -> Self {
        Self {
            action: ChargeAction::NoCharge,
            country_code: country_code.into(),
            rate: Decimal::ZERO,
        }
    }
}
