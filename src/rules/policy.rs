use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{ChargeDecision, ItemCategory, Party, VatError};
use crate::rules::registry::PolicyRegistry;

/// Outcome of asking one jurisdiction to resolve one direction of a sale.
///
/// `Defer` is a control-flow signal, not an error: it means "this
/// jurisdiction cannot decide without the counterpart jurisdiction's rules"
/// (e.g. pre-2015 consumer sales are taxed at origin, so the buyer side
/// defers to the seller side). The dispatcher turns an exhausted fallback
/// into [`VatError::NoApplicableRule`]; `Defer` itself never reaches
/// callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A final charge decision.
    Decided(ChargeDecision),
    /// No rule applies in this direction; try the other side.
    Defer,
}

/// VAT policy of a single jurisdiction.
///
/// All three operations are pure functions of their arguments. The
/// `registry` handle is only used to look up *other* jurisdictions' rates
/// (destination-rate rules); policies never mutate it.
pub trait CountryPolicy: Send + Sync {
    /// Rate in percent for a sale *inside* this jurisdiction, given the
    /// item category and an optional subnational hint (region code or
    /// postal code).
    fn rate(&self, category: ItemCategory, region: Option<&str>) -> Decimal;

    /// Decision when this jurisdiction is the **buyer's**.
    fn resolve_inbound(
        &self,
        date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        region: Option<&str>,
        registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError>;

    /// Decision when this jurisdiction is the **seller's**.
    fn resolve_outbound(
        &self,
        date: NaiveDate,
        category: ItemCategory,
        buyer: &Party,
        seller: &Party,
        region: Option<&str>,
        registry: &PolicyRegistry,
    ) -> Result<Resolution, VatError>;
}
