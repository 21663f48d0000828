use chrono::NaiveDate;
use thiserror::Error;

/// Fatal conditions during VAT resolution.
///
/// "This direction cannot decide" is deliberately *not* an error — the
/// dispatcher handles that fallback via [`crate::rules::Resolution::Defer`].
/// Everything here is surfaced to the caller: guessing a rate instead
/// would misstate tax on a real invoice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum VatError {
    /// Non-business sellers are not supported by any policy.
    #[error("non-business sellers are not supported")]
    NonBusinessSeller,

    /// Neither the buyer's nor the seller's jurisdiction produced a
    /// decision — a configuration gap in the rule table.
    #[error("no VAT rule applies to a sale from {seller} to {buyer} on {date}")]
    NoApplicableRule {
        /// Seller country code.
        seller: String,
        /// Buyer country code.
        buyer: String,
        /// Sale date.
        date: NaiveDate,
    },

    /// A rate lookup named a jurisdiction with no registered policy.
    #[error("no VAT policy registered for country '{0}'")]
    UnregisteredJurisdiction(String),
}
