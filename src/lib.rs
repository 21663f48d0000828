//! # grenzvat
//!
//! Cross-border VAT rule resolution for digital and physical goods.
//!
//! Given a sale date, an item category, a buyer, and a seller, the engine
//! answers three questions: must VAT be charged, at what rate, and in which
//! jurisdiction's name is the charge recorded. The answer is a pure function
//! of its inputs plus a fixed rule table — no I/O, no hidden state, safe to
//! call from any number of threads.
//!
//! All rates use [`rust_decimal::Decimal`] — never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use grenzvat::core::*;
//! use grenzvat::rules::resolve_sale;
//! use rust_decimal_macros::dec;
//!
//! // French business sells an e-service to a German consumer in mid-2015:
//! // VAT is due at the German rate, recorded under DE.
//! let decision = resolve_sale(
//!     NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
//!     ItemCategory::ElectronicService,
//!     &Party::consumer("DE"),
//!     &Party::business("FR"),
//!     None,
//! )
//! .unwrap();
//!
//! assert_eq!(decision.action, ChargeAction::Charge);
//! assert_eq!(decision.rate, dec!(19));
//! assert_eq!(decision.country_code, "DE");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Parties, item categories, per-country policies, resolution |
//! | `lookup` | VAT-number format validation, VIES and HMRC registry clients |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod rules;

#[cfg(feature = "lookup")]
pub mod lookup;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
