//! Per-jurisdiction VAT policies and the sale-resolution dispatcher.
//!
//! Every supported jurisdiction has one [`CountryPolicy`]. Resolution asks
//! the buyer's jurisdiction first; if that policy defers (or none is
//! registered), the seller's jurisdiction decides. The shared member-state
//! algorithm lives in [`standard_inbound`]/[`standard_outbound`]; countries
//! with territorial quirks override around it.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use grenzvat::core::*;
//! use grenzvat::rules::resolve_sale;
//!
//! let decision = resolve_sale(
//!     NaiveDate::from_ymd_opt(2015, 6, 1).unwrap(),
//!     ItemCategory::ElectronicService,
//!     &Party::business("DE"),
//!     &Party::business("FR"),
//!     None,
//! )
//! .unwrap();
//! assert_eq!(decision.action, ChargeAction::ReverseCharge);
//! ```

mod overrides;
mod policy;
mod registry;
mod standard;

pub use overrides::{
    FrenchUnionPolicy, MandatePolicy, OverseasZonePolicy, SpainPolicy, UkPolicy,
};
pub use policy::{CountryPolicy, Resolution};
pub use registry::{PolicyRegistry, default_registry, rate_for, resolve_sale};
pub use standard::{
    CategoryRates, DESTINATION_REGIME_DATE, MemberStatePolicy, standard_inbound,
    standard_outbound,
};
