//! Domain types shared across Stockroom services.
//!
//! This crate contains only pure types and the stock-ledger rules, with no framework
//! dependencies. Import in `usecase/` and `domain/` layers; `infra/` converts to and
//! from the stored string forms.

pub mod account;
pub mod location;
pub mod movement;
pub mod stock;
pub mod validation;
