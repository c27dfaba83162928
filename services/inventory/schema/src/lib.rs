//! sea-orm entities for the inventory service.

pub mod account_details;
pub mod accounts;
pub mod movements;
pub mod products;
