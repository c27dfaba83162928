pub mod account;
pub mod authorize;
pub mod movement;
pub mod product;
pub mod session;
