pub mod account;
pub mod health;
pub mod movement;
pub mod product;
pub mod session;
