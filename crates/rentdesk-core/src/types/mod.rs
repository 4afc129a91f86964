//! Shared types used across RentDesk crates.

pub mod filter;
pub mod pagination;
