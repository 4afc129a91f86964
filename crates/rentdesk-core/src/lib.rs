//! # rentdesk-core
//!
//! Core crate for RentDesk. Contains configuration schemas, shared
//! pagination/filter types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other RentDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
