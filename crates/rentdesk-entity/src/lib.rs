//! # rentdesk-entity
//!
//! Domain entity models for RentDesk. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.
//!
//! The [`ownership`] module defines the vocabulary the company isolation
//! guard is built on: which tables are company-scoped, which columns may be
//! filtered, and how new rows are inserted without ever accepting a
//! caller-supplied `company_id`.

pub mod company;
pub mod contract;
pub mod landlord;
pub mod lead;
pub mod ownership;
pub mod session;
pub mod tenant;
pub mod ticket;
pub mod unit;
pub mod user;

pub use ownership::{CompanyOwned, EntityKind, ScopedNew};
