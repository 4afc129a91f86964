//! # rentdesk-auth
//!
//! Session lifecycle management for RentDesk.
//!
//! ## Modules
//!
//! - `token`: opaque bearer token minting
//! - `session`: store trait, Postgres and in-memory backends, the
//!   lifecycle manager (issue / validate / revoke), and the expiry sweeper
//! - `directory`: identity snapshot lookup for validated sessions

pub mod directory;
pub mod session;
pub mod token;

pub use directory::{MemoryUserDirectory, UserDirectory};
pub use session::{MemorySessionStore, PgSessionStore, SessionManager, SessionStore, SessionSweeper};
