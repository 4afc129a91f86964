//! Session lifecycle: issuance, validation, revocation, and sweeping.

pub mod manager;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod sweeper;

pub use manager::SessionManager;
pub use memory::MemorySessionStore;
pub use postgres::PgSessionStore;
pub use store::SessionStore;
pub use sweeper::SessionSweeper;
