//! # rentdesk-service
//!
//! Thin application services composing the session store and the company
//! isolation guard. Transport concerns (HTTP, rendering) live elsewhere.

pub mod session;
pub mod ticket;

pub use session::SessionOverviewService;
pub use ticket::TicketService;
