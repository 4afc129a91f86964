//! User entity, account status, and the resolved request identity.

pub mod identity;
pub mod model;
pub mod status;

pub use identity::Identity;
pub use model::User;
pub use status::UserStatus;
