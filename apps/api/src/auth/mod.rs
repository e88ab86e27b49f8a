// Session and authentication: provider strategies, the persisted session,
// and the role guard applied to screens and API groups.

pub mod guard;
pub mod handlers;
pub mod hosted;
pub mod mock;
pub mod provider;
pub mod session;
pub mod storage;

pub use provider::{AuthError, AuthProvider};
pub use session::SessionStore;
