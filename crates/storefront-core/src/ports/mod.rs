//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod catalog;
mod forum;
mod notify;
mod session;

pub use catalog::ProductApi;
pub use forum::ForumApi;
pub use notify::{Confirmation, Confirmer, Notice, NoticeLevel, Notifier};
pub use session::{ADMIN_ROLE, ROLE_KEY, Session, SessionError, SessionStore, TOKEN_KEY};
