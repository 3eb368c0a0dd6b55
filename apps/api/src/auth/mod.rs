// Accounts: signup, login and bearer-token sessions.
// The recommend and history routes stay public; only logout needs a token.

pub mod handlers;
pub mod password;
pub mod store;

pub use store::{AccountStore, MemoryAccountStore, PgAccountStore};
