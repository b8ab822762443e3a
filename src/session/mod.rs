//! Client-side session: credentials, cached user, durable record and cookie mirror.

pub mod cookie;
pub mod file_storage;
pub mod memory_storage;
pub mod storage;
pub mod store;

pub use cookie::{CookieMirror, CookiePolicy, MemoryCookieJar};
pub use storage::{SessionStorage, StorageError, create_storage};
pub use store::{AuthStatus, SessionState, SessionStore};
