//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. Stores and
//! services depend only on these traits, not on concrete implementations.

mod events;
mod storage;

pub use events::BalanceListener;
pub use storage::{KeyValueStorage, TOKEN_KEY, USER_KEY};
