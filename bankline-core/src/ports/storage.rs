//! Durable key-value storage port
//!
//! The session survives restarts by mirroring the token and user record into
//! a small string-keyed store. Access is synchronous.

use crate::domain::result::Result;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized user record
pub const USER_KEY: &str = "user";

/// String key-value storage trait
///
/// Implementations must be safe to share between the HTTP client (which
/// reads the token) and the session (which writes it).
pub trait KeyValueStorage: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
