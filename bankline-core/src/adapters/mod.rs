//! Adapter implementations
//!
//! Adapters implement the ports and talk to the outside world:
//! - reqwest HTTP client for the banking REST API
//! - JSON file and in-memory implementations of KeyValueStorage
//! - Mock banking server for tests

pub mod file_storage;
pub mod http;
pub mod memory_storage;

#[cfg(test)]
pub mod mock_server;
