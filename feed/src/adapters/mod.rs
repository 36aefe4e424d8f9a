//! Adapters layer
//!
//! Implementations of port traits for concrete environments.

pub mod file;
pub mod http;
pub mod storage;

pub use file::FilePostSource;
pub use http::HttpPostSource;
pub use storage::MemoryStorage;
