//! Configuration: versioned YAML document plus environment overrides.

pub mod logging;
pub mod storage;
pub mod types;

pub use logging::*;
pub use storage::*;
pub use types::*;
