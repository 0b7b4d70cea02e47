//! Error types for the cache library
//!
//! Provides unified error handling using thiserror.
//!
//! Cache operations themselves never fail: absence is reported through
//! `Option` and every mutation completes atomically under its lock. The only
//! fallible surface is construction with invalid parameters.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache library.
#[derive(Error, Debug)]
pub enum CacheError {
    /// LRU capacity must be greater than zero
    #[error("invalid capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),

    /// Partition count must be greater than zero
    #[error("invalid partition count: {0} (must be greater than zero)")]
    InvalidPartitionCount(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
