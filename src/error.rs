//! Errors for map construction and growth.
//!
//! A missing key is not an error: lookups return `Option`, removals
//! return `bool`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// A map needs at least one slot.
    #[error("initial capacity must be greater than zero")]
    ZeroCapacity,

    /// Critical load factor outside the open interval (0, 1).
    #[error("critical load factor must be in (0, 1), got {factor}")]
    InvalidLoadFactor {
        /// The rejected factor, formatted.
        factor: String,
    },

    /// Growth factor below 2.
    #[error("growth factor must be at least 2, got {factor}")]
    InvalidGrowthFactor { factor: usize },

    /// Memory for the slot array or a key copy could not be obtained,
    /// or the requested capacity does not fit in `usize`. The map is
    /// left exactly as it was.
    #[error("allocation failed: requested {requested} slots or bytes")]
    AllocationFailure { requested: usize },

    /// No empty slot was available for a placement.
    #[error("no empty slot among {capacity} slots")]
    TableFull { capacity: usize },
}

pub type Result<T> = core::result::Result<T, MapError>;
