// region:    --- Imports
use thiserror::Error;

// endregion: --- Imports

// region:    --- Auction Errors
/// Errors raised by auction and table operations
#[derive(Debug, Error)]
pub enum AuctionError {
    /// Bid placed on an auction with no time left
    #[error("auction {0} is closed")]
    ClosedAuction(String),

    /// Insert of an id that is already in the table
    #[error("auction {0} already exists")]
    DuplicateId(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Bulk import could not be fetched or parsed
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
}

pub type AuctionResult<T> = Result<T, AuctionError>;

// endregion: --- Auction Errors

// region:    --- Import Errors
/// Errors from the listing feed and row parsing
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not fetch listing feed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("listing feed answered with status {0}")]
    Status(u16),

    #[error("could not decode listing feed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Parallel listing columns do not line up
    #[error("column {column} has {found} entries, expected {expected}")]
    ColumnMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("invalid currency amount: {0:?}")]
    InvalidCurrency(String),

    #[error("invalid duration: {0:?}")]
    InvalidDuration(String),
}

// endregion: --- Import Errors

// region:    --- Store Errors
/// Errors from saving or restoring a table snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Snapshot decoded but does not form a valid table
    #[error("corrupt snapshot: {0}")]
    Corrupt(#[source] AuctionError),
}

// endregion: --- Store Errors

// region:    --- Config Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

// endregion: --- Config Errors
