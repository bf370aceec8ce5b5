pub mod auction;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod store;
pub mod table;

pub use auction::{Auction, AuctionStatus};
pub use error::{AuctionError, AuctionResult, ImportError, StoreError};
pub use table::AuctionTable;
