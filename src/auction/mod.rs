pub mod model;

pub use model::{Auction, AuctionStatus, TABLE_HEADER, TABLE_SEPARATOR};
