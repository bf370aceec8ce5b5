// region:    --- Imports
use crate::error::{AuctionError, AuctionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// endregion: --- Imports

/// Column header matching the `Display` layout of [`Auction`]
pub const TABLE_HEADER: &str = " Auction ID |      Bid   |        Seller         |          Buyer          |    Time   |  Item Info";

/// Separator printed under [`TABLE_HEADER`]
pub const TABLE_SEPARATOR: &str = "===============================================================================================================================";

/// Longest item description shown in a listing line
const ITEM_INFO_WIDTH: usize = 43;

// region:    --- Auction Status
/// Whether an auction still takes bids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionStatus {
    Open,
    Closed,
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuctionStatus::Open => f.write_str("OPEN"),
            AuctionStatus::Closed => f.write_str("CLOSED"),
        }
    }
}

// endregion: --- Auction Status

// region:    --- Auction
/// A single listing and its bidding state.
///
/// `time_remaining` counts whole hours; zero means the auction is closed.
/// `buyer_name` is empty until the first accepted bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    id: String,
    time_remaining: u32,
    current_bid: f64,
    seller_name: String,
    buyer_name: String,
    item_info: String,
}

impl Auction {
    /// Build an auction as given.
    ///
    /// `current_bid` is not checked here; callers pass a finite, non-negative
    /// amount. Imported amounts are checked by the import parser and restored
    /// ones by the snapshot loader.
    pub fn new(
        id: impl Into<String>,
        time_remaining: u32,
        current_bid: f64,
        seller_name: impl Into<String>,
        buyer_name: impl Into<String>,
        item_info: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            time_remaining,
            current_bid,
            seller_name: seller_name.into(),
            buyer_name: buyer_name.into(),
            item_info: item_info.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn current_bid(&self) -> f64 {
        self.current_bid
    }

    pub fn seller_name(&self) -> &str {
        &self.seller_name
    }

    pub fn buyer_name(&self) -> &str {
        &self.buyer_name
    }

    pub fn item_info(&self) -> &str {
        &self.item_info
    }

    pub fn is_open(&self) -> bool {
        self.time_remaining > 0
    }

    pub fn status(&self) -> AuctionStatus {
        if self.is_open() {
            AuctionStatus::Open
        } else {
            AuctionStatus::Closed
        }
    }

    /// Let `hours` pass, stopping at zero
    pub fn decrement_time(&mut self, hours: u32) {
        self.time_remaining = self.time_remaining.saturating_sub(hours);
    }

    /// Place a bid.
    ///
    /// Returns `Ok(true)` when `amount` beats the current bid and `Ok(false)`
    /// when it does not. Bidding on a closed auction is an error rather than a
    /// rejected bid.
    pub fn place_bid(&mut self, bidder_name: &str, amount: f64) -> AuctionResult<bool> {
        if !self.is_open() {
            return Err(AuctionError::ClosedAuction(self.id.clone()));
        }
        if amount > self.current_bid {
            self.buyer_name = bidder_name.to_string();
            self.current_bid = amount;
            return Ok(true);
        }
        Ok(false)
    }
}

impl fmt::Display for Auction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>11} | $ {:>8.2} | {:<21} |  {:<21}  |{:>4} hours | {:.width$}",
            self.id,
            self.current_bid,
            self.seller_name,
            self.buyer_name,
            self.time_remaining,
            self.item_info,
            width = ITEM_INFO_WIDTH
        )
    }
}

// endregion: --- Auction

// endregion: --- Tests
