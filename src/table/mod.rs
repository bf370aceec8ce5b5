//! Keyed collection of auctions: lookup, unique insert, time passage,
//! expiry cleanup and construction from imported listing rows.

// region:    --- Imports
use crate::auction::Auction;
use crate::error::{AuctionError, AuctionResult};
use crate::import::parse::{parse_currency, parse_duration_hours};
use crate::import::ListingRow;
use std::collections::BTreeMap;

// endregion: --- Imports

/// Separator between item attributes in an imported description
pub const ITEM_INFO_SEPARATOR: &str = " - ";

// region:    --- Auction Table
/// Auctions keyed by id, iterated in id order.
///
/// Every key equals the id of the auction stored under it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuctionTable {
    auctions: BTreeMap<String, Auction>,
}

impl AuctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh table from imported rows.
    ///
    /// Fails on the first row that cannot be parsed or whose id was already
    /// seen in the same import.
    pub fn build_from_import<I>(rows: I) -> AuctionResult<Self>
    where
        I: IntoIterator<Item = ListingRow>,
    {
        let mut table = Self::new();
        for row in rows {
            let auction = auction_from_row(row)?;
            table.put(auction.id().to_string(), auction)?;
        }
        Ok(table)
    }

    /// Insert a new auction under `id`
    pub fn put(&mut self, id: impl Into<String>, auction: Auction) -> AuctionResult<()> {
        let id = id.into();
        if id != auction.id() {
            return Err(AuctionError::InvalidArgument(format!(
                "key {id} does not match auction id {}",
                auction.id()
            )));
        }
        if self.auctions.contains_key(&id) {
            return Err(AuctionError::DuplicateId(id));
        }
        self.auctions.insert(id, auction);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Auction> {
        self.auctions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Auction> {
        self.auctions.get_mut(id)
    }

    /// Bid on the auction stored under `id`; `Ok(None)` when there is none
    pub fn place_bid(&mut self, id: &str, bidder_name: &str, amount: f64) -> AuctionResult<Option<bool>> {
        match self.auctions.get_mut(id) {
            Some(auction) => auction.place_bid(bidder_name, amount).map(Some),
            None => Ok(None),
        }
    }

    /// Let `hours` pass for every auction.
    ///
    /// Negative amounts are rejected before any auction is touched.
    pub fn advance_time(&mut self, hours: i64) -> AuctionResult<()> {
        if hours < 0 {
            return Err(AuctionError::InvalidArgument(format!(
                "cannot advance time by {hours} hours"
            )));
        }
        let hours = u32::try_from(hours).unwrap_or(u32::MAX);
        for auction in self.auctions.values_mut() {
            auction.decrement_time(hours);
        }
        Ok(())
    }

    /// Drop every closed auction and return the removed ids in order
    pub fn remove_expired(&mut self) -> Vec<String> {
        let expired: Vec<String> = self
            .auctions
            .values()
            .filter(|auction| !auction.is_open())
            .map(|auction| auction.id().to_string())
            .collect();
        for id in &expired {
            self.auctions.remove(id);
        }
        expired
    }

    pub fn list_all(&self) -> impl Iterator<Item = &Auction> + '_ {
        self.auctions.values()
    }

    pub fn len(&self) -> usize {
        self.auctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auctions.is_empty()
    }
}

fn auction_from_row(row: ListingRow) -> AuctionResult<Auction> {
    let current_bid = parse_currency(&row.current_bid)?;
    let time_remaining = parse_duration_hours(&row.time_left)?;
    let item_info = row
        .item_fields
        .iter()
        .map(|field| field.trim())
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join(ITEM_INFO_SEPARATOR);

    Ok(Auction::new(
        row.id,
        time_remaining,
        current_bid,
        row.seller_name,
        row.buyer_name,
        item_info,
    ))
}

// endregion: --- Auction Table

// endregion: --- Tests
