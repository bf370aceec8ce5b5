//! Bulk import of listings from an external feed.
//!
//! A [`ListingSource`] produces raw [`ListingRow`]s; the table turns them into
//! auctions with [`AuctionTable::build_from_import`].
// region:    --- Imports
use crate::error::{AuctionResult, ImportError};
use crate::table::AuctionTable;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Modules
pub mod feed;
pub mod parse;

pub use feed::{HttpListingSource, ListingFeed};

// endregion: --- Modules

// region:    --- Listing Rows
/// One listing as it arrives from a feed, before any parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRow {
    pub id: String,
    pub seller_name: String,
    pub buyer_name: String,
    /// Amount text, e.g. `"$1,250.00"`
    pub current_bid: String,
    /// Remaining time text, e.g. `"1 days 3 hours"`
    pub time_left: String,
    /// Item attributes joined into the auction description
    pub item_fields: Vec<String>,
}

/// Listing fields as parallel columns, aligned by position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingColumns {
    pub seller_names: Vec<String>,
    pub current_bids: Vec<String>,
    pub time_left: Vec<String>,
    pub ids: Vec<String>,
    pub buyer_names: Vec<String>,
    pub memory: Vec<String>,
    pub hard_drive: Vec<String>,
    pub cpu: Vec<String>,
}

impl ListingColumns {
    /// Zip the columns into rows.
    ///
    /// Every column must have as many entries as `seller_names`.
    pub fn into_rows(self) -> Result<Vec<ListingRow>, ImportError> {
        let expected = self.seller_names.len();
        let lengths = [
            ("current_bid", self.current_bids.len()),
            ("time_left", self.time_left.len()),
            ("id_num", self.ids.len()),
            ("bidder_name", self.buyer_names.len()),
            ("memory", self.memory.len()),
            ("hard_drive", self.hard_drive.len()),
            ("cpu", self.cpu.len()),
        ];
        if let Some(&(column, found)) = lengths.iter().find(|(_, len)| *len != expected) {
            return Err(ImportError::ColumnMismatch {
                column,
                expected,
                found,
            });
        }

        let rows = self
            .seller_names
            .into_iter()
            .zip(self.current_bids)
            .zip(self.time_left)
            .zip(self.ids)
            .zip(self.buyer_names)
            .zip(self.cpu)
            .zip(self.memory)
            .zip(self.hard_drive)
            .map(
                |(((((((seller_name, current_bid), time_left), id), buyer_name), cpu), memory), hard_drive)| {
                    ListingRow {
                        id,
                        seller_name,
                        buyer_name,
                        current_bid,
                        time_left,
                        item_fields: vec![cpu, memory, hard_drive],
                    }
                },
            )
            .collect();
        Ok(rows)
    }
}

// endregion: --- Listing Rows

// region:    --- Listing Source
/// Anything that can hand over listing rows for an import
#[async_trait]
pub trait ListingSource {
    async fn fetch_rows(&self) -> Result<Vec<ListingRow>, ImportError>;
}

/// Fetch rows from `source` and build a new table from them.
///
/// The caller's current table is not touched; on error it should simply be
/// kept.
pub async fn import_table<S>(source: &S) -> AuctionResult<AuctionTable>
where
    S: ListingSource + Sync + ?Sized,
{
    let rows = source.fetch_rows().await.map_err(|e| {
        warn!("{:<12} --> Listing fetch failed: {}", "Import", e);
        e
    })?;
    info!("{:<12} --> Fetched {} listing rows", "Import", rows.len());

    let table = AuctionTable::build_from_import(rows)?;
    info!("{:<12} --> Built table with {} auctions", "Import", table.len());
    Ok(table)
}

// endregion: --- Listing Source

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    fn column(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn two_listings() -> ListingColumns {
        ListingColumns {
            seller_names: column(&["alice", "bob"]),
            current_bids: column(&["$10.00", "$1,250.00"]),
            time_left: column(&["2 hours", "1 days 3 hours"]),
            ids: column(&["100", "200"]),
            buyer_names: column(&["", "carl"]),
            memory: column(&["4GB", "16GB"]),
            hard_drive: column(&["500GB", "1TB"]),
            cpu: column(&["Pentium", "Core i7"]),
        }
    }

    #[test]
    fn columns_zip_into_rows_in_order() {
        let rows = two_listings().into_rows().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, "200");
        assert_eq!(rows[1].seller_name, "bob");
        assert_eq!(rows[1].buyer_name, "carl");
        assert_eq!(rows[1].current_bid, "$1,250.00");
        assert_eq!(rows[1].time_left, "1 days 3 hours");
        assert_eq!(rows[1].item_fields, vec!["Core i7", "16GB", "1TB"]);
    }

    #[test]
    fn short_column_is_a_mismatch() {
        let mut columns = two_listings();
        columns.hard_drive.pop();

        let err = columns.into_rows().unwrap_err();
        assert!(matches!(
            err,
            ImportError::ColumnMismatch {
                column: "hard_drive",
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn empty_columns_give_no_rows() {
        assert!(ListingColumns::default().into_rows().unwrap().is_empty());
    }
}
// endregion: --- Tests
