//! Whole-table persistence.
// region:    --- Imports
use crate::auction::Auction;
use crate::error::{AuctionError, StoreError};
use crate::table::AuctionTable;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

// endregion: --- Imports

// region:    --- Snapshot
/// Serialized image of an entire table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub saved_at: DateTime<Utc>,
    pub auctions: Vec<Auction>,
}

impl TableSnapshot {
    pub fn capture(table: &AuctionTable) -> Self {
        Self {
            saved_at: Utc::now(),
            auctions: table.list_all().cloned().collect(),
        }
    }

    /// Rebuild the table.
    ///
    /// Repeated ids or a bid that is negative or not finite make the snapshot
    /// corrupt.
    pub fn restore(self) -> Result<AuctionTable, StoreError> {
        let mut table = AuctionTable::new();
        for auction in self.auctions {
            let bid = auction.current_bid();
            if !bid.is_finite() || bid < 0.0 {
                return Err(StoreError::Corrupt(AuctionError::InvalidArgument(format!(
                    "auction {} has bid {bid}",
                    auction.id()
                ))));
            }
            table
                .put(auction.id().to_string(), auction)
                .map_err(StoreError::Corrupt)?;
        }
        Ok(table)
    }
}

// endregion: --- Snapshot

// region:    --- Table Store Trait
/// Saves and restores a whole table
#[async_trait]
pub trait TableStore {
    /// `Ok(None)` when nothing has been saved yet
    async fn load(&self) -> Result<Option<AuctionTable>, StoreError>;

    async fn save(&self, table: &AuctionTable) -> Result<(), StoreError>;
}

/// Stores the table as a JSON snapshot file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl TableStore for JsonFileStore {
    async fn load(&self) -> Result<Option<AuctionTable>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{:<12} --> No snapshot at {}", "Store", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: TableSnapshot = serde_json::from_slice(&bytes)?;
        info!(
            "{:<12} --> Loaded {} auctions saved at {}",
            "Store",
            snapshot.auctions.len(),
            snapshot.saved_at
        );
        snapshot.restore().map(Some)
    }

    async fn save(&self, table: &AuctionTable) -> Result<(), StoreError> {
        let snapshot = TableSnapshot::capture(table);
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        // Write beside the target, then swap it in
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        info!(
            "{:<12} --> Saved {} auctions to {}",
            "Store",
            snapshot.auctions.len(),
            self.path.display()
        );
        Ok(())
    }
}

// endregion: --- Table Store Trait

// endregion: --- Tests
