// region:    --- Imports
use super::{ListingColumns, ListingRow, ListingSource};
use crate::error::ImportError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Feed Model
/// Remote listing document.
///
/// Mirrors the nesting `listing/{seller_info,auction_info,item_info}/...`.
/// Every leaf may be missing; a missing leaf contributes nothing to its column,
/// except the high bidder, which defaults to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingFeed {
    #[serde(default)]
    pub listing: Vec<FeedListing>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedListing {
    pub seller_info: SellerInfo,
    pub auction_info: AuctionInfo,
    pub item_info: ItemInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SellerInfo {
    pub seller_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionInfo {
    pub current_bid: Option<String>,
    pub time_left: Option<String>,
    pub id_num: Option<String>,
    pub high_bidder: HighBidder,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HighBidder {
    pub bidder_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemInfo {
    pub memory: Option<String>,
    pub hard_drive: Option<String>,
    pub cpu: Option<String>,
}

impl ListingFeed {
    /// Collect every leaf path into its own column
    pub fn columns(&self) -> ListingColumns {
        fn push(column: &mut Vec<String>, value: &Option<String>) {
            if let Some(value) = value {
                column.push(value.clone());
            }
        }

        let mut columns = ListingColumns::default();
        for listing in &self.listing {
            push(&mut columns.seller_names, &listing.seller_info.seller_name);
            push(&mut columns.current_bids, &listing.auction_info.current_bid);
            push(&mut columns.time_left, &listing.auction_info.time_left);
            push(&mut columns.ids, &listing.auction_info.id_num);
            // No high bidder just means no bids yet
            columns.buyer_names.push(
                listing
                    .auction_info
                    .high_bidder
                    .bidder_name
                    .clone()
                    .unwrap_or_default(),
            );
            push(&mut columns.memory, &listing.item_info.memory);
            push(&mut columns.hard_drive, &listing.item_info.hard_drive);
            push(&mut columns.cpu, &listing.item_info.cpu);
        }
        columns
    }

    pub fn into_rows(self) -> Result<Vec<ListingRow>, ImportError> {
        self.columns().into_rows()
    }
}

// endregion: --- Feed Model

// region:    --- Http Listing Source
/// Fetches a [`ListingFeed`] document over HTTP
pub struct HttpListingSource {
    client: reqwest::Client,
    url: String,
}

impl HttpListingSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ImportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch_rows(&self) -> Result<Vec<ListingRow>, ImportError> {
        info!("{:<12} --> Fetching listing feed: {}", "Feed", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("{:<12} --> Received {} bytes", "Feed", body.len());

        let feed: ListingFeed = serde_json::from_str(&body)?;
        feed.into_rows()
    }
}

// endregion: --- Http Listing Source

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "listing": [
            {
                "seller_info": { "seller_name": "cubsfantony" },
                "auction_info": {
                    "current_bid": "$620.00",
                    "time_left": "4 days 17 hours",
                    "id_num": "8311621",
                    "high_bidder": { "bidder_name": "gosha555@excite.com" }
                },
                "item_info": { "memory": "256MB", "hard_drive": "30 GB", "cpu": "Intel Pentium 4 1.8 GHz" }
            },
            {
                "seller_info": { "seller_name": "ct-inc" },
                "auction_info": {
                    "current_bid": "$1,250.00",
                    "time_left": "1 days 3 hours",
                    "id_num": "8311622",
                    "high_bidder": { "bidder_name": "" }
                },
                "item_info": { "memory": "512MB", "hard_drive": "80 GB", "cpu": "AMD Athlon" }
            }
        ]
    }"#;

    #[test]
    fn feed_decodes_into_rows() {
        let feed: ListingFeed = serde_json::from_str(FEED).unwrap();
        let rows = feed.into_rows().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "8311621");
        assert_eq!(rows[0].seller_name, "cubsfantony");
        assert_eq!(rows[0].buyer_name, "gosha555@excite.com");
        assert_eq!(rows[0].time_left, "4 days 17 hours");
        assert_eq!(
            rows[0].item_fields,
            vec!["Intel Pentium 4 1.8 GHz", "256MB", "30 GB"]
        );
        assert_eq!(rows[1].current_bid, "$1,250.00");
    }

    #[test]
    fn missing_leaf_misaligns_columns() {
        let feed: ListingFeed = serde_json::from_str(
            r#"{ "listing": [
                { "seller_info": { "seller_name": "a" },
                  "auction_info": { "current_bid": "$1", "time_left": "1 hours", "id_num": "1",
                                    "high_bidder": { "bidder_name": "b" } },
                  "item_info": { "memory": "1GB", "cpu": "x" } }
            ] }"#,
        )
        .unwrap();

        let err = feed.into_rows().unwrap_err();
        assert!(matches!(
            err,
            ImportError::ColumnMismatch {
                column: "hard_drive",
                ..
            }
        ));
    }

    #[test]
    fn empty_document_has_no_listings() {
        let feed: ListingFeed = serde_json::from_str("{}").unwrap();
        assert!(feed.into_rows().unwrap().is_empty());
    }

    #[test]
    fn listing_without_bidder_has_empty_buyer() {
        let feed: ListingFeed = serde_json::from_str(
            r#"{ "listing": [
                { "seller_info": { "seller_name": "a" },
                  "auction_info": { "current_bid": "$1", "time_left": "1 hours", "id_num": "1",
                                    "high_bidder": { "bidder_name": "b" } },
                  "item_info": { "memory": "1GB", "hard_drive": "20GB", "cpu": "x" } },
                { "seller_info": { "seller_name": "c" },
                  "auction_info": { "current_bid": "$2", "time_left": "2 hours", "id_num": "2" },
                  "item_info": { "memory": "2GB", "hard_drive": "40GB", "cpu": "y" } }
            ] }"#,
        )
        .unwrap();

        let rows = feed.into_rows().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].buyer_name, "b");
        assert_eq!(rows[1].id, "2");
        assert_eq!(rows[1].buyer_name, "");
    }

    #[tokio::test]
    async fn malformed_url_is_a_fetch_error() {
        let source = HttpListingSource::new("not a url", Duration::from_secs(2)).unwrap();
        let err = source.fetch_rows().await.unwrap_err();
        assert!(matches!(err, ImportError::Fetch(_)));
    }
}
// endregion: --- Tests
