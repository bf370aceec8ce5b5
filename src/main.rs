// region:    --- Imports
use auction_registry::cli::{Session, SourceOpener};
use auction_registry::config::AppConfig;
use auction_registry::import::{HttpListingSource, ListingSource};
use auction_registry::store::{JsonFileStore, TableStore};
use auction_registry::{AuctionTable, ImportError};
use tokio::io::BufReader;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they stay out of the menu
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    let config = AppConfig::from_env()?;
    info!("{:<12} --> Config: {:?}", "Main", config);

    println!("Starting...");
    let store = JsonFileStore::new(&config.table_path);
    let table = match store.load().await {
        Ok(Some(table)) => {
            println!("Loading previous Auction Table...");
            table
        }
        Ok(None) => {
            println!("No previous auction table detected.");
            println!("Creating new table...");
            AuctionTable::new()
        }
        Err(e) => {
            error!("{:<12} --> Could not load snapshot: {}", "Main", e);
            println!("ERROR: Could not open existing auction table!");
            println!("Creating new table...");
            AuctionTable::new()
        }
    };

    let feed_timeout = config.feed_timeout;
    let open_source: SourceOpener = Box::new(
        move |url: &str| -> Result<Box<dyn ListingSource + Send + Sync>, ImportError> {
            Ok(Box::new(HttpListingSource::new(url, feed_timeout)?))
        },
    );

    let session = Session::new(
        table,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        open_source,
    );
    let table = session.run().await?;

    println!("Writing Auction Table to file...");
    match store.save(&table).await {
        Ok(()) => println!("Done!"),
        Err(e) => {
            error!("{:<12} --> Could not save snapshot: {}", "Main", e);
            println!("ERROR: Auction table couldn't be written to file.");
        }
    }

    println!("Goodbye.");
    Ok(())
}
// endregion: --- Main
