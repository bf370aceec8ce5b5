//! Menu-driven session over an [`AuctionTable`].
//!
//! Input is read line by line from any async reader and prompts go to any
//! `Write` sink, so a whole session can be scripted.
// region:    --- Imports
use crate::auction::{Auction, TABLE_HEADER, TABLE_SEPARATOR};
use crate::error::{AuctionError, ImportError};
use crate::import::{import_table, ListingSource};
use crate::table::AuctionTable;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, info, warn};

// endregion: --- Imports

/// Opens a listing source for the URL typed by the user
pub type SourceOpener =
    Box<dyn Fn(&str) -> Result<Box<dyn ListingSource + Send + Sync>, ImportError> + Send + Sync>;

const MENU: &str = "Menu:
    (D) - Import Data from URL
    (A) - Create a New Auction
    (B) - Bid on an Item
    (I) - Get Info on Auction
    (P) - Print All Auctions
    (R) - Remove Expired Auctions
    (T) - Let Time Pass
    (Q) - Quit";

// region:    --- Menu Command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Import,
    Create,
    Bid,
    Info,
    Print,
    RemoveExpired,
    PassTime,
    Quit,
}

impl MenuCommand {
    /// Parse a menu letter, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_uppercase().as_str() {
            "D" => Some(Self::Import),
            "A" => Some(Self::Create),
            "B" => Some(Self::Bid),
            "I" => Some(Self::Info),
            "P" => Some(Self::Print),
            "R" => Some(Self::RemoveExpired),
            "T" => Some(Self::PassTime),
            "Q" => Some(Self::Quit),
            _ => None,
        }
    }
}

// endregion: --- Menu Command

// region:    --- Session
pub struct Session<R, W> {
    username: String,
    table: AuctionTable,
    input: Lines<R>,
    output: W,
    open_source: SourceOpener,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(table: AuctionTable, input: R, output: W, open_source: SourceOpener) -> Self {
        Self {
            username: String::new(),
            table,
            input: input.lines(),
            output,
            open_source,
        }
    }

    /// Ask for a username, then serve menu commands until quit or end of
    /// input. Returns the table as it stands at the end of the session.
    pub async fn run(mut self) -> io::Result<AuctionTable> {
        let Some(username) = self.prompt("\nPlease select a username: ").await? else {
            return Ok(self.table);
        };
        self.username = username.trim().to_string();
        info!("{:<12} --> Session started for {}", "Session", self.username);

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{MENU}")?;

            let Some(line) = self.read_line().await? else {
                break;
            };
            writeln!(self.output)?;

            let Some(command) = MenuCommand::parse(&line) else {
                writeln!(self.output, "ERROR: Invalid input.")?;
                continue;
            };
            debug!("{:<12} --> Command {:?}", "Session", command);

            let keep_going = match command {
                MenuCommand::Import => self.import().await?,
                MenuCommand::Create => self.create().await?,
                MenuCommand::Bid => self.bid().await?,
                MenuCommand::Info => self.info().await?,
                MenuCommand::Print => self.print()?,
                MenuCommand::RemoveExpired => self.remove_expired()?,
                MenuCommand::PassTime => self.pass_time().await?,
                MenuCommand::Quit => false,
            };
            if !keep_going {
                break;
            }
        }

        info!("{:<12} --> Session ended", "Session");
        Ok(self.table)
    }

    // Each handler returns Ok(false) once input is exhausted.

    async fn import(&mut self) -> io::Result<bool> {
        let Some(url) = self.prompt("Please enter a URL: ").await? else {
            return Ok(false);
        };
        writeln!(self.output, "Loading...")?;

        let result = match (self.open_source)(url.trim()) {
            Ok(source) => import_table(&*source).await,
            Err(e) => Err(AuctionError::Import(e)),
        };
        match result {
            Ok(table) => {
                self.table = table;
                writeln!(self.output, "Auction data loaded successfully!")?;
            }
            Err(e) => {
                warn!("{:<12} --> Import from {} failed: {}", "Session", url.trim(), e);
                writeln!(self.output, "ERROR: Could not load auction data: {e}")?;
            }
        }
        Ok(true)
    }

    async fn create(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Creating new Auction as {}.", self.username)?;
        let Some(id) = self.prompt("Please enter an Auction ID: ").await? else {
            return Ok(false);
        };
        let id = id.trim().to_string();
        let Some(hours) = self.prompt("Please enter an Auction time (hours): ").await? else {
            return Ok(false);
        };
        let Ok(hours) = hours.trim().parse::<u32>() else {
            writeln!(self.output, "ERROR: Invalid time!")?;
            return Ok(true);
        };
        let Some(info) = self.prompt("Please enter some item info: ").await? else {
            return Ok(false);
        };

        let auction = Auction::new(id.clone(), hours, 0.0, self.username.clone(), "", info.trim());
        match self.table.put(id.clone(), auction) {
            Ok(()) => writeln!(self.output, "Auction {id} inserted into table.")?,
            Err(AuctionError::DuplicateId(_)) => {
                writeln!(self.output, "ERROR: Auction {id} already exists.")?
            }
            Err(e) => writeln!(self.output, "ERROR: {e}")?,
        }
        Ok(true)
    }

    async fn bid(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt("Please enter an Auction ID: ").await? else {
            return Ok(false);
        };
        let id = id.trim().to_string();

        let Some(auction) = self.table.get(&id) else {
            writeln!(self.output, "ERROR: Auction {id} does not exist!")?;
            return Ok(true);
        };
        writeln!(self.output, "Auction {} is {}", auction.id(), auction.status())?;
        writeln!(self.output, "    Current Bid: $ {:.2}\n", auction.current_bid())?;
        if !auction.is_open() {
            writeln!(self.output, "You can no longer bid on this item.")?;
            return Ok(true);
        }

        let Some(amount) = self.prompt("What would you like to bid?: ").await? else {
            return Ok(false);
        };
        let amount = match amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => amount,
            _ => {
                writeln!(self.output, "ERROR: Invalid bid!")?;
                return Ok(true);
            }
        };

        let username = self.username.clone();
        match self.table.place_bid(&id, &username, amount) {
            Ok(Some(true)) => writeln!(self.output, "Bid accepted.")?,
            Ok(Some(false)) => writeln!(self.output, "Bid was not accepted.")?,
            Ok(None) => writeln!(self.output, "ERROR: Auction {id} does not exist!")?,
            Err(AuctionError::ClosedAuction(_)) => writeln!(self.output, "ERROR: Auction is closed!")?,
            Err(e) => writeln!(self.output, "ERROR: {e}")?,
        }
        Ok(true)
    }

    async fn info(&mut self) -> io::Result<bool> {
        let Some(id) = self.prompt("Please enter an Auction ID: ").await? else {
            return Ok(false);
        };
        let id = id.trim();

        match self.table.get(id) {
            Some(auction) => {
                writeln!(self.output, "    Seller: {}", auction.seller_name())?;
                writeln!(self.output, "    Buyer: {}", auction.buyer_name())?;
                writeln!(self.output, "    Time: {} hours", auction.time_remaining())?;
                writeln!(self.output, "    Info: {}", auction.item_info())?;
            }
            None => writeln!(self.output, "Auction {id} does not exist!")?,
        }
        Ok(true)
    }

    fn print(&mut self) -> io::Result<bool> {
        writeln!(self.output, "{TABLE_HEADER}")?;
        writeln!(self.output, "{TABLE_SEPARATOR}")?;
        for auction in self.table.list_all() {
            writeln!(self.output, "{auction}")?;
        }
        Ok(true)
    }

    fn remove_expired(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Removing expired auctions...")?;
        let removed = self.table.remove_expired();
        info!("{:<12} --> Removed {} expired auctions", "Session", removed.len());
        writeln!(self.output, "All expired auctions removed.")?;
        Ok(true)
    }

    async fn pass_time(&mut self) -> io::Result<bool> {
        let Some(hours) = self.prompt("How many hours should pass: ").await? else {
            return Ok(false);
        };
        let Ok(hours) = hours.trim().parse::<i64>() else {
            writeln!(self.output, "ERROR: Invalid time!")?;
            return Ok(true);
        };

        match self.table.advance_time(hours) {
            Ok(()) => {
                writeln!(self.output, "Time passing...")?;
                writeln!(self.output, "Auction times updated.")?;
            }
            Err(AuctionError::InvalidArgument(_)) => {
                writeln!(self.output, "ERROR: Cannot be a negative time!")?
            }
            Err(e) => writeln!(self.output, "ERROR: {e}")?,
        }
        Ok(true)
    }

    async fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line().await
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.input.next_line().await
    }
}

// endregion: --- Session

// endregion: --- Tests
