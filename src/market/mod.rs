//! Store-specific modules: session driver, extraction, and static site data.

pub mod browser;
pub mod models;
pub mod parser;
pub mod price;
pub mod queries;
pub mod selectors;
pub mod servers;

pub use browser::{StoreDriver, WebSession};
pub use models::{HistoryPoint, PriceStats, RawListing};
pub use parser::{PageListings, Parser};
pub use price::{parse_price_token, YANG_PER_WON};
