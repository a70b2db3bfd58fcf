//! CSS selectors and locator strings for the store page.
//!
//! This file contains everything we know about the store's HTML structure.
//! Update this file when the site changes its markup.
//!
//! **Update process**: when extraction starts returning empty pages, capture
//! the page source, adjust the selectors, and add a test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors applied to page-source snapshots during row extraction.
pub mod store {
    use super::*;

    /// One listing row in the results table.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody tr").unwrap());

    /// Cells within a row. Layout: [expand, info, quantity, yang, won, seller].
    pub static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

    /// Item name container inside the info cell. May embed affix spans.
    pub static NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div[class*='font-medium']").unwrap());

    /// Standard bonus container inside the info cell.
    pub static BONUS: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("div[class*='text-xs'][class*='text-gray-400']").unwrap()
    });

    /// Bonus / affix text spans inside either container.
    pub static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

    /// Empty-results indicator rendered inside the table body.
    pub static NO_DATA_TEXT: &str = "No data available in table";
}

/// Locator strings used against the live WebDriver session.
pub mod ui {
    /// Search input above the results table.
    pub static SEARCH_INPUT: &str = "#item-search-input";

    /// Realm selector. The page has a single `<select>`.
    pub static SERVER_SELECT: &str = "select";

    /// Next-page control; the pager renders it as a bare ">" button.
    pub static NEXT_BUTTON: &str = "//button[normalize-space(text())='>']";
}
