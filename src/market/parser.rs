//! HTML extraction of listing rows from store page snapshots.

use crate::market::models::RawListing;
use crate::market::price::parse_price_token;
use crate::market::selectors::store;
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Sentinel seller name when the seller cell is missing.
const UNKNOWN_SELLER: &str = "Unknown";

/// Extraction result for one page snapshot.
#[derive(Debug, Default)]
pub struct PageListings {
    /// Explicit empty-results indicator was present
    pub no_data: bool,
    /// Rows seen in the table, including ones that failed extraction
    pub rows_seen: usize,
    pub listings: Vec<RawListing>,
}

impl PageListings {
    /// True when pagination should stop on this page.
    pub fn is_end(&self) -> bool {
        self.no_data || self.rows_seen == 0
    }
}

/// Parser for store results pages.
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parses one page snapshot into listing records.
    ///
    /// A row that cannot be extracted is dropped; it never aborts the rest of
    /// the page.
    pub fn parse_page(&self, html: &str) -> PageListings {
        if html.contains(store::NO_DATA_TEXT) {
            debug!("No-data indicator present");
            return PageListings { no_data: true, ..Default::default() };
        }

        let document = Html::parse_document(html);
        let mut page = PageListings::default();

        for row in document.select(&store::ROW) {
            page.rows_seen += 1;
            match self.parse_row(row) {
                Some(listing) => {
                    trace!("Parsed listing: {} x{}", listing.item_name, listing.quantity);
                    page.listings.push(listing);
                }
                None => trace!("Skipping malformed row"),
            }
        }

        debug!("Parsed {} listings from {} rows", page.listings.len(), page.rows_seen);
        page
    }

    /// Parses a single table row. Cell layout:
    /// [expand, info, quantity, yang, won, seller].
    fn parse_row(&self, row: ElementRef) -> Option<RawListing> {
        let cells: Vec<ElementRef> = row.select(&store::CELL).collect();
        if cells.len() < 5 {
            return None;
        }

        let info = cells[1];
        let (item_name, special_bonuses) = self.parse_name(info);
        if item_name.is_empty() {
            return None;
        }

        // Special (embedded-in-name) bonuses first, standard second,
        // each preserving source order.
        let mut bonuses = special_bonuses;
        if let Some(bonus_div) = info.select(&store::BONUS).next() {
            bonuses.extend(
                bonus_div
                    .select(&store::SPAN)
                    .map(|s| clean_text(s))
                    .filter(|t| !t.is_empty()),
            );
        }

        let quantity = parse_price_token(&clean_text(cells[2]));
        let yang = parse_price_token(&clean_text(cells[3]));
        let won = parse_price_token(&clean_text(cells[4]));
        let seller = cells
            .get(5)
            .map(|c| clean_text(*c))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_SELLER.to_string());

        Some(RawListing::new(item_name, seller, quantity, yang, won, bonuses))
    }

    /// Splits the info cell into the plain item name and its embedded affix
    /// spans, without mutating the tree: span texts are collected first, then
    /// the name is computed from the remaining text nodes.
    fn parse_name(&self, info: ElementRef) -> (String, Vec<String>) {
        match info.select(&store::NAME).next() {
            Some(name_div) => {
                let spans: Vec<String> = name_div
                    .select(&store::SPAN)
                    .map(|s| clean_text(s))
                    .filter(|t| !t.is_empty())
                    .collect();
                (text_without_spans(name_div), spans)
            }
            None => (clean_text(info), Vec::new()),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects an element's text with whitespace collapsed.
fn clean_text(element: ElementRef) -> String {
    element.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collects descendant text while skipping everything inside `<span>` subtrees.
fn text_without_spans(element: ElementRef) -> String {
    let mut out = String::new();
    collect_non_span_text(element, &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_non_span_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(el) = ElementRef::wrap(child) {
            if el.value().name() != "span" {
                collect_non_span_text(el, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_html(info: &str, quantity: &str, yang: &str, won: &str, seller: &str) -> String {
        format!(
            r#"<table><tbody><tr>
                <td></td>
                <td>{info}</td>
                <td>{quantity}</td>
                <td>{yang}</td>
                <td>{won}</td>
                <td>{seller}</td>
            </tr></tbody></table>"#
        )
    }

    #[test]
    fn test_parse_plain_row() {
        let parser = Parser::new();
        let html = row_html(
            r#"<div class="font-medium">Kin Kılıcı+9</div>"#,
            "1",
            "50 m",
            "1 w",
            "Demirci",
        );
        let page = parser.parse_page(&html);
        assert_eq!(page.rows_seen, 1);
        assert_eq!(page.listings.len(), 1);

        let listing = &page.listings[0];
        assert_eq!(listing.item_name, "Kin Kılıcı+9");
        assert_eq!(listing.seller, "Demirci");
        assert_eq!(listing.quantity, 1);
        assert_eq!(listing.price_yang, 50_000_000);
        assert_eq!(listing.price_won, 1);
        assert_eq!(listing.total_yang, 150_000_000);
        assert!(listing.bonuses.is_empty());
    }

    #[test]
    fn test_embedded_affix_span_removed_from_name() {
        let parser = Parser::new();
        let html = row_html(
            r#"<div class="font-medium">Kin Kılıcı+9 <span>Ort. Zarar +%50</span></div>"#,
            "1",
            "0",
            "2 w",
            "Demirci",
        );
        let page = parser.parse_page(&html);
        let listing = &page.listings[0];
        assert_eq!(listing.item_name, "Kin Kılıcı+9");
        assert_eq!(listing.bonuses[0], "Ort. Zarar +%50");
    }

    #[test]
    fn test_special_bonuses_precede_standard() {
        let parser = Parser::new();
        let info = concat!(
            r#"<div class="font-medium">Kin Kılıcı <span>Özel A</span><span>Özel B</span></div>"#,
            r#"<div class="text-xs text-gray-400"><span>Standart 1</span><span>Standart 2</span></div>"#,
        );
        let html = row_html(info, "1", "100", "0", "Satıcı");
        let page = parser.parse_page(&html);
        let listing = &page.listings[0];
        assert_eq!(listing.item_name, "Kin Kılıcı");
        assert_eq!(
            listing.bonuses,
            vec!["Özel A", "Özel B", "Standart 1", "Standart 2"]
        );
    }

    #[test]
    fn test_row_with_too_few_cells_is_skipped() {
        let parser = Parser::new();
        let html = r#"<table><tbody>
            <tr><td>only</td><td>four</td><td>cells</td><td>here</td></tr>
            <tr><td></td><td><div class="font-medium">Orkide Çan</div></td>
                <td>1</td><td>5 m</td><td>0</td><td>Sat</td></tr>
        </tbody></table>"#;
        let page = parser.parse_page(html);
        assert_eq!(page.rows_seen, 2);
        assert_eq!(page.listings.len(), 1);
        assert_eq!(page.listings[0].item_name, "Orkide Çan");
    }

    #[test]
    fn test_missing_seller_defaults_to_unknown() {
        let parser = Parser::new();
        let html = r#"<table><tbody><tr>
            <td></td>
            <td><div class="font-medium">İnci</div></td>
            <td>200</td><td>10 m</td><td>0</td>
        </tr></tbody></table>"#;
        let page = parser.parse_page(html);
        assert_eq!(page.listings[0].seller, "Unknown");
    }

    #[test]
    fn test_zero_quantity_coerced() {
        let parser = Parser::new();
        let html = row_html(
            r#"<div class="font-medium">İnci</div>"#,
            "garbage",
            "1 m",
            "0",
            "Sat",
        );
        let page = parser.parse_page(&html);
        assert_eq!(page.listings[0].quantity, 1);
        assert_eq!(page.listings[0].unit_price, 1_000_000.0);
    }

    #[test]
    fn test_info_cell_without_name_div_uses_full_text() {
        let parser = Parser::new();
        let html = row_html("Kaplan Kalkan", "1", "3 m", "0", "Sat");
        let page = parser.parse_page(&html);
        assert_eq!(page.listings[0].item_name, "Kaplan Kalkan");
    }

    #[test]
    fn test_no_data_page() {
        let parser = Parser::new();
        let html = r#"<table><tbody><tr>
            <td colspan="6">No data available in table</td>
        </tr></tbody></table>"#;
        let page = parser.parse_page(html);
        assert!(page.no_data);
        assert!(page.is_end());
        assert!(page.listings.is_empty());
    }

    #[test]
    fn test_empty_page_ends_pagination() {
        let parser = Parser::new();
        let page = parser.parse_page("<html><body></body></html>");
        assert!(!page.no_data);
        assert_eq!(page.rows_seen, 0);
        assert!(page.is_end());
    }
}
